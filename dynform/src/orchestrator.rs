//! Form orchestrator: the Loading / Error / Ready state machine.
//!
//! A host starts in [`Phase::Loading`], waits for the [`ReadinessTimer`],
//! samples a [`Readiness`] and calls [`Phase::complete`]. Transitions take
//! the phase by value and return the next one.

use std::time::{Duration, Instant};

use dynform_types::{FieldList, KeyValueStore, SubmissionSink};
use rand::Rng;

use crate::{Form, FormConfig, FormError};

/// Shown while the form data is loading.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Shown when readiness fails.
pub const READINESS_FAILURE_MESSAGE: &str = "Failed to load form data. Please try again later.";

/// Outcome of the readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Failed,
}

/// Simulated data fetch: a fixed delay followed by a random failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessSimulation {
    pub delay: Duration,
    pub failure_probability: f64,
}

impl ReadinessSimulation {
    pub fn new(delay: Duration, failure_probability: f64) -> Self {
        let failure_probability = if failure_probability.is_nan() {
            0.0
        } else {
            failure_probability.clamp(0.0, 1.0)
        };
        Self {
            delay,
            failure_probability,
        }
    }

    /// A simulation that never fails and does not wait.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, 0.0)
    }

    /// Decide the outcome using `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Readiness {
        if rng.gen_bool(self.failure_probability) {
            Readiness::Failed
        } else {
            Readiness::Ready
        }
    }

    /// Start waiting at `now`.
    pub fn start(&self, now: Instant) -> ReadinessTimer {
        ReadinessTimer {
            deadline: now + self.delay,
        }
    }
}

/// Deadline after which readiness is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessTimer {
    deadline: Instant,
}

impl ReadinessTimer {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

/// Phase of the form page.
#[derive(Debug)]
pub enum Phase<S, K> {
    /// Waiting for readiness; the page shows [`LOADING_MESSAGE`].
    Loading,

    /// Readiness failed. Terminal.
    Error { message: String },

    /// The form is rendered, populated and accepting events.
    Ready(Box<Form<S, K>>),
}

impl<S: KeyValueStore, K: SubmissionSink> Phase<S, K> {
    pub fn loading() -> Self {
        tracing::debug!("phase: loading");
        Self::Loading
    }

    /// Enter the loading phase and start the readiness timer from `config`.
    pub fn begin(config: &FormConfig) -> (Self, ReadinessTimer) {
        let timer = config.readiness().start(Instant::now());
        (Self::loading(), timer)
    }

    /// Leave the loading phase.
    ///
    /// On [`Readiness::Failed`] the page moves to [`Phase::Error`]. On
    /// [`Readiness::Ready`] the fields are rendered, the form is built and
    /// populated from `store`; rendering failures are returned as errors.
    /// Any phase other than `Loading` is returned unchanged.
    pub fn complete(
        self,
        readiness: Readiness,
        fields: FieldList,
        store: S,
        sink: K,
    ) -> Result<Self, FormError> {
        if !self.is_loading() {
            return Ok(self);
        }

        match readiness {
            Readiness::Failed => {
                tracing::warn!("phase: error, readiness failed");
                Ok(Self::Error {
                    message: READINESS_FAILURE_MESSAGE.to_string(),
                })
            }
            Readiness::Ready => {
                let mut form = Form::build(fields, store, sink)?;
                let restored = form.populate()?;
                tracing::info!(fields = form.fields().len(), restored, "phase: ready");
                Ok(Self::Ready(Box::new(form)))
            }
        }
    }
}

impl<S, K> Phase<S, K> {
    /// The message the page shows instead of a form, if any.
    pub fn status_message(&self) -> Option<&str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::Error { message } => Some(message),
            Self::Ready(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn form(&self) -> Option<&Form<S, K>> {
        match self {
            Self::Ready(form) => Some(form.as_ref()),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut Form<S, K>> {
        match self {
            Self::Ready(form) => Some(form.as_mut()),
            _ => None,
        }
    }

    pub fn into_form(self) -> Option<Form<S, K>> {
        match self {
            Self::Ready(form) => Some(*form),
            _ => None,
        }
    }
}
