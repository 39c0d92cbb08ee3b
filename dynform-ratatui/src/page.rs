//! Page state of the terminal host: phase, focus and text cursor.
//!
//! Key events are translated into [`FormEvent`]s and dispatched to the
//! ready form; everything the page draws comes from the form's view and
//! value model.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dynform::{
    ButtonKind, Control, FieldContainer, FieldList, FormConfig, FormContainer, FormEvent,
    KeyValueStore, Phase, ReadinessSimulation, ReadinessTimer, Submission, SubmissionSink,
    SubmitOutcome, dispatch,
};
use rand::Rng;

use crate::RatatuiFormError;

/// Longest wait for a key event once readiness is decided.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Something on the page that can hold focus.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Text { id: String },
    Choice { id: String, options: Vec<String> },
    Toggle { id: String },
    Button(ButtonKind),
}

impl Target {
    /// Id of the field behind this target (`None` for buttons).
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Self::Text { id } | Self::Choice { id, .. } | Self::Toggle { id } => Some(id),
            Self::Button(_) => None,
        }
    }
}

/// One-line message under the form.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Status {
    Info(String),
    Warning(String),
}

struct Pending<S, K> {
    fields: FieldList,
    store: S,
    sink: K,
}

enum Edit {
    Insert(char),
    Backspace,
    Delete,
}

/// State of the form page between key events.
pub struct Page<S, K> {
    pub(crate) phase: Phase<S, K>,
    pending: Option<Pending<S, K>>,
    simulation: ReadinessSimulation,
    timer: ReadinessTimer,
    pub(crate) targets: Vec<Target>,
    pub(crate) focus: usize,
    pub(crate) cursor: usize,
    pub(crate) scroll: u16,
    pub(crate) status: Option<Status>,
}

impl<S, K> Page<S, K> {
    pub fn phase(&self) -> &Phase<S, K> {
        &self.phase
    }

    pub fn focused(&self) -> Option<&Target> {
        self.targets.get(self.focus)
    }

    /// The message under the form, if any.
    pub fn status_text(&self) -> Option<&str> {
        match &self.status {
            Some(Status::Info(text) | Status::Warning(text)) => Some(text),
            None => None,
        }
    }

    /// How long to wait for the next key event.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if self.phase.is_loading() {
            self.timer.remaining(now).min(IDLE_POLL)
        } else {
            IDLE_POLL
        }
    }

    fn focused_text(&self) -> Option<&str> {
        let form = self.phase.form()?;
        match self.focused()? {
            Target::Text { id } => Some(form.values().text(id)),
            _ => None,
        }
    }

    fn cursor_to_end(&mut self) {
        self.cursor = self.focused_text().map_or(0, |text| text.chars().count());
    }

    fn next(&mut self) {
        if self.focus + 1 < self.targets.len() {
            self.focus += 1;
            self.cursor_to_end();
        }
    }

    fn prev(&mut self) {
        if self.focus > 0 {
            self.focus -= 1;
            self.cursor_to_end();
        }
    }
}

impl<S: KeyValueStore, K: SubmissionSink> Page<S, K> {
    /// Start the page in the loading phase at `now`.
    pub fn new(fields: FieldList, store: S, sink: K, config: &FormConfig, now: Instant) -> Self {
        let simulation = config.readiness();
        Self {
            phase: Phase::loading(),
            pending: Some(Pending {
                fields,
                store,
                sink,
            }),
            simulation,
            timer: simulation.start(now),
            targets: Vec::new(),
            focus: 0,
            cursor: 0,
            scroll: 0,
            status: None,
        }
    }

    /// Decide readiness once the timer is due.
    ///
    /// Rendering failures of the field list are returned; the page stays
    /// in the loading phase in that case.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> Result<(), RatatuiFormError> {
        if !self.phase.is_loading() || !self.timer.is_due(now) {
            return Ok(());
        }
        let Some(Pending {
            fields,
            store,
            sink,
        }) = self.pending.take()
        else {
            return Ok(());
        };

        let readiness = self.simulation.sample(rng);
        let phase = std::mem::replace(&mut self.phase, Phase::Loading);
        self.phase = phase.complete(readiness, fields, store, sink)?;
        tracing::info!(?readiness, ready = self.phase.is_ready(), "page left loading");

        if let Some(form) = self.phase.form() {
            self.targets = targets(form.view());
            self.focus = 0;
            self.cursor_to_end();
        }
        Ok(())
    }

    /// Handle one key press.
    ///
    /// Returns the submission once the form was submitted successfully.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Option<Submission>, RatatuiFormError> {
        match &self.phase {
            Phase::Loading => {
                if key.code == KeyCode::Esc {
                    return Err(RatatuiFormError::Cancelled);
                }
                return Ok(None);
            }
            Phase::Error { message } => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    return Err(RatatuiFormError::Unavailable(message.clone()));
                }
                return Ok(None);
            }
            Phase::Ready(_) => {}
        }

        self.status = None;
        let control = key.modifiers.contains(KeyModifiers::CONTROL);

        match (key.code, self.focused().cloned()) {
            (KeyCode::Esc, _) => return Err(RatatuiFormError::Cancelled),
            (KeyCode::F(10), _) => return self.submit(),
            (KeyCode::Char('s'), _) if control => return self.submit(),
            (KeyCode::BackTab, _) => self.prev(),
            (KeyCode::Tab, _) if key.modifiers.contains(KeyModifiers::SHIFT) => self.prev(),
            (KeyCode::Tab, _) => self.next(),
            (KeyCode::Up, Some(Target::Choice { id, options })) => {
                self.cycle_option(&id, &options, false)?;
            }
            (KeyCode::Down, Some(Target::Choice { id, options })) => {
                self.cycle_option(&id, &options, true)?;
            }
            (KeyCode::Up, _) => self.prev(),
            (KeyCode::Down, _) => self.next(),
            (KeyCode::Enter | KeyCode::Char(' '), Some(Target::Button(ButtonKind::Submit))) => {
                return self.submit();
            }
            (KeyCode::Enter | KeyCode::Char(' '), Some(Target::Button(ButtonKind::Reset))) => {
                self.reset()?;
            }
            (KeyCode::Char(' '), Some(Target::Toggle { id })) => {
                let checked = self
                    .phase
                    .form()
                    .is_some_and(|form| form.values().flag(&id));
                self.send(FormEvent::input(id, !checked))?;
            }
            (KeyCode::Enter, _) => self.next(),
            (KeyCode::Char(c), Some(Target::Text { id })) if !control => {
                self.edit(&id, Edit::Insert(c))?;
            }
            (KeyCode::Backspace, Some(Target::Text { id })) => self.edit(&id, Edit::Backspace)?,
            (KeyCode::Delete, Some(Target::Text { id })) => self.edit(&id, Edit::Delete)?,
            (KeyCode::Left, Some(Target::Text { .. })) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            (KeyCode::Right, Some(Target::Text { .. })) => {
                let len = self.focused_text().map_or(0, |text| text.chars().count());
                self.cursor = (self.cursor + 1).min(len);
            }
            (KeyCode::Home, Some(Target::Text { .. })) => self.cursor = 0,
            (KeyCode::End, Some(Target::Text { .. })) => self.cursor_to_end(),
            _ => {}
        }
        Ok(None)
    }

    fn send(&mut self, event: FormEvent) -> Result<Option<SubmitOutcome>, RatatuiFormError> {
        let Some(form) = self.phase.form_mut() else {
            return Ok(None);
        };
        Ok(dispatch(form, event)?)
    }

    fn edit(&mut self, id: &str, edit: Edit) -> Result<(), RatatuiFormError> {
        let Some(mut text) = self
            .phase
            .form()
            .map(|form| form.values().text(id).to_string())
        else {
            return Ok(());
        };

        match edit {
            Edit::Insert(c) => {
                text.insert(byte_offset(&text, self.cursor), c);
                self.cursor += 1;
            }
            Edit::Backspace => {
                if self.cursor == 0 {
                    return Ok(());
                }
                self.cursor -= 1;
                text.remove(byte_offset(&text, self.cursor));
            }
            Edit::Delete => {
                let at = byte_offset(&text, self.cursor);
                if at >= text.len() {
                    return Ok(());
                }
                text.remove(at);
            }
        }

        self.send(FormEvent::input(id, text))?;
        Ok(())
    }

    fn cycle_option(
        &mut self,
        id: &str,
        options: &[String],
        forward: bool,
    ) -> Result<(), RatatuiFormError> {
        if options.is_empty() {
            return Ok(());
        }
        let current = self
            .phase
            .form()
            .and_then(|form| options.iter().position(|option| option == form.values().text(id)));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(idx), true) => (idx + 1) % options.len(),
            (Some(idx), false) => (idx + options.len() - 1) % options.len(),
        };
        self.send(FormEvent::input(id, options[next].as_str()))?;
        Ok(())
    }

    fn submit(&mut self) -> Result<Option<Submission>, RatatuiFormError> {
        match self.send(FormEvent::Submit)? {
            Some(SubmitOutcome::Submitted(submission)) => {
                tracing::info!(fields = submission.len(), "page submitted");
                Ok(Some(submission))
            }
            Some(SubmitOutcome::Rejected(errors)) => {
                tracing::debug!(errors = errors.len(), "page submit rejected");
                if let Some(first) = errors.first()
                    && let Some(idx) = self
                        .targets
                        .iter()
                        .position(|target| target.field_id() == Some(first.field_id.as_str()))
                {
                    self.focus = idx;
                    self.cursor_to_end();
                }
                self.status = Some(Status::Warning(format!(
                    "{} field(s) need attention",
                    errors.len()
                )));
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn reset(&mut self) -> Result<(), RatatuiFormError> {
        self.send(FormEvent::Reset)?;
        tracing::debug!("page reset");
        self.cursor_to_end();
        self.status = Some(Status::Info("Form reset".to_string()));
        Ok(())
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Focus order: every leaf field in rendering order, then the buttons.
fn targets(view: &FormContainer) -> Vec<Target> {
    let mut targets = Vec::new();
    for field in view.fields() {
        push_targets(field, &mut targets);
    }
    targets.extend(view.buttons().iter().map(|button| Target::Button(button.kind)));
    targets
}

fn push_targets(field: &FieldContainer, targets: &mut Vec<Target>) {
    let id = field.id.clone();
    match &field.control {
        Control::TextEntry { .. } => targets.push(Target::Text { id }),
        Control::Choice { options, .. } => targets.push(Target::Choice {
            id,
            options: options.clone(),
        }),
        Control::Toggle { .. } => targets.push(Target::Toggle { id }),
        Control::Group { fields, .. } => {
            for nested in fields {
                push_targets(nested, targets);
            }
        }
    }
}
