//! # dynform
//!
//! Render forms from declarative field descriptions, validate them and keep
//! their values in a durable key-value store. Host-agnostic.
//!
//! The core is driven by explicit calls instead of a document event loop:
//! a host renders a [`Phase`], forwards input/submit/reset events to the
//! [`FormHandlers`] of the ready [`Form`], and draws whatever the form's
//! [`FormContainer`] and [`FieldValues`] say.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dynform::{FieldList, FieldValue, FormHandlers, MemoryStore, Phase, Readiness, RecordingSink, SubmitEvent};
//!
//! let fields = FieldList::from_json_str(include_str!("form_data.json"))?;
//! let phase = Phase::loading().complete(Readiness::Ready, fields, MemoryStore::new(), RecordingSink::new())?;
//!
//! let form = phase.into_form().expect("ready");
//! form.on_input("age", FieldValue::from("30"))?;
//! let outcome = form.on_submit(&mut SubmitEvent::new())?;
//! ```
//!
//! ## Components
//!
//! - [`render`] - Field renderer: descriptors to field containers with live listeners
//! - [`validate`] - Validation engine run on submit
//! - [`persist`] - Persistence sync (persist, populate, clear)
//! - [`orchestrator`] - Loading / Error / Ready state machine
//! - [`store`] and [`sink`] - Stores and submission sinks

// Re-export all types from dynform-types
pub use dynform_types::*;

mod error;
pub use error::{FormError, RenderError};

pub mod render;
pub use render::{
    Border, Button, ButtonKind, Control, FieldContainer, FormContainer, InputType, Listener,
    Notice, render_field, render_form,
};

mod inline_error;
pub use inline_error::{clear_error, show_error};

pub mod validate;
pub use validate::{FieldError, SubmitEvent, SubmitOutcome, validate_and_submit};

pub mod persist;

pub mod store;
pub use store::{JsonFileStore, MemoryStore};

pub mod sink;
pub use sink::{JsonLinesSink, LogSink, RecordingSink};

mod form;
pub use form::{Form, FormHandlers};

mod event;
pub use event::{FormEvent, dispatch};

mod config;
pub use config::FormConfig;

pub mod orchestrator;
pub use orchestrator::{Phase, Readiness, ReadinessSimulation, ReadinessTimer};
