//! # dynform-ratatui
//!
//! Terminal host for dynform.
//!
//! Shows a loading message while readiness is simulated, then every field of
//! the form at once. Users move between fields with Tab/Shift+Tab, type into
//! text fields, cycle select options with the arrow keys and toggle
//! checkboxes with Space. Values are persisted on every change and restored
//! on the next start.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dynform::{FieldList, JsonFileStore, LogSink};
//! use dynform_ratatui::RatatuiForm;
//!
//! fn main() -> anyhow::Result<()> {
//!     let fields = FieldList::from_json_str(&std::fs::read_to_string("form.json")?)?;
//!     let store = JsonFileStore::open("form-store.json")?;
//!
//!     let submission = RatatuiForm::new()
//!         .with_title("Sign up")
//!         .run(fields, store, LogSink)?;
//!     println!("{}", serde_json::to_string_pretty(&submission)?);
//!     Ok(())
//! }
//! ```

mod backend;
mod draw;
mod page;

pub use backend::{RatatuiForm, RatatuiFormError, Theme};
pub use page::{Page, Target};
