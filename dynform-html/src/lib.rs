//! # dynform-html
//!
//! Static HTML host for dynform.
//!
//! Serialises a page to an HTML document: the mount element holds either
//! the loading / error message or the rendered form with its current
//! values, inline error messages and error borders.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dynform::{FieldList, MemoryStore, Phase, Readiness, RecordingSink};
//! use dynform_html::{HtmlOptions, to_html};
//!
//! let fields = FieldList::from_json_str(include_str!("form.json"))?;
//! let phase = Phase::loading().complete(Readiness::Ready, fields, MemoryStore::new(), RecordingSink::new())?;
//!
//! let html = to_html(&phase, &HtmlOptions::new().with_title("Sign up"));
//! std::fs::write("form.html", html)?;
//! ```

mod generator;

pub use generator::{HtmlOptions, form_to_html, to_html};
