//! Core types for the dynform crates.
//!
//! This crate provides the foundational, host-agnostic types:
//! - `FieldDescriptor`, `FieldType` and `Validation` - Declarative field descriptions
//! - `FieldList` - A checked, ordered list of descriptors
//! - `FieldValue` and `FieldValues` - The in-memory value model
//! - `Submission` - Values handed to a sink after a successful submit
//! - `KeyValueStore` and `SubmissionSink` traits - For storage and submission backends

mod field_type;
pub use field_type::FieldType;

mod pattern;
pub use pattern::Pattern;

mod descriptor;
pub use descriptor::{DefaultValue, FieldDescriptor, Validation};

mod field_list;
pub use field_list::FieldList;

mod field_value;
pub use field_value::FieldValue;

mod field_values;
pub use field_values::FieldValues;

mod submission;
pub use submission::Submission;

mod error;
pub use error::{DescriptorError, StoreError};

mod traits;
pub use traits::{KeyValueStore, SubmissionSink};
