use dynform_types::{FieldType, StoreError};

/// Construction-fatal failure of the field renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No control exists for this field type.
    #[error("Unable to create input element for field '{id}' of type: {field_type}")]
    UnexpectedType { id: String, field_type: FieldType },
}

/// Error type for form handler operations.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Render(#[from] RenderError),

    /// An event named a field id that is not part of the form.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// An event carried a value of the wrong shape for the field.
    #[error("Field '{id}' of type {field_type} cannot hold a {actual} value")]
    ValueMismatch {
        id: String,
        field_type: FieldType,
        actual: &'static str,
    },

    /// A select field was given a value that is not one of its options.
    #[error("'{value}' is not an option of field '{id}'")]
    UnknownOption { id: String, value: String },

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// The submission sink failed (I/O, network, ...).
    #[error("Submission failed: {0}")]
    Sink(anyhow::Error),
}

impl FormError {
    /// Create a sink error from any error type.
    pub fn sink(err: impl Into<anyhow::Error>) -> Self {
        Self::Sink(err.into())
    }
}
