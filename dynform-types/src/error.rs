/// Error type for loading and checking field descriptions.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// The description is not valid JSON or does not have the expected shape.
    #[error("Malformed field description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate field id: {0}")]
    DuplicateId(String),

    #[error("Group '{0}' has no nested fields")]
    EmptyGroup(String),

    /// Groups nest one level only.
    #[error("Group '{group}' contains another group '{nested}'")]
    NestedGroup { group: String, nested: String },

    #[error("Field '{0}' is not a group but declares nested fields")]
    UnexpectedNestedFields(String),

    #[error("Field '{id}' has min {min} greater than max {max}")]
    InvertedBounds { id: String, min: f64, max: f64 },
}

/// Error type for key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed store contents: {0}")]
    Json(#[from] serde_json::Error),
}
