use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared type of a field.
///
/// Unknown type strings are kept as `Unrecognized` instead of failing to
/// deserialize, so that rendering can report them next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Single-line text entry.
    Text,

    /// Numeric text entry.
    Number,

    /// E-mail text entry.
    Email,

    /// Choice from a fixed list of options.
    Select,

    /// Boolean toggle.
    Checkbox,

    /// A group of nested fields, persisted as one unit.
    Group,

    /// Any type string not listed above.
    Unrecognized(String),
}

impl FieldType {
    /// The type string as it appears in field descriptions.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Group => "group",
            Self::Unrecognized(other) => other,
        }
    }

    /// Check if this type is rendered as a text-entry control.
    pub fn is_text_entry(&self) -> bool {
        matches!(self, Self::Text | Self::Number | Self::Email)
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group)
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => Self::Text,
            "number" => Self::Number,
            "email" => Self::Email,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "group" => Self::Group,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Unrecognized(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
