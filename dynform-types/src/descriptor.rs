use serde::{Deserialize, Serialize};

use crate::{FieldType, Pattern};

/// A pre-filled value for a field, as written in the field description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl DefaultValue {
    /// The value as control text (`18`, `true`, `Alice`).
    pub fn to_text(&self) -> String {
        match self {
            Self::Flag(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// The value as a toggle state, if it reads as one.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Text(s) => s.parse().ok(),
            Self::Number(_) => None,
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<f64> for DefaultValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for DefaultValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Validation rules attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Validation {
    /// Lower numeric bound (inclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper numeric bound (inclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Regular expression the value has to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,

    /// Choices offered by a `select` field, in display order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// A static, declarative description of one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Unique id, used as element id and storage key.
    pub id: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Display text.
    pub label: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,

    /// Nested fields, only for `group` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
}

impl FieldDescriptor {
    /// Create a new descriptor without rules or default value.
    pub fn new(
        id: impl Into<String>,
        field_type: impl Into<FieldType>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            field_type: field_type.into(),
            label: label.into(),
            required: false,
            validation: None,
            default_value: None,
            fields: Vec::new(),
        }
    }

    /// Create a group descriptor holding `fields`.
    pub fn group(
        id: impl Into<String>,
        label: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            fields,
            ..Self::new(id, FieldType::Group, label)
        }
    }

    /// Mark the field as required (or not).
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.validation_mut().min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.validation_mut().max = Some(max);
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.validation_mut().pattern = Some(pattern);
        self
    }

    /// Set the choices of a `select` field.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validation_mut().options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    fn validation_mut(&mut self) -> &mut Validation {
        self.validation.get_or_insert_with(Validation::default)
    }

    pub fn min(&self) -> Option<f64> {
        self.validation.as_ref().and_then(|v| v.min)
    }

    pub fn max(&self) -> Option<f64> {
        self.validation.as_ref().and_then(|v| v.max)
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.validation.as_ref().and_then(|v| v.pattern.as_ref())
    }

    pub fn options(&self) -> &[String] {
        self.validation
            .as_ref()
            .map(|v| v.options.as_slice())
            .unwrap_or_default()
    }

    pub fn is_group(&self) -> bool {
        self.field_type.is_group()
    }
}
