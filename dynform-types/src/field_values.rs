use std::collections::HashMap;

use crate::{FieldDescriptor, FieldList, FieldType, FieldValue};

/// The in-memory value model of a form.
///
/// Holds one entry per value-carrying field (top-level fields and the nested
/// fields of groups). Rendered controls only reflect this model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    values: HashMap<String, FieldValue>,
}

impl FieldValues {
    /// Create an empty value model.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Create a value model holding every field's default value.
    pub fn from_defaults(fields: &FieldList) -> Self {
        let mut values = Self::new();
        values.reset_to_defaults(fields);
        values
    }

    /// The value a freshly rendered control shows for `descriptor`.
    ///
    /// Select fields without a default show their first option. Groups and
    /// unrecognised types carry no value.
    pub fn default_for(descriptor: &FieldDescriptor) -> Option<FieldValue> {
        let default = descriptor.default_value.as_ref();
        match &descriptor.field_type {
            FieldType::Text | FieldType::Number | FieldType::Email => Some(FieldValue::Text(
                default.map(|d| d.to_text()).unwrap_or_default(),
            )),
            FieldType::Select => Some(FieldValue::Text(
                default
                    .map(|d| d.to_text())
                    .or_else(|| descriptor.options().first().cloned())
                    .unwrap_or_default(),
            )),
            FieldType::Checkbox => Some(FieldValue::Flag(
                default.and_then(|d| d.as_flag()).unwrap_or(false),
            )),
            FieldType::Group | FieldType::Unrecognized(_) => None,
        }
    }

    /// Replace every value with its default.
    pub fn reset_to_defaults(&mut self, fields: &FieldList) {
        self.values.clear();
        for field in fields.leaves() {
            if let Some(value) = Self::default_for(field) {
                self.values.insert(field.id.clone(), value);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
    }

    /// Get the text of a field, or `""` when it has none.
    pub fn text(&self, id: &str) -> &str {
        self.get(id).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Get the flag of a field, or `false` when it has none.
    pub fn flag(&self, id: &str) -> bool {
        self.get(id).and_then(FieldValue::as_flag).unwrap_or(false)
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(id.into(), value.into());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
