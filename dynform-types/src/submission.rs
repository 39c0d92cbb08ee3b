use std::collections::BTreeMap;

use serde::Serialize;

use crate::FieldValue;

/// The values collected from a form that passed validation.
///
/// A flat mapping from field id to value, sorted by id; nested fields of
/// groups appear under their own ids. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    values: BTreeMap<String, FieldValue>,
}

impl Submission {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(id.into(), value.into());
    }

    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_flat_object() {
        let mut submission = Submission::new();
        submission.insert("news", true);
        submission.insert("age", "30");

        assert_eq!(
            serde_json::to_string(&submission).unwrap(),
            r#"{"age":"30","news":true}"#
        );
    }
}
