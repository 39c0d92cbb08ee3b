use std::collections::HashSet;

use serde::Deserialize;

use crate::{DescriptorError, FieldDescriptor};

/// An ordered, checked list of field descriptors.
///
/// Construction enforces the invariants every other component relies on:
/// ids are unique across all nesting levels, groups are non-empty and nest
/// exactly one level, and numeric bounds are ordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldList {
    fields: Vec<FieldDescriptor>,
}

/// Top-level shape of a field-description document.
#[derive(Deserialize)]
struct FieldListDocument {
    fields: Vec<FieldDescriptor>,
}

impl FieldList {
    /// Check and wrap a list of descriptors.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, DescriptorError> {
        let mut seen = HashSet::new();

        for field in &fields {
            check_descriptor(field, &mut seen)?;

            if field.is_group() {
                if field.fields.is_empty() {
                    return Err(DescriptorError::EmptyGroup(field.id.clone()));
                }
                for nested in &field.fields {
                    if nested.is_group() {
                        return Err(DescriptorError::NestedGroup {
                            group: field.id.clone(),
                            nested: nested.id.clone(),
                        });
                    }
                    check_descriptor(nested, &mut seen)?;
                }
            }
        }

        Ok(Self { fields })
    }

    /// Parse a `{"fields": [...]}` document.
    pub fn from_json_str(json: &str) -> Result<Self, DescriptorError> {
        let document: FieldListDocument = serde_json::from_str(json)?;
        Self::new(document.fields)
    }

    /// The top-level descriptors, in order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Every field that holds a value: top-level non-group fields and the
    /// nested fields of groups, in display order.
    pub fn leaves(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().flat_map(|field| {
            if field.is_group() {
                field.fields.iter().collect::<Vec<_>>()
            } else {
                vec![field]
            }
        })
    }

    /// Find a descriptor by id at any nesting level.
    pub fn find(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find_map(|field| {
            if field.id == id {
                Some(field)
            } else {
                field.fields.iter().find(|nested| nested.id == id)
            }
        })
    }

    /// Find the top-level descriptor that owns `id`: the field itself, or the
    /// group it is nested in.
    pub fn owner_of(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|field| field.id == id || field.fields.iter().any(|nested| nested.id == id))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn check_descriptor(
    field: &FieldDescriptor,
    seen: &mut HashSet<String>,
) -> Result<(), DescriptorError> {
    if !seen.insert(field.id.clone()) {
        return Err(DescriptorError::DuplicateId(field.id.clone()));
    }
    if !field.is_group() && !field.fields.is_empty() {
        return Err(DescriptorError::UnexpectedNestedFields(field.id.clone()));
    }
    if let (Some(min), Some(max)) = (field.min(), field.max())
        && min > max
    {
        return Err(DescriptorError::InvertedBounds {
            id: field.id.clone(),
            min,
            max,
        });
    }
    Ok(())
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
