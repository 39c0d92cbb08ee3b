//! Persistence sync between the value model and a key-value store.
//!
//! Entries are keyed by field id. Scalar fields store their raw text,
//! checkboxes store `true` / `false`, and a group stores one JSON object
//! mapping each nested id to its value.

use std::collections::{BTreeMap, HashMap};

use dynform_types::{
    FieldDescriptor, FieldList, FieldType, FieldValue, FieldValues, KeyValueStore, StoreError,
};

/// Write the current value of `descriptor` to the store.
///
/// For a group, every nested value is gathered into one JSON object and
/// stored under the group's id.
pub fn persist<S: KeyValueStore + ?Sized>(
    store: &mut S,
    descriptor: &FieldDescriptor,
    values: &FieldValues,
) -> Result<(), StoreError> {
    let stored = if descriptor.is_group() {
        let nested: BTreeMap<&str, &FieldValue> = descriptor
            .fields
            .iter()
            .filter_map(|nested| Some((nested.id.as_str(), values.get(&nested.id)?)))
            .collect();
        serde_json::to_string(&nested)?
    } else {
        values
            .get(&descriptor.id)
            .map(FieldValue::to_stored)
            .unwrap_or_default()
    };

    store.set(&descriptor.id, &stored)?;
    tracing::trace!(field = %descriptor.id, "persisted");
    Ok(())
}

/// Read stored entries back into the value model.
///
/// Missing entries leave the field untouched. Entries that cannot be read
/// back (malformed group JSON, a checkbox entry that is not a boolean, a
/// select entry that is not one of its options) are logged and skipped. Returns the number of top-level fields restored.
pub fn populate<S: KeyValueStore + ?Sized>(
    store: &S,
    fields: &FieldList,
    values: &mut FieldValues,
) -> Result<usize, StoreError> {
    let mut restored = 0;

    for descriptor in fields {
        let Some(saved) = store.get(&descriptor.id)? else {
            continue;
        };

        if descriptor.is_group() {
            let group: HashMap<String, serde_json::Value> = match serde_json::from_str(&saved) {
                Ok(group) => group,
                Err(err) => {
                    tracing::warn!(field = %descriptor.id, %err, "skipping malformed group entry");
                    continue;
                }
            };
            for nested in &descriptor.fields {
                if let Some(raw) = group.get(&nested.id)
                    && let Some(value) = value_from_json(nested, raw)
                {
                    values.set(nested.id.clone(), value);
                }
            }
            restored += 1;
        } else if let Some(value) = value_from_stored(descriptor, &saved) {
            values.set(descriptor.id.clone(), value);
            restored += 1;
        } else {
            tracing::warn!(field = %descriptor.id, saved = %saved, "skipping unreadable entry");
        }
    }

    tracing::debug!(restored, "populated form from store");
    Ok(restored)
}

/// Remove the stored entry of every field, nested fields included.
pub fn clear_all<S: KeyValueStore + ?Sized>(
    store: &mut S,
    fields: &FieldList,
) -> Result<(), StoreError> {
    for descriptor in fields {
        store.remove(&descriptor.id)?;
        for nested in &descriptor.fields {
            store.remove(&nested.id)?;
        }
    }
    tracing::debug!("cleared stored values");
    Ok(())
}

fn value_from_stored(descriptor: &FieldDescriptor, saved: &str) -> Option<FieldValue> {
    match descriptor.field_type {
        FieldType::Checkbox => saved.parse().ok().map(FieldValue::Flag),
        FieldType::Select => descriptor
            .options()
            .iter()
            .any(|option| option == saved)
            .then(|| FieldValue::Text(saved.to_string())),
        FieldType::Group | FieldType::Unrecognized(_) => None,
        _ => Some(FieldValue::Text(saved.to_string())),
    }
}

fn value_from_json(descriptor: &FieldDescriptor, raw: &serde_json::Value) -> Option<FieldValue> {
    match raw {
        serde_json::Value::String(text) => value_from_stored(descriptor, text),
        serde_json::Value::Bool(flag) => match descriptor.field_type {
            FieldType::Checkbox => Some(FieldValue::Flag(*flag)),
            _ => Some(FieldValue::Text(flag.to_string())),
        },
        serde_json::Value::Number(number) => value_from_stored(descriptor, &number.to_string()),
        _ => None,
    }
}
