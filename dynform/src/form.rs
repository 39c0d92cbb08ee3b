use dynform_types::{
    FieldList, FieldType, FieldValue, FieldValues, KeyValueStore, SubmissionSink,
};

use crate::{FormContainer, FormError, SubmitEvent, SubmitOutcome, persist, render_form};

/// Handlers a host calls for the events of a rendered form.
///
/// Hosts translate their own events (key presses, clicks, document events)
/// into these calls; tests call them directly with synthetic events.
pub trait FormHandlers {
    /// A field's value changed.
    fn on_input(&mut self, field_id: &str, value: FieldValue) -> Result<(), FormError>;

    /// The form was submitted.
    fn on_submit(&mut self, event: &mut SubmitEvent) -> Result<SubmitOutcome, FormError>;

    /// The reset button was pressed.
    fn on_reset(&mut self) -> Result<(), FormError>;
}

/// A rendered form bound to its value model, store and submission sink.
#[derive(Debug)]
pub struct Form<S, K> {
    fields: FieldList,
    view: FormContainer,
    values: FieldValues,
    store: S,
    sink: K,
}

impl<S: KeyValueStore, K: SubmissionSink> Form<S, K> {
    /// Render `fields` and initialise the value model from their defaults.
    ///
    /// Stored values are not read here; call [`Form::populate`] for that.
    pub fn build(fields: FieldList, store: S, sink: K) -> Result<Self, FormError> {
        let view = render_form(&fields)?;
        let values = FieldValues::from_defaults(&fields);
        Ok(Self {
            fields,
            view,
            values,
            store,
            sink,
        })
    }

    /// Restore stored values into the value model.
    pub fn populate(&mut self) -> Result<usize, FormError> {
        Ok(persist::populate(&self.store, &self.fields, &mut self.values)?)
    }
}

impl<S, K> Form<S, K> {
    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    pub fn view(&self) -> &FormContainer {
        &self.view
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Take the form apart, e.g. to inspect the store after the host exits.
    pub fn into_parts(self) -> (FieldList, FieldValues, S, K) {
        (self.fields, self.values, self.store, self.sink)
    }
}

impl<S: KeyValueStore, K: SubmissionSink> FormHandlers for Form<S, K> {
    fn on_input(&mut self, field_id: &str, value: FieldValue) -> Result<(), FormError> {
        let descriptor = self
            .fields
            .find(field_id)
            .filter(|descriptor| !descriptor.is_group())
            .ok_or_else(|| FormError::UnknownField(field_id.to_string()))?;

        let fits = match (&descriptor.field_type, &value) {
            (FieldType::Checkbox, FieldValue::Flag(_)) => true,
            (FieldType::Checkbox, FieldValue::Text(_)) => false,
            (_, FieldValue::Text(_)) => true,
            (_, FieldValue::Flag(_)) => false,
        };
        if !fits {
            return Err(FormError::ValueMismatch {
                id: field_id.to_string(),
                field_type: descriptor.field_type.clone(),
                actual: value.type_name(),
            });
        }

        if descriptor.field_type == FieldType::Select
            && let FieldValue::Text(text) = &value
            && !descriptor.options().contains(text)
        {
            return Err(FormError::UnknownOption {
                id: field_id.to_string(),
                value: text.clone(),
            });
        }

        if let Some(container) = self.view.field_mut(field_id) {
            container.dispatch_input(&value);
        }
        self.values.set(field_id, value);

        let owner = self
            .fields
            .owner_of(field_id)
            .ok_or_else(|| FormError::UnknownField(field_id.to_string()))?;
        persist::persist(&mut self.store, owner, &self.values)?;
        Ok(())
    }

    fn on_submit(&mut self, event: &mut SubmitEvent) -> Result<SubmitOutcome, FormError> {
        crate::validate_and_submit(
            event,
            &self.fields,
            &mut self.view,
            &self.values,
            &mut self.sink,
        )
        .map_err(FormError::sink)
    }

    fn on_reset(&mut self) -> Result<(), FormError> {
        persist::clear_all(&mut self.store, &self.fields)?;
        self.values.reset_to_defaults(&self.fields);
        self.view.clear_all_errors();
        tracing::info!("form reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dynform_types::FieldDescriptor;

    use super::*;
    use crate::{MemoryStore, RecordingSink};

    fn form() -> Form<MemoryStore, RecordingSink> {
        let fields = FieldList::new(vec![
            FieldDescriptor::new("name", "text", "Name").with_required(true),
            FieldDescriptor::new("plan", "select", "Plan").with_options(["Basic", "Pro"]),
            FieldDescriptor::new("news", "checkbox", "Newsletter"),
            FieldDescriptor::group(
                "address",
                "Address",
                vec![FieldDescriptor::new("city", "text", "City")],
            ),
        ])
        .unwrap();
        Form::build(fields, MemoryStore::new(), RecordingSink::new()).unwrap()
    }

    #[test]
    fn input_updates_model_view_and_store() {
        let mut form = form();

        form.on_input("name", FieldValue::from("")).unwrap();
        assert_eq!(
            form.view().field("name").unwrap().error_message(),
            Some("Name is required")
        );

        form.on_input("name", FieldValue::from("Alice")).unwrap();
        assert!(!form.view().field("name").unwrap().has_error());
        assert_eq!(form.values().text("name"), "Alice");
        assert_eq!(form.store().get("name").unwrap().as_deref(), Some("Alice"));
    }

    #[test]
    fn nested_input_persists_the_group() {
        let mut form = form();
        form.on_input("city", FieldValue::from("Oslo")).unwrap();

        assert_eq!(
            form.store().get("address").unwrap().as_deref(),
            Some(r#"{"city":"Oslo"}"#)
        );
        assert!(form.store().get("city").unwrap().is_none());
    }

    #[test]
    fn rejects_unknown_fields_and_wrong_values() {
        let mut form = form();

        assert!(matches!(
            form.on_input("nope", FieldValue::from("x")),
            Err(FormError::UnknownField(_))
        ));
        assert!(matches!(
            form.on_input("address", FieldValue::from("x")),
            Err(FormError::UnknownField(_))
        ));
        assert!(matches!(
            form.on_input("news", FieldValue::from("yes")),
            Err(FormError::ValueMismatch { .. })
        ));
    }

    #[test]
    fn select_only_takes_its_options() {
        let mut form = form();

        form.on_input("plan", FieldValue::from("Pro")).unwrap();
        assert_eq!(form.values().text("plan"), "Pro");

        assert!(matches!(
            form.on_input("plan", FieldValue::from("Platinum")),
            Err(FormError::UnknownOption { id, value }) if id == "plan" && value == "Platinum"
        ));
        assert_eq!(form.values().text("plan"), "Pro");
        assert_eq!(form.store().get("plan").unwrap().as_deref(), Some("Pro"));
    }

    #[test]
    fn reset_restores_defaults_and_clears_store() {
        let mut form = form();
        form.on_input("name", FieldValue::from("Alice")).unwrap();
        form.on_input("news", FieldValue::Flag(true)).unwrap();
        form.on_submit(&mut SubmitEvent::new()).unwrap();

        form.on_reset().unwrap();

        assert_eq!(form.values().text("name"), "");
        assert!(!form.values().flag("news"));
        assert!(form.store().is_empty());
        assert!(form.view().fields().iter().all(|f| !f.has_error()));
    }
}
