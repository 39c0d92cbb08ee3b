use dynform_types::FieldValue;

use crate::{FormError, FormHandlers, SubmitEvent, SubmitOutcome};

/// A host event addressed to a form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A field's value changed (input on text entries, change on choices and toggles).
    Input { field_id: String, value: FieldValue },
    Submit,
    Reset,
}

impl FormEvent {
    pub fn input(field_id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::Input {
            field_id: field_id.into(),
            value: value.into(),
        }
    }
}

/// Route one event to the matching handler.
///
/// Returns the submit outcome for [`FormEvent::Submit`], `None` otherwise.
pub fn dispatch<H: FormHandlers + ?Sized>(
    handlers: &mut H,
    event: FormEvent,
) -> Result<Option<SubmitOutcome>, FormError> {
    match event {
        FormEvent::Input { field_id, value } => {
            handlers.on_input(&field_id, value)?;
            Ok(None)
        }
        FormEvent::Submit => handlers.on_submit(&mut SubmitEvent::new()).map(Some),
        FormEvent::Reset => {
            handlers.on_reset()?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use dynform_types::{FieldDescriptor, FieldList};

    use super::*;
    use crate::{Form, MemoryStore, RecordingSink};

    #[test]
    fn events_reach_their_handlers() {
        let fields = FieldList::new(vec![
            FieldDescriptor::new("name", "text", "Name").with_required(true),
        ])
        .unwrap();
        let mut form = Form::build(fields, MemoryStore::new(), RecordingSink::new()).unwrap();

        let rejected = dispatch(&mut form, FormEvent::Submit).unwrap().unwrap();
        assert!(!rejected.is_submitted());

        assert_eq!(dispatch(&mut form, FormEvent::input("name", "Ada")).unwrap(), None);
        let submitted = dispatch(&mut form, FormEvent::Submit).unwrap().unwrap();
        assert!(submitted.is_submitted());
        assert_eq!(form.sink().submissions().len(), 1);

        assert_eq!(dispatch(&mut form, FormEvent::Reset).unwrap(), None);
        assert_eq!(form.values().text("name"), "");
    }
}
