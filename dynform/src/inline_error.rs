//! Showing and clearing the inline error of a field container.

use crate::{Border, FieldContainer};

/// Show `message` as the container's inline error and switch its border to
/// the error state.
///
/// A container holds at most one error message; showing another one
/// replaces the text.
pub fn show_error(field: &mut FieldContainer, message: impl Into<String>) {
    field.error = Some(message.into());
    field.border = Border::Error;
}

/// Remove the container's inline error, if any, and reset its border.
pub fn clear_error(field: &mut FieldContainer) {
    field.error = None;
    field.border = Border::Default;
}

#[cfg(test)]
mod tests {
    use dynform_types::FieldDescriptor;

    use super::*;
    use crate::{FormContainer, render_field};

    fn name_field() -> FieldContainer {
        let name = FieldDescriptor::new("name", "text", "Name");
        render_field(&name, &mut FormContainer::new()).unwrap()
    }

    #[test]
    fn showing_twice_replaces_text() {
        let mut field = name_field();
        show_error(&mut field, "first");
        show_error(&mut field, "second");

        assert_eq!(field.error_message(), Some("second"));
        assert_eq!(field.border(), Border::Error);
    }

    #[test]
    fn clearing_is_idempotent() {
        let mut field = name_field();
        show_error(&mut field, "Name is required.");

        clear_error(&mut field);
        clear_error(&mut field);

        assert_eq!(field.error_message(), None);
        assert_eq!(field.border(), Border::Default);
    }
}
