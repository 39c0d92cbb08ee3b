//! Field renderer: turns field descriptors into field containers.
//!
//! A [`FieldContainer`] is the host-agnostic equivalent of a labelled form
//! control: label, control, at most one inline error message, a border state,
//! and the live listeners that run on every input event.

use dynform_types::{FieldDescriptor, FieldList, FieldType, FieldValue, Pattern};

use crate::{RenderError, clear_error, show_error};

/// Id of the form container every field is appended to.
pub const FORM_ID: &str = "form-container";

/// Class of the inline error message inside a field container.
pub const ERROR_MESSAGE_CLASS: &str = "error-message";

/// Class of the message appended for unrecognised field types.
pub const TYPE_ERROR_CLASS: &str = "input-type-error-message";

/// Message shown live while a value does not match its pattern.
pub const PATTERN_MISMATCH_MESSAGE: &str = "Please match the requested format";

/// Border state of a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Border {
    #[default]
    Default,
    Error,
}

/// Input type of a text-entry control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Number,
    Email,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
        }
    }
}

/// Label associated with a control.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Id of the control this label is for.
    pub html_for: String,
    /// Display text, `"<label>:"`.
    pub text: String,
}

/// The interactive part of a field container.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Single-line entry for text, number and email fields.
    TextEntry {
        input_type: InputType,
        required: bool,
        placeholder: String,
        default_value: Option<String>,
        pattern: Option<Pattern>,
        min: Option<f64>,
        max: Option<f64>,
    },

    /// Choice from a list; each option's value equals its display text.
    Choice { required: bool, options: Vec<String> },

    /// Boolean toggle.
    Toggle { required: bool, default_checked: bool },

    /// Fieldset holding the containers of nested fields.
    Group {
        legend: String,
        fields: Vec<FieldContainer>,
    },
}

/// A live check attached to a control, run on every input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Listener {
    /// Required and empty shows `"<label> is required"`.
    RequiredCheck { label: String },

    /// Non-empty text that does not match shows the pattern message.
    PatternCheck { pattern: Pattern },

    /// Numeric text outside the bounds shows the range message.
    RangeCheck {
        label: String,
        min: Option<f64>,
        max: Option<f64>,
    },

    /// Any change clears an existing error (select fields).
    ClearOnChange,
}

impl Listener {
    /// Check a new value, returning the message to show if it fails.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        match self {
            Self::RequiredCheck { label } => value
                .is_empty()
                .then(|| format!("{label} is required")),
            Self::PatternCheck { pattern } => match value.as_text() {
                Some(text) if !text.is_empty() && !pattern.is_match(text) => {
                    Some(PATTERN_MISMATCH_MESSAGE.to_string())
                }
                _ => None,
            },
            Self::RangeCheck { label, min, max } => {
                let number = value.as_text()?.trim().parse::<f64>().ok()?;
                range_message(label, number, *min, *max)
            }
            Self::ClearOnChange => None,
        }
    }
}

/// The bound message for `number`, if it lies outside `min..=max`.
pub(crate) fn range_message(
    label: &str,
    number: f64,
    min: Option<f64>,
    max: Option<f64>,
) -> Option<String> {
    if let Some(min) = min
        && number < min
    {
        Some(format!("{label} should be at least {min}."))
    } else if let Some(max) = max
        && number > max
    {
        Some(format!("{label} should be at most {max}."))
    } else {
        None
    }
}

/// One rendered field: label, control, inline error and live listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldContainer {
    pub id: String,
    pub label: Label,
    pub control: Control,
    pub listeners: Vec<Listener>,
    pub(crate) error: Option<String>,
    pub(crate) border: Border,
}

impl FieldContainer {
    /// The inline error message, if one is shown.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn border(&self) -> Border {
        self.border
    }

    /// Containers of nested fields (empty unless this is a group).
    pub fn nested(&self) -> &[FieldContainer] {
        match &self.control {
            Control::Group { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Find this container or a nested one by id.
    pub fn find(&self, id: &str) -> Option<&FieldContainer> {
        if self.id == id {
            return Some(self);
        }
        self.nested().iter().find(|nested| nested.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut FieldContainer> {
        if self.id == id {
            return Some(self);
        }
        match &mut self.control {
            Control::Group { fields, .. } => fields.iter_mut().find(|nested| nested.id == id),
            _ => None,
        }
    }

    /// Run the live listeners for a new value.
    ///
    /// The first failing listener's message is shown; if every listener
    /// passes, any existing error is cleared. Containers without listeners
    /// are left alone.
    pub fn dispatch_input(&mut self, value: &FieldValue) {
        if self.listeners.is_empty() {
            return;
        }
        match self.listeners.iter().find_map(|listener| listener.check(value)) {
            Some(message) => show_error(self, message),
            None => clear_error(self),
        }
    }

    /// Clear this container's error and those of nested containers.
    pub fn clear_all_errors(&mut self) {
        clear_error(self);
        if let Control::Group { fields, .. } = &mut self.control {
            fields.iter_mut().for_each(clear_error);
        }
    }
}

/// A standalone message element appended to the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub class: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Submit,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub kind: ButtonKind,
    pub text: String,
}

/// The form: field containers in order, standalone notices and buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct FormContainer {
    id: String,
    fields: Vec<FieldContainer>,
    notices: Vec<Notice>,
    buttons: Vec<Button>,
}

impl Default for FormContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl FormContainer {
    /// Create an empty form container.
    pub fn new() -> Self {
        Self {
            id: FORM_ID.to_string(),
            fields: Vec::new(),
            notices: Vec::new(),
            buttons: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn append(&mut self, field: FieldContainer) {
        self.fields.push(field);
    }

    pub fn append_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Append the Submit and Reset buttons.
    pub fn add_buttons(&mut self) {
        self.buttons.push(Button {
            kind: ButtonKind::Submit,
            text: "Submit".to_string(),
        });
        self.buttons.push(Button {
            kind: ButtonKind::Reset,
            text: "Reset".to_string(),
        });
    }

    pub fn fields(&self) -> &[FieldContainer] {
        &self.fields
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Find a field container by id at any nesting level.
    pub fn field(&self, id: &str) -> Option<&FieldContainer> {
        self.fields.iter().find_map(|field| field.find(id))
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FieldContainer> {
        self.fields.iter_mut().find_map(|field| field.find_mut(id))
    }

    /// Remove every inline error.
    pub fn clear_all_errors(&mut self) {
        self.fields
            .iter_mut()
            .for_each(FieldContainer::clear_all_errors);
    }
}

/// Render one field descriptor into a labelled container.
///
/// For an unrecognised type no control can be built: a
/// `Not expected input type: <type>` notice is appended to `form` and the
/// call fails with [`RenderError::UnexpectedType`].
pub fn render_field(
    descriptor: &FieldDescriptor,
    form: &mut FormContainer,
) -> Result<FieldContainer, RenderError> {
    let FieldDescriptor {
        id,
        field_type,
        label,
        required,
        ..
    } = descriptor;
    let required = *required;
    let mut listeners = Vec::new();

    let control = match field_type {
        FieldType::Text | FieldType::Number | FieldType::Email => {
            if required {
                listeners.push(Listener::RequiredCheck {
                    label: label.clone(),
                });
            }
            if let Some(pattern) = descriptor.pattern() {
                listeners.push(Listener::PatternCheck {
                    pattern: pattern.clone(),
                });
            }
            if descriptor.min().is_some() || descriptor.max().is_some() {
                listeners.push(Listener::RangeCheck {
                    label: label.clone(),
                    min: descriptor.min(),
                    max: descriptor.max(),
                });
            }

            Control::TextEntry {
                input_type: match field_type {
                    FieldType::Number => InputType::Number,
                    FieldType::Email => InputType::Email,
                    _ => InputType::Text,
                },
                required,
                placeholder: label.clone(),
                default_value: descriptor.default_value.as_ref().map(|d| d.to_text()),
                pattern: descriptor.pattern().cloned(),
                min: descriptor.min(),
                max: descriptor.max(),
            }
        }

        FieldType::Select => {
            listeners.push(Listener::ClearOnChange);
            Control::Choice {
                required,
                options: descriptor.options().to_vec(),
            }
        }

        FieldType::Checkbox => Control::Toggle {
            required,
            default_checked: descriptor
                .default_value
                .as_ref()
                .and_then(|d| d.as_flag())
                .unwrap_or(false),
        },

        FieldType::Group => {
            let fields = descriptor
                .fields
                .iter()
                .map(|nested| render_field(nested, form))
                .collect::<Result<Vec<_>, _>>()?;
            Control::Group {
                legend: label.clone(),
                fields,
            }
        }

        FieldType::Unrecognized(other) => {
            form.append_notice(Notice {
                class: TYPE_ERROR_CLASS.to_string(),
                text: format!("Not expected input type: {other}"),
            });
            tracing::error!(field = %id, field_type = %other, "cannot render field");
            return Err(RenderError::UnexpectedType {
                id: id.clone(),
                field_type: field_type.clone(),
            });
        }
    };

    Ok(FieldContainer {
        id: id.clone(),
        label: Label {
            html_for: id.clone(),
            text: format!("{label}:"),
        },
        control,
        listeners,
        error: None,
        border: Border::Default,
    })
}

/// Render every field of `fields` into a new form container, followed by the
/// Submit and Reset buttons.
///
/// Stops at the first field that cannot be built.
pub fn render_form(fields: &FieldList) -> Result<FormContainer, RenderError> {
    let mut form = FormContainer::new();
    for descriptor in fields {
        let container = render_field(descriptor, &mut form)?;
        form.append(container);
    }
    form.add_buttons();
    tracing::debug!(fields = fields.len(), "rendered form");
    Ok(form)
}
