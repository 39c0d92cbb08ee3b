//! Validation engine run when the form is submitted.

use dynform_types::{
    FieldDescriptor, FieldList, FieldValue, FieldValues, Submission, SubmissionSink,
};

use crate::render::range_message;
use crate::{FormContainer, clear_error, show_error};

/// A submit event as dispatched by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the host's own submission handling.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A validation failure of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field_id: String,
    pub message: String,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every field passed; the collected values went to the sink.
    Submitted(Submission),

    /// At least one field failed; nothing was handed to the sink.
    Rejected(Vec<FieldError>),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }

    /// The field errors of a rejected submit (empty when submitted).
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Submitted(_) => &[],
            Self::Rejected(errors) => errors,
        }
    }

    pub fn submission(&self) -> Option<&Submission> {
        match self {
            Self::Submitted(submission) => Some(submission),
            Self::Rejected(_) => None,
        }
    }
}

/// Check one value against its descriptor's rules.
///
/// Rules are checked in order and the first failure wins: required, pattern,
/// min, max. Pattern and bounds are not checked on empty values, and bounds
/// are not checked on values that are not numbers.
pub fn check_field(descriptor: &FieldDescriptor, value: &FieldValue) -> Option<String> {
    let label = &descriptor.label;

    if descriptor.required && value.is_empty() {
        return Some(format!("{label} is required."));
    }

    let text = value.as_text().filter(|text| !text.is_empty())?;

    if let Some(pattern) = descriptor.pattern()
        && !pattern.is_match(text)
    {
        return Some(format!("Please match the requested format for {label}."));
    }

    let number = text.trim().parse::<f64>().ok()?;
    range_message(label, number, descriptor.min(), descriptor.max())
}

fn current_value(descriptor: &FieldDescriptor, values: &FieldValues) -> FieldValue {
    values
        .get(&descriptor.id)
        .cloned()
        .or_else(|| FieldValues::default_for(descriptor))
        .unwrap_or_else(|| FieldValue::Text(String::new()))
}

/// Collect every value-carrying field into a flat submission.
pub fn collect_submission(fields: &FieldList, values: &FieldValues) -> Submission {
    let mut submission = Submission::new();
    for descriptor in fields.leaves() {
        submission.insert(descriptor.id.clone(), current_value(descriptor, values));
    }
    submission
}

/// Validate every field and, if all pass, hand the collected values to
/// `sink`.
///
/// The event's default action is always prevented first. Each failing field
/// shows its message inline; each passing field has its error cleared.
/// Fields without a rendered container are skipped.
pub fn validate_and_submit<K: SubmissionSink + ?Sized>(
    event: &mut SubmitEvent,
    fields: &FieldList,
    form: &mut FormContainer,
    values: &FieldValues,
    sink: &mut K,
) -> Result<SubmitOutcome, K::Error> {
    event.prevent_default();
    let mut errors = Vec::new();

    for descriptor in fields.leaves() {
        let Some(container) = form.field_mut(&descriptor.id) else {
            continue;
        };

        match check_field(descriptor, &current_value(descriptor, values)) {
            Some(message) => {
                show_error(container, message.clone());
                errors.push(FieldError {
                    field_id: descriptor.id.clone(),
                    message,
                });
            }
            None => clear_error(container),
        }
    }

    if !errors.is_empty() {
        tracing::info!(errors = errors.len(), "submission rejected");
        return Ok(SubmitOutcome::Rejected(errors));
    }

    let submission = collect_submission(fields, values);
    sink.submit(&submission)?;
    tracing::info!(fields = submission.len(), "form submitted");
    Ok(SubmitOutcome::Submitted(submission))
}
