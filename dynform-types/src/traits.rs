use crate::{StoreError, Submission};

/// A durable string-to-string store, keyed by field id.
///
/// This is the persistence seam: field values are written on every input,
/// read back once when the form is populated, and removed on reset.
pub trait KeyValueStore {
    /// Read the entry stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous entry.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the entry under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Trait for consumers of successful submissions.
///
/// A sink receives the collected values once every field passed validation.
/// What it does with them (log, send, record) is up to the implementation.
pub trait SubmissionSink {
    /// The error type for this sink.
    type Error: Into<anyhow::Error>;

    /// Hand over one submission.
    fn submit(&mut self, submission: &Submission) -> Result<(), Self::Error>;
}

impl<T: SubmissionSink + ?Sized> SubmissionSink for &mut T {
    type Error = T::Error;

    fn submit(&mut self, submission: &Submission) -> Result<(), Self::Error> {
        (**self).submit(submission)
    }
}
