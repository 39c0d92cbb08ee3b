//! Submission sinks.

use std::convert::Infallible;
use std::io::{self, Write};

use dynform_types::{Submission, SubmissionSink};

/// Logs every submission as a JSON object at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    type Error = serde_json::Error;

    fn submit(&mut self, submission: &Submission) -> Result<(), Self::Error> {
        let data = serde_json::to_string(submission)?;
        tracing::info!(%data, "Form submitted");
        Ok(())
    }
}

/// Keeps every submission in memory.
///
/// Useful for tests and for hosts that act on the submission after the
/// form closes.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    submissions: Vec<Submission>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn last(&self) -> Option<&Submission> {
        self.submissions.last()
    }
}

impl SubmissionSink for RecordingSink {
    type Error = Infallible;

    fn submit(&mut self, submission: &Submission) -> Result<(), Self::Error> {
        self.submissions.push(submission.clone());
        Ok(())
    }
}

/// Writes one JSON line per submission.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SubmissionSink for JsonLinesSink<W> {
    type Error = io::Error;

    fn submit(&mut self, submission: &Submission) -> Result<(), Self::Error> {
        serde_json::to_writer(&mut self.writer, submission)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lines_sink_writes_one_line_each() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let mut submission = Submission::new();
        submission.insert("age", "30");

        sink.submit(&submission).unwrap();
        sink.submit(&submission).unwrap();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "{\"age\":\"30\"}\n{\"age\":\"30\"}\n");
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        let mut first = Submission::new();
        first.insert("n", "1");
        let mut second = Submission::new();
        second.insert("n", "2");

        sink.submit(&first).unwrap();
        sink.submit(&second).unwrap();

        assert_eq!(sink.submissions().len(), 2);
        assert_eq!(sink.last(), Some(&second));
    }
}
