//! Submission delivery for finished wizard payloads

mod json_file;
mod traits;

pub use json_file::JsonFileSink;
pub use traits::{Receipt, SinkError, SubmissionSink};

#[cfg(test)]
pub use traits::MockSubmissionSink;
