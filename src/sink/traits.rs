//! Trait abstraction for submission delivery to enable mocking in tests

use crate::state::Submission;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write submission to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize submission: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Acknowledgement of a delivered submission
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    /// Where the payload ended up
    pub location: String,
}

/// Receives finished payloads from the wizard
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Deliver a submission
    async fn deliver(&self, submission: &Submission) -> Result<Receipt, SinkError>;
}
