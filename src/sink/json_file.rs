//! Submission sink writing one JSON document per payload

use super::traits::{Receipt, SinkError, SubmissionSink};
use crate::state::{FormState, Submission};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// On-disk shape of a delivered submission
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    id: Uuid,
    flow: &'a str,
    submitted_at: DateTime<Utc>,
    data: &'a FormState,
}

/// Writes `<dir>/<flow>-<id>.json`
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[cfg(test)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> SinkError {
        SinkError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl SubmissionSink for JsonFileSink {
    async fn deliver(&self, submission: &Submission) -> Result<Receipt, SinkError> {
        let envelope = Envelope {
            id: Uuid::new_v4(),
            flow: &submission.flow,
            submitted_at: Utc::now(),
            data: &submission.data,
        };
        let content = serde_json::to_vec_pretty(&envelope)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| self.io_error(&self.dir, e))?;
        let path = self
            .dir
            .join(format!("{}-{}.json", submission.flow, envelope.id));
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| self.io_error(&path, e))?;

        tracing::info!(flow = %submission.flow, path = %path.display(), "submission written");
        Ok(Receipt {
            id: envelope.id,
            submitted_at: envelope.submitted_at,
            location: path.display().to_string(),
        })
    }
}
