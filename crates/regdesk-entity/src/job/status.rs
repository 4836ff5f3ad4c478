//! AI job status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an AI job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ai_job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AiJobStatus {
    /// Waiting to be picked up by the runner.
    Pending,
    /// Currently being processed.
    Processing,
    /// Finished with a result.
    Completed,
    /// Finished with an error.
    Failed,
    /// Cancelled on request.
    Cancelled,
}

impl AiJobStatus {
    /// Statuses after which the runner never touches the job again.
    pub const TERMINAL: [AiJobStatus; 3] = [Self::Completed, Self::Failed, Self::Cancelled];

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        Self::TERMINAL.contains(self)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AiJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_set() {
        assert!(AiJobStatus::Completed.is_terminal());
        assert!(AiJobStatus::Failed.is_terminal());
        assert!(AiJobStatus::Cancelled.is_terminal());
        assert!(!AiJobStatus::Pending.is_terminal());
        assert!(!AiJobStatus::Processing.is_terminal());
    }
}
