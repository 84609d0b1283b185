//! Submission outcomes
//!
//! The submission backend answers in one of three ways: it accepts the
//! rating, it declines it (a well-formed business rejection such as a
//! duplicate rating), or it fails abnormally. Rejections and failures look
//! the same to the user; only failures carry diagnostic detail, and that
//! detail is meant for logs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Diagnostic detail for an abnormal submission failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitFailure {
    message: String,
}

impl SubmitFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// The backend resolved `true`
    Accepted,
    /// The backend resolved `false`
    Rejected,
    /// The backend raised or terminated abnormally
    Failed(SubmitFailure),
}

impl SubmissionOutcome {
    /// Map the backend's boolean answer.
    pub fn from_accepted(accepted: bool) -> Self {
        if accepted {
            Self::Accepted
        } else {
            Self::Rejected
        }
    }
}
