//! User-facing notices emitted by the rating dialog
//!
//! The dialog only ever shows the fixed templates defined here. Raw error
//! detail from the submission backend never reaches a `Notice`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    Info,
    Error,
}

/// A toast-style message: title, description and severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: NoticeSeverity,
}

impl Notice {
    fn new(title: &str, description: &str, severity: NoticeSeverity) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity,
        }
    }

    /// Submit was requested with no star selected.
    pub fn rating_required() -> Self {
        Self::new(
            "Rating Required",
            "Please select a rating before submitting.",
            NoticeSeverity::Error,
        )
    }

    /// The backend accepted the rating.
    pub fn rating_submitted() -> Self {
        Self::new(
            "Rating Submitted",
            "Thank you for your feedback!",
            NoticeSeverity::Info,
        )
    }

    /// Shared by business rejections and infrastructure failures.
    pub fn submission_failed() -> Self {
        Self::new(
            "Error",
            "Failed to submit rating. Please try again.",
            NoticeSeverity::Error,
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == NoticeSeverity::Error
    }
}
