//! Per-instance inputs of a rating dialog
//!
//! The caller owns these values; the dialog only reads them.

use serde::{Deserialize, Serialize};

use crate::{DialogMode, Perspective, TaskId, UserId};

/// Identifying context and display labels for one rating interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingContext {
    pub task_id: TaskId,
    /// The user being rated
    pub partner_id: UserId,
    pub mode: DialogMode,
    /// Display name of the user being rated
    pub subject_label: String,
    /// Title of the task the rating concerns
    pub context_label: String,
    pub perspective: Perspective,
}

impl RatingContext {
    pub fn new(
        task_id: TaskId,
        partner_id: UserId,
        subject_label: impl Into<String>,
        context_label: impl Into<String>,
        perspective: Perspective,
    ) -> Self {
        Self {
            task_id,
            partner_id,
            mode: DialogMode::default(),
            subject_label: subject_label.into(),
            context_label: context_label.into(),
            perspective,
        }
    }

    pub fn with_mode(mut self, mode: DialogMode) -> Self {
        self.mode = mode;
        self
    }
}
