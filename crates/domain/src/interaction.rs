//! Interaction state for one rating dialog instance
//!
//! `InteractionState` is the volatile state the dialog owns between open
//! and close: the selected rating, the hover preview and whether a
//! submission is in flight. It is created fresh for every instance and is
//! never persisted.
//!
//! ## State machine
//!
//! ```text
//! Idle --begin_submit (rating selected)--> Submitting
//! Submitting --finish_submit-----------> Idle
//! Idle --begin_submit (nothing selected)-> Idle   (NothingSelected)
//! Submitting --begin_submit-------------> Submitting (AlreadySubmitting)
//! ```

use serde::{Deserialize, Serialize};

use crate::StarRating;

/// Submission phase of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// Why a submit request did not start a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// No star has been selected yet
    NothingSelected,
    /// A submission is already in flight
    AlreadySubmitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InteractionState {
    selected: Option<StarRating>,
    hovered: Option<StarRating>,
    phase: SubmitPhase,
}

impl InteractionState {
    /// Fresh state: nothing selected, nothing hovered, idle.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<StarRating> {
        self.selected
    }

    pub fn hovered(&self) -> Option<StarRating> {
        self.hovered
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Selected rating as 0..=5, where 0 means nothing selected.
    pub fn selected_value(&self) -> u8 {
        StarRating::value_or_zero(self.selected)
    }

    /// Hovered rating as 0..=5, where 0 means nothing hovered.
    pub fn hovered_value(&self) -> u8 {
        StarRating::value_or_zero(self.hovered)
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    /// Value the picker should display: the hover preview wins over the
    /// selection.
    pub fn display_value(&self) -> u8 {
        StarRating::value_or_zero(self.hovered.or(self.selected))
    }

    pub fn select(&mut self, rating: StarRating) {
        self.selected = Some(rating);
    }

    pub fn preview(&mut self, rating: StarRating) {
        self.hovered = Some(rating);
    }

    pub fn clear_preview(&mut self) {
        self.hovered = None;
    }

    /// Enter `Submitting` and return the rating to submit.
    ///
    /// The in-flight check runs first so a repeated trigger during a
    /// submission is always reported as `AlreadySubmitting`.
    pub fn begin_submit(&mut self) -> Result<StarRating, SubmitBlocked> {
        if self.is_submitting() {
            return Err(SubmitBlocked::AlreadySubmitting);
        }
        let rating = self.selected.ok_or(SubmitBlocked::NothingSelected)?;
        self.phase = SubmitPhase::Submitting;
        Ok(rating)
    }

    /// Return to `Idle`. Selection and preview are left untouched.
    pub fn finish_submit(&mut self) {
        self.phase = SubmitPhase::Idle;
    }
}
