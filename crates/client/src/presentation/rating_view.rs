//! Rating dialog view model
//!
//! Turns a [`RatingContext`] and an [`InteractionSnapshot`] into everything
//! a UI shell needs to draw the dialog: texts, star cells and button states.
//! Perspective only changes wording and star colour here; it never reaches
//! the dialog's validation or submission logic.

use serde::Serialize;
use taskrate_domain::{Perspective, RatingContext, StarRating};

use crate::application::services::{InteractionSnapshot, RatingDialog};

const ENFORCEMENT_NOTE: &str = "Rating is required to complete this task";
const SUBMIT_LABEL: &str = "Submit Rating";
const CANCEL_LABEL: &str = "Cancel";

/// Colour treatment of a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StarTone {
    /// Filled star when a doer rates the task creator
    Gold,
    /// Filled star when the task creator rates the doer
    Green,
    Empty,
}

impl StarTone {
    fn filled_for(perspective: Perspective) -> Self {
        match perspective {
            Perspective::DoerRatingCreator => Self::Gold,
            Perspective::CreatorRatingDoer => Self::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarCell {
    pub value: u8,
    pub filled: bool,
    pub tone: StarTone,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub label: &'static str,
    pub visible: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingDialogView {
    pub open: bool,
    pub title: String,
    pub description: String,
    pub enforcement_note: Option<&'static str>,
    pub stars: Vec<StarCell>,
    pub caption: String,
    pub cancel: ButtonView,
    pub submit: ButtonView,
}

impl RatingDialogView {
    pub fn build(context: &RatingContext, snapshot: &InteractionSnapshot) -> Self {
        let submitting = snapshot.is_submitting();
        let shown = snapshot.display_value();
        let filled_tone = StarTone::filled_for(context.perspective);

        let stars = StarRating::all()
            .map(|rating| {
                let filled = rating.get() <= shown;
                StarCell {
                    value: rating.get(),
                    filled,
                    tone: if filled { filled_tone } else { StarTone::Empty },
                    enabled: !submitting,
                }
            })
            .collect();

        Self {
            open: snapshot.is_open,
            title: format!("Rate {}", context.subject_label),
            description: format!(
                "Please rate {} for task \"{}\"",
                context.perspective.rated_party(),
                context.context_label
            ),
            enforcement_note: context.mode.is_enforced().then_some(ENFORCEMENT_NOTE),
            stars,
            caption: caption(snapshot.selected_value()),
            cancel: ButtonView {
                label: CANCEL_LABEL,
                visible: context.mode.allows_dismissal(),
                enabled: !submitting,
            },
            submit: ButtonView {
                label: SUBMIT_LABEL,
                visible: true,
                enabled: snapshot.can_submit(),
            },
        }
    }

    /// View of a live dialog's current state.
    pub fn for_dialog(dialog: &RatingDialog) -> Self {
        Self::build(dialog.context(), &dialog.snapshot())
    }

    /// Single-line star strip, e.g. `★★★☆☆`.
    pub fn star_strip(&self) -> String {
        self.stars
            .iter()
            .map(|cell| if cell.filled { '★' } else { '☆' })
            .collect()
    }
}

fn caption(selected: u8) -> String {
    match selected {
        0 => "Click to rate".to_string(),
        1 => "You've selected 1 star".to_string(),
        n => format!("You've selected {n} stars"),
    }
}
