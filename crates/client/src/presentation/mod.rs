//! Presentation view models for UI shells.

pub mod rating_view;

pub use rating_view::{ButtonView, RatingDialogView, StarCell, StarTone};
