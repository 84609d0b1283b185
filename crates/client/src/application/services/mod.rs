//! Application services.

pub mod rating_dialog;

pub use rating_dialog::{
    CloseDecision, InteractionSnapshot, RatingDialog, RatingDialogPorts, RatingDialogService,
    SubmitResult,
};
