//! Taskrate client - the rating dialog and its adapters.
//!
//! - `ports`: traits for the collaborators the dialog does not own
//! - `application`: the `RatingDialog` controller and its factory
//! - `presentation`: view model for UI shells
//! - `infrastructure`: notifier, event and fake backend adapters
//! - `config` / `runner`: environment configuration and the console runner

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod presentation;
pub mod runner;

pub use application::services::{
    CloseDecision, InteractionSnapshot, RatingDialog, RatingDialogPorts, RatingDialogService,
    SubmitResult,
};
pub use config::{ClientConfig, ConfigError};
pub use presentation::RatingDialogView;
