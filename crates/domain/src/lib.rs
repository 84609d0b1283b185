//! Taskrate domain - rating values, interaction state and outcomes.
//!
//! This crate has no async runtime and no I/O. The client crate drives the
//! types defined here from its ports and services.

pub mod error;
pub mod ids;
pub mod interaction;
pub mod outcome;
pub mod rating_context;
pub mod value_objects;

pub use error::DomainError;
pub use ids::{TaskId, UserId};
pub use interaction::{InteractionState, SubmitBlocked, SubmitPhase};
pub use outcome::{SubmissionOutcome, SubmitFailure};
pub use rating_context::RatingContext;
pub use value_objects::{DialogMode, Notice, NoticeSeverity, Perspective, StarRating};
