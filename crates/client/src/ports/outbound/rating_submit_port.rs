//! Rating Submit Port - the only way a rating leaves the dialog
//!
//! Implementations talk to whatever backend records ratings. The dialog
//! reads the answer as follows:
//! - `Ok(true)`: rating accepted
//! - `Ok(false)`: rating declined by a business rule (e.g. already rated)
//! - `Err(_)`: transport or infrastructure failure

use async_trait::async_trait;
use taskrate_domain::{StarRating, TaskId, UserId};

/// Errors raised by a rating backend when it cannot give an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The request never reached the backend or the connection dropped.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with an unexpected status.
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The submission future terminated abnormally (e.g. panicked).
    #[error("Submission aborted: {0}")]
    Aborted(String),
}

impl SubmitError {
    pub fn transport(message: impl ToString) -> Self {
        Self::Transport(message.to_string())
    }

    pub fn backend(status: u16, message: impl ToString) -> Self {
        Self::Backend {
            status,
            message: message.to_string(),
        }
    }
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RatingSubmitPort: Send + Sync {
    /// Submit `rating` for `partner_id` on `task_id`.
    async fn submit(
        &self,
        task_id: TaskId,
        partner_id: UserId,
        rating: StarRating,
    ) -> Result<bool, SubmitError>;
}
