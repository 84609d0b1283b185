//! Dialog Events Port - lifecycle events raised by a rating dialog

use serde::{Deserialize, Serialize};

/// Why a dialog instance closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// The rating was accepted by the backend
    Submitted,
    /// The user cancelled or dismissed the dialog
    Dismissed,
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait DialogEventsPort: Send + Sync {
    /// Called exactly once per dialog instance, when it is discarded.
    fn on_closed(&self, reason: CloseReason);
}
