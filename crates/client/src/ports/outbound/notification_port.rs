//! Notification Port - toast-style side channel for outcome messages
//!
//! Fire-and-forget: the dialog never waits on delivery and never learns
//! whether the notice was shown.

use taskrate_domain::Notice;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait NotificationPort: Send + Sync {
    fn notify(&self, notice: Notice);
}
