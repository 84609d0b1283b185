//! Outbound ports - Interfaces for external services
//!
//! The rating dialog depends on three collaborators it does not own: the
//! backend that records ratings, the notification surface, and whoever
//! listens for the dialog closing. Adapters in `infrastructure` implement
//! these traits; tests use the generated `Mock*` types.

pub mod dialog_events_port;
pub mod notification_port;
pub mod rating_submit_port;

pub use dialog_events_port::{CloseReason, DialogEventsPort};
pub use notification_port::NotificationPort;
pub use rating_submit_port::{RatingSubmitPort, SubmitError};

#[cfg(any(test, feature = "testing"))]
pub use dialog_events_port::MockDialogEventsPort;
#[cfg(any(test, feature = "testing"))]
pub use notification_port::MockNotificationPort;
#[cfg(any(test, feature = "testing"))]
pub use rating_submit_port::MockRatingSubmitPort;
