//! Infrastructure adapters implementing the outbound ports.

pub mod events;
pub mod fake_backend;
pub mod notifications;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use events::ChannelDialogEvents;
pub use fake_backend::{FakeOutcome, FakeRatingBackend, ReceivedRating};
pub use notifications::{ChannelNotifier, FanoutNotifier, TracingNotifier};
