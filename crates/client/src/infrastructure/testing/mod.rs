//! Test doubles for the outbound ports
//!
//! Available under `cfg(test)` or with the `testing` feature. The generated
//! `Mock*` types cover call expectations; the recorders here are for tests
//! that assert on the full sequence of notices and events.

mod fixtures;

pub use fixtures::{GatedSubmitPort, PanickingSubmitPort, RecordingEvents, RecordingNotifier};
