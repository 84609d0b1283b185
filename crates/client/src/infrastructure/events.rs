//! Dialog lifecycle adapters
//!
//! Closure is already logged by the dialog; this adapter only hands the
//! event to the host.

use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

use crate::ports::outbound::{CloseReason, DialogEventsPort};

/// Forwards close events to the host's event loop.
#[derive(Clone)]
pub struct ChannelDialogEvents {
    tx: UnboundedSender<CloseReason>,
}

impl ChannelDialogEvents {
    pub fn channel() -> (Self, UnboundedReceiver<CloseReason>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl DialogEventsPort for ChannelDialogEvents {
    fn on_closed(&self, reason: CloseReason) {
        if let Err(e) = self.tx.unbounded_send(reason) {
            tracing::debug!(error = %e, "Dropping close event: receiver gone");
        }
    }
}
