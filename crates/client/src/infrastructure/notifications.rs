//! Notification adapters
//!
//! - [`TracingNotifier`] writes notices to the log
//! - [`ChannelNotifier`] forwards notices to a UI task over an unbounded channel
//! - [`FanoutNotifier`] delivers each notice to several notifiers

use std::sync::Arc;

use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use taskrate_domain::{Notice, NoticeSeverity};

use crate::ports::outbound::NotificationPort;

#[derive(Clone, Default)]
pub struct TracingNotifier;

impl NotificationPort for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            NoticeSeverity::Info => {
                tracing::info!(title = %notice.title, "{}", notice.description)
            }
            NoticeSeverity::Error => {
                tracing::warn!(title = %notice.title, "{}", notice.description)
            }
        }
    }
}

/// Sends notices into a channel. A closed receiver is logged, never an error.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<Notice>) -> Self {
        Self { tx }
    }

    /// Create a notifier together with the receiving end.
    pub fn channel() -> (Self, UnboundedReceiver<Notice>) {
        let (tx, rx) = unbounded();
        (Self::new(tx), rx)
    }
}

impl NotificationPort for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if let Err(e) = self.tx.unbounded_send(notice) {
            tracing::debug!(error = %e, "Dropping notice: receiver gone");
        }
    }
}

#[derive(Clone, Default)]
pub struct FanoutNotifier {
    targets: Vec<Arc<dyn NotificationPort>>,
}

impl FanoutNotifier {
    pub fn new(targets: Vec<Arc<dyn NotificationPort>>) -> Self {
        Self { targets }
    }
}

impl NotificationPort for FanoutNotifier {
    fn notify(&self, notice: Notice) {
        for target in &self.targets {
            target.notify(notice.clone());
        }
    }
}
