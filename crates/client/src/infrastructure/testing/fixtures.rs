//! Hand-written port fakes used across unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use taskrate_domain::{Notice, StarRating, TaskId, UserId};
use tokio::sync::Notify;

use crate::ports::outbound::{
    CloseReason, DialogEventsPort, NotificationPort, RatingSubmitPort, SubmitError,
};

/// Records every notice in order.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationPort for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

/// Records every close event in order.
#[derive(Default)]
pub struct RecordingEvents {
    reasons: Mutex<Vec<CloseReason>>,
}

impl RecordingEvents {
    pub fn reasons(&self) -> Vec<CloseReason> {
        self.reasons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DialogEventsPort for RecordingEvents {
    fn on_closed(&self, reason: CloseReason) {
        self.reasons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reason);
    }
}

/// Submit port that suspends until [`GatedSubmitPort::release`] is called.
///
/// Lets a test hold a submission in flight while it pokes at the dialog.
pub struct GatedSubmitPort {
    answer: bool,
    gate: Notify,
    calls: AtomicUsize,
    ratings: Mutex<Vec<StarRating>>,
}

impl GatedSubmitPort {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
            ratings: Mutex::new(Vec::new()),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn ratings(&self) -> Vec<StarRating> {
        self.ratings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RatingSubmitPort for GatedSubmitPort {
    async fn submit(
        &self,
        _task_id: TaskId,
        _partner_id: UserId,
        rating: StarRating,
    ) -> Result<bool, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ratings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(rating);
        self.gate.notified().await;
        Ok(self.answer)
    }
}

/// Submit port whose future panics instead of answering.
pub struct PanickingSubmitPort {
    message: &'static str,
    calls: AtomicUsize,
}

impl PanickingSubmitPort {
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RatingSubmitPort for PanickingSubmitPort {
    async fn submit(
        &self,
        _task_id: TaskId,
        _partner_id: UserId,
        _rating: StarRating,
    ) -> Result<bool, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("{}", self.message);
    }
}
