//! Rating Dialog Service - drives one rating interaction from open to close
//!
//! A [`RatingDialog`] owns the volatile [`InteractionState`] of a single
//! dialog instance. It validates submit requests, calls the injected
//! [`RatingSubmitPort`] at most once per request, and turns the answer into
//! notices and lifecycle events.
//!
//! ## Flow
//!
//! 1. The UI forwards picker events (`select_candidate`, `preview_candidate`,
//!    `clear_preview`)
//! 2. `request_submit` checks that a star is selected and that nothing is in
//!    flight, then marks the dialog as submitting
//! 3. The rating is sent through `RatingSubmitPort::submit`
//! 4. Accepted: success notice, then the dialog closes. Rejected or failed:
//!    generic failure notice, the dialog stays open with the selection kept
//!
//! None of these paths return an error to the caller. Everything the user
//! sees goes through the [`NotificationPort`]; closure is reported through
//! the [`DialogEventsPort`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::FutureExt;
use taskrate_domain::{
    DomainError, InteractionState, Notice, RatingContext, StarRating, SubmissionOutcome,
    SubmitBlocked, SubmitFailure,
};

use crate::ports::outbound::{
    CloseReason, DialogEventsPort, NotificationPort, RatingSubmitPort, SubmitError,
};

/// Collaborators shared by every dialog instance.
#[derive(Clone)]
pub struct RatingDialogPorts {
    pub submitter: Arc<dyn RatingSubmitPort>,
    pub notifier: Arc<dyn NotificationPort>,
    pub events: Arc<dyn DialogEventsPort>,
}

impl RatingDialogPorts {
    pub fn new(
        submitter: Arc<dyn RatingSubmitPort>,
        notifier: Arc<dyn NotificationPort>,
        events: Arc<dyn DialogEventsPort>,
    ) -> Self {
        Self {
            submitter,
            notifier,
            events,
        }
    }
}

/// Opens rating dialogs against a fixed set of ports.
#[derive(Clone)]
pub struct RatingDialogService {
    ports: RatingDialogPorts,
}

impl RatingDialogService {
    pub fn new(ports: RatingDialogPorts) -> Self {
        Self { ports }
    }

    /// Open a new dialog instance with fresh interaction state.
    pub fn open(&self, context: RatingContext) -> RatingDialog {
        RatingDialog::open(context, self.ports.clone())
    }
}

/// Result of a submit request, reported for the caller's benefit only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Nothing was selected; "Rating Required" was shown
    ValidationFailed,
    /// A submission was already in flight; the request was dropped
    AlreadySubmitting,
    /// The dialog was already closed; nothing happened
    Closed,
    /// The backend was called and resolved with this outcome
    Completed(SubmissionOutcome),
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Closed,
    /// Enforced mode: only an accepted submission may close the dialog
    Blocked,
    AlreadyClosed,
}

/// Read-only copy of a dialog's state, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionSnapshot {
    pub interaction: InteractionState,
    pub is_open: bool,
}

impl InteractionSnapshot {
    pub fn selected_value(&self) -> u8 {
        self.interaction.selected_value()
    }

    pub fn hovered_value(&self) -> u8 {
        self.interaction.hovered_value()
    }

    pub fn display_value(&self) -> u8 {
        self.interaction.display_value()
    }

    pub fn is_submitting(&self) -> bool {
        self.interaction.is_submitting()
    }

    /// Whether the submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        self.is_open && self.interaction.selected().is_some() && !self.is_submitting()
    }
}

struct DialogState {
    interaction: InteractionState,
    open: bool,
}

impl DialogState {
    /// Mark closed and discard the interaction. False if already closed.
    fn shut(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.interaction = InteractionState::new();
        true
    }
}

/// One rating interaction instance.
pub struct RatingDialog {
    context: RatingContext,
    ports: RatingDialogPorts,
    state: Mutex<DialogState>,
}

impl RatingDialog {
    pub fn open(context: RatingContext, ports: RatingDialogPorts) -> Self {
        tracing::debug!(
            task_id = %context.task_id,
            partner_id = %context.partner_id,
            mode = %context.mode,
            "Rating dialog opened"
        );
        Self {
            context,
            ports,
            state: Mutex::new(DialogState {
                interaction: InteractionState::new(),
                open: true,
            }),
        }
    }

    pub fn context(&self) -> &RatingContext {
        &self.context
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        let state = self.lock_state();
        InteractionSnapshot {
            interaction: state.interaction,
            is_open: state.open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock_state().open
    }

    // =========================================================================
    // Picker events
    // =========================================================================

    pub fn select_candidate(&self, rating: StarRating) {
        if self.update_open(|interaction| interaction.select(rating)) {
            tracing::debug!(task_id = %self.context.task_id, rating = rating.get(), "Rating selected");
        }
    }

    /// Select from a raw star index, rejecting values outside 1..=5.
    pub fn select_value(&self, value: u8) -> Result<(), DomainError> {
        let rating = StarRating::new(value)?;
        self.select_candidate(rating);
        Ok(())
    }

    pub fn preview_candidate(&self, rating: StarRating) {
        self.update_open(|interaction| interaction.preview(rating));
    }

    pub fn clear_preview(&self) {
        self.update_open(InteractionState::clear_preview);
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Validate and submit the selected rating.
    ///
    /// The dialog is back in `Idle` by the time this returns, whatever the
    /// backend did. If the returned future is dropped mid-flight the phase is
    /// reset as well.
    pub async fn request_submit(&self) -> SubmitResult {
        let started = {
            let mut state = self.lock_state();
            if state.open {
                Some(state.interaction.begin_submit())
            } else {
                None
            }
        };

        let rating = match started {
            None => {
                tracing::debug!(task_id = %self.context.task_id, "Submit ignored: dialog closed");
                return SubmitResult::Closed;
            }
            Some(Err(SubmitBlocked::AlreadySubmitting)) => {
                tracing::debug!(
                    task_id = %self.context.task_id,
                    "Submit ignored: submission already in flight"
                );
                return SubmitResult::AlreadySubmitting;
            }
            Some(Err(SubmitBlocked::NothingSelected)) => {
                tracing::warn!(task_id = %self.context.task_id, "Submit rejected: no rating selected");
                self.ports.notifier.notify(Notice::rating_required());
                return SubmitResult::ValidationFailed;
            }
            Some(Ok(rating)) => rating,
        };

        let reset = PhaseReset {
            state: &self.state,
            armed: true,
        };

        tracing::info!(
            task_id = %self.context.task_id,
            partner_id = %self.context.partner_id,
            rating = rating.get(),
            "Submitting rating"
        );
        let outcome = self.dispatch(rating).await;

        match &outcome {
            SubmissionOutcome::Accepted => {
                tracing::info!(task_id = %self.context.task_id, rating = rating.get(), "Rating accepted");
                self.ports.notifier.notify(Notice::rating_submitted());
                if reset.finish_and_close() {
                    self.announce_closed(CloseReason::Submitted);
                }
            }
            SubmissionOutcome::Rejected => {
                tracing::warn!(task_id = %self.context.task_id, rating = rating.get(), "Rating rejected by backend");
                self.ports.notifier.notify(Notice::submission_failed());
            }
            SubmissionOutcome::Failed(failure) => {
                tracing::error!(
                    task_id = %self.context.task_id,
                    rating = rating.get(),
                    error = %failure,
                    "Error submitting rating"
                );
                self.ports.notifier.notify(Notice::submission_failed());
            }
        }

        SubmitResult::Completed(outcome)
    }

    /// Call the backend once and classify its answer. Errors and panics
    /// both become `Failed`.
    async fn dispatch(&self, rating: StarRating) -> SubmissionOutcome {
        let submitter = Arc::clone(&self.ports.submitter);
        let task_id = self.context.task_id;
        let partner_id = self.context.partner_id;

        let attempt = AssertUnwindSafe(async move {
            submitter.submit(task_id, partner_id, rating).await
        })
        .catch_unwind()
        .await;

        match attempt {
            Ok(Ok(accepted)) => SubmissionOutcome::from_accepted(accepted),
            Ok(Err(err)) => SubmissionOutcome::Failed(SubmitFailure::new(err.to_string())),
            Err(payload) => {
                let err = SubmitError::Aborted(panic_message(payload.as_ref()));
                SubmissionOutcome::Failed(SubmitFailure::new(err.to_string()))
            }
        }
    }

    // =========================================================================
    // Closure
    // =========================================================================

    /// Cancel or outside-dismiss. Refused in enforced mode.
    pub fn request_close(&self) -> CloseDecision {
        if !self.is_open() {
            return CloseDecision::AlreadyClosed;
        }
        if !self.context.mode.allows_dismissal() {
            tracing::warn!(task_id = %self.context.task_id, "Close refused: rating is required");
            return CloseDecision::Blocked;
        }
        if self.close(CloseReason::Dismissed) {
            CloseDecision::Closed
        } else {
            CloseDecision::AlreadyClosed
        }
    }

    /// Discard the interaction state and fire `on_closed` if still open.
    fn close(&self, reason: CloseReason) -> bool {
        let closed = self.lock_state().shut();
        if closed {
            self.announce_closed(reason);
        }
        closed
    }

    /// Must be called without the state lock held.
    fn announce_closed(&self, reason: CloseReason) {
        tracing::info!(task_id = %self.context.task_id, reason = ?reason, "Rating dialog closed");
        self.ports.events.on_closed(reason);
    }

    /// Apply `apply` if the dialog is still open. Returns whether it ran.
    fn update_open(&self, apply: impl FnOnce(&mut InteractionState)) -> bool {
        let mut state = self.lock_state();
        if state.open {
            apply(&mut state.interaction);
        }
        state.open
    }

    fn lock_state(&self) -> MutexGuard<'_, DialogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the dialog to `Idle` when dropped.
struct PhaseReset<'a> {
    state: &'a Mutex<DialogState>,
    armed: bool,
}

impl PhaseReset<'_> {
    /// Leave `Submitting` and close under a single lock, so no other caller
    /// can start a submission in between. False if the dialog was already
    /// closed.
    fn finish_and_close(mut self) -> bool {
        self.armed = false;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.interaction.finish_submit();
        state.shut()
    }
}

impl Drop for PhaseReset<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .interaction
                .finish_submit();
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "submission panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{
        GatedSubmitPort, PanickingSubmitPort, RecordingEvents, RecordingNotifier,
    };
    use crate::ports::outbound::{MockDialogEventsPort, MockNotificationPort, MockRatingSubmitPort};
    use taskrate_domain::{DialogMode, Perspective, SubmitPhase, TaskId, UserId};

    fn stars(value: u8) -> StarRating {
        match StarRating::new(value) {
            Ok(rating) => rating,
            Err(e) => panic!("invalid test rating: {e}"),
        }
    }

    fn context(mode: DialogMode) -> RatingContext {
        RatingContext::new(
            TaskId::new(),
            UserId::new(),
            "Ada",
            "Paint the shed",
            Perspective::CreatorRatingDoer,
        )
        .with_mode(mode)
    }

    fn open_dialog(
        mode: DialogMode,
        submitter: Arc<dyn RatingSubmitPort>,
        notifier: Arc<dyn NotificationPort>,
        events: Arc<dyn DialogEventsPort>,
    ) -> RatingDialog {
        RatingDialogService::new(RatingDialogPorts::new(submitter, notifier, events))
            .open(context(mode))
    }

    fn accepting_submitter(expected: StarRating) -> MockRatingSubmitPort {
        let mut submitter = MockRatingSubmitPort::new();
        submitter
            .expect_submit()
            .withf(move |_, _, rating| *rating == expected)
            .times(1)
            .returning(|_, _, _| Ok(true));
        submitter
    }

    #[tokio::test]
    async fn submits_each_selected_value_exactly_once() {
        for value in 1..=5 {
            let rating = stars(value);
            let notifier = Arc::new(RecordingNotifier::default());
            let dialog = open_dialog(
                DialogMode::Dismissible,
                Arc::new(accepting_submitter(rating)),
                notifier.clone(),
                Arc::new(RecordingEvents::default()),
            );

            dialog.select_candidate(rating);
            let result = dialog.request_submit().await;

            assert_eq!(result, SubmitResult::Completed(SubmissionOutcome::Accepted));
        }
    }

    #[tokio::test]
    async fn submit_passes_task_and_partner_through() {
        let ctx = context(DialogMode::Dismissible);
        let (task_id, partner_id) = (ctx.task_id, ctx.partner_id);

        let mut submitter = MockRatingSubmitPort::new();
        submitter
            .expect_submit()
            .withf(move |task, partner, _| *task == task_id && *partner == partner_id)
            .times(1)
            .returning(|_, _, _| Ok(true));

        let dialog = RatingDialog::open(
            ctx,
            RatingDialogPorts::new(
                Arc::new(submitter),
                Arc::new(RecordingNotifier::default()),
                Arc::new(RecordingEvents::default()),
            ),
        );
        dialog.select_candidate(stars(2));
        dialog.request_submit().await;
    }

    #[tokio::test]
    async fn submit_without_selection_never_calls_backend() {
        let mut submitter = MockRatingSubmitPort::new();
        submitter.expect_submit().never();

        let mut notifier = MockNotificationPort::new();
        notifier
            .expect_notify()
            .withf(|notice| *notice == Notice::rating_required())
            .times(1)
            .return_const(());

        let mut events = MockDialogEventsPort::new();
        events.expect_on_closed().never();

        let dialog = open_dialog(
            DialogMode::Dismissible,
            Arc::new(submitter),
            Arc::new(notifier),
            Arc::new(events),
        );

        // Hover does not count as a selection
        dialog.preview_candidate(stars(4));
        let result = dialog.request_submit().await;

        assert_eq!(result, SubmitResult::ValidationFailed);
        assert_eq!(dialog.snapshot().interaction.phase(), SubmitPhase::Idle);
        assert!(dialog.is_open());
    }

    #[tokio::test]
    async fn overlapping_submits_call_backend_once() {
        let submitter = Arc::new(GatedSubmitPort::new(true));
        let notifier = Arc::new(RecordingNotifier::default());
        let events = Arc::new(RecordingEvents::default());
        let dialog = open_dialog(
            DialogMode::Dismissible,
            submitter.clone(),
            notifier.clone(),
            events.clone(),
        );
        dialog.select_candidate(stars(2));

        let first = dialog.request_submit();
        let second = async {
            tokio::task::yield_now().await;
            let result = dialog.request_submit().await;
            assert!(dialog.snapshot().is_submitting());
            submitter.release();
            result
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, SubmitResult::Completed(SubmissionOutcome::Accepted));
        assert_eq!(second, SubmitResult::AlreadySubmitting);
        assert_eq!(submitter.calls(), 1);
        assert_eq!(submitter.ratings(), vec![stars(2)]);
        assert_eq!(notifier.notices(), vec![Notice::rating_submitted()]);
        assert_eq!(events.reasons(), vec![CloseReason::Submitted]);
    }

    #[tokio::test]
    async fn accepted_rating_notifies_and_closes_once() {
        let notifier = Arc::new(RecordingNotifier::default());
        let events = Arc::new(RecordingEvents::default());
        let dialog = open_dialog(
            DialogMode::Dismissible,
            Arc::new(accepting_submitter(stars(4))),
            notifier.clone(),
            events.clone(),
        );

        dialog.select_candidate(stars(4));
        dialog.request_submit().await;

        assert_eq!(notifier.notices(), vec![Notice::rating_submitted()]);
        assert!(notifier.notices().iter().all(|n| !n.is_error()));
        assert_eq!(events.reasons(), vec![CloseReason::Submitted]);
        assert!(!dialog.is_open());
        assert_eq!(dialog.snapshot().interaction.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn rejected_rating_keeps_dialog_open_and_selection() {
        let mut submitter = MockRatingSubmitPort::new();
        submitter
            .expect_submit()
            .times(1)
            .returning(|_, _, _| Ok(false));

        let notifier = Arc::new(RecordingNotifier::default());
        let mut events = MockDialogEventsPort::new();
        events.expect_on_closed().never();

        let dialog = open_dialog(
            DialogMode::Dismissible,
            Arc::new(submitter),
            notifier.clone(),
            Arc::new(events),
        );

        dialog.select_candidate(stars(3));
        let result = dialog.request_submit().await;

        assert_eq!(result, SubmitResult::Completed(SubmissionOutcome::Rejected));
        assert_eq!(notifier.notices(), vec![Notice::submission_failed()]);
        let snapshot = dialog.snapshot();
        assert!(snapshot.is_open);
        assert_eq!(snapshot.selected_value(), 3);
        assert_eq!(snapshot.interaction.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn backend_error_is_shown_as_generic_failure() {
        let mut submitter = MockRatingSubmitPort::new();
        submitter
            .expect_submit()
            .times(1)
            .returning(|_, _, _| Err(SubmitError::backend(503, "database is down")));

        let notifier = Arc::new(RecordingNotifier::default());
        let events = Arc::new(RecordingEvents::default());
        let dialog = open_dialog(
            DialogMode::Enforced,
            Arc::new(submitter),
            notifier.clone(),
            events.clone(),
        );

        dialog.select_candidate(stars(5));
        let result = dialog.request_submit().await;

        match result {
            SubmitResult::Completed(SubmissionOutcome::Failed(failure)) => {
                assert!(failure.message().contains("database is down"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        // Raw detail never reaches the user
        assert_eq!(notifier.notices(), vec![Notice::submission_failed()]);
        assert!(events.reasons().is_empty());
        assert!(dialog.is_open());
        assert_eq!(dialog.snapshot().interaction.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn panicking_backend_does_not_leave_dialog_submitting() {
        let submitter = Arc::new(PanickingSubmitPort::new("socket exploded"));
        let notifier = Arc::new(RecordingNotifier::default());
        let dialog = open_dialog(
            DialogMode::Dismissible,
            submitter.clone(),
            notifier.clone(),
            Arc::new(RecordingEvents::default()),
        );

        dialog.select_candidate(stars(5));
        let result = dialog.request_submit().await;

        match result {
            SubmitResult::Completed(SubmissionOutcome::Failed(failure)) => {
                assert!(failure.message().contains("socket exploded"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(submitter.calls(), 1);
        assert_eq!(notifier.notices(), vec![Notice::submission_failed()]);
        assert!(dialog.is_open());
        assert!(!dialog.snapshot().is_submitting());
    }

    #[tokio::test]
    async fn retry_after_rejection_resubmits_kept_selection() {
        let mut submitter = MockRatingSubmitPort::new();
        let mut seq = mockall::Sequence::new();
        submitter
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(false));
        submitter
            .expect_submit()
            .withf(|_, _, rating| rating.get() == 3)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(true));

        let notifier = Arc::new(RecordingNotifier::default());
        let events = Arc::new(RecordingEvents::default());
        let dialog = open_dialog(
            DialogMode::Enforced,
            Arc::new(submitter),
            notifier.clone(),
            events.clone(),
        );

        dialog.select_candidate(stars(3));
        dialog.request_submit().await;
        dialog.request_submit().await;

        assert_eq!(
            notifier.notices(),
            vec![Notice::submission_failed(), Notice::rating_submitted()]
        );
        assert_eq!(events.reasons(), vec![CloseReason::Submitted]);
    }

    #[tokio::test]
    async fn enforced_close_is_blocked_until_accepted() {
        let events = Arc::new(RecordingEvents::default());
        let dialog = open_dialog(
            DialogMode::Enforced,
            Arc::new(accepting_submitter(stars(1))),
            Arc::new(RecordingNotifier::default()),
            events.clone(),
        );

        assert_eq!(dialog.request_close(), CloseDecision::Blocked);
        dialog.select_candidate(stars(1));
        assert_eq!(dialog.request_close(), CloseDecision::Blocked);
        assert!(dialog.is_open());
        assert!(events.reasons().is_empty());

        dialog.request_submit().await;

        assert!(!dialog.is_open());
        assert_eq!(events.reasons(), vec![CloseReason::Submitted]);
        assert_eq!(dialog.request_close(), CloseDecision::AlreadyClosed);
    }

    #[tokio::test]
    async fn dismissible_close_discards_state() {
        let mut submitter = MockRatingSubmitPort::new();
        submitter.expect_submit().never();

        let mut events = MockDialogEventsPort::new();
        events
            .expect_on_closed()
            .with(mockall::predicate::eq(CloseReason::Dismissed))
            .times(1)
            .return_const(());

        let dialog = open_dialog(
            DialogMode::Dismissible,
            Arc::new(submitter),
            Arc::new(RecordingNotifier::default()),
            Arc::new(events),
        );

        dialog.select_candidate(stars(2));
        dialog.preview_candidate(stars(5));
        assert_eq!(dialog.request_close(), CloseDecision::Closed);

        let snapshot = dialog.snapshot();
        assert!(!snapshot.is_open);
        assert_eq!(snapshot.selected_value(), 0);
        assert_eq!(snapshot.hovered_value(), 0);

        // A closed dialog ignores further input
        dialog.select_candidate(stars(4));
        assert_eq!(dialog.snapshot().selected_value(), 0);
        assert_eq!(dialog.request_submit().await, SubmitResult::Closed);
        assert_eq!(dialog.request_close(), CloseDecision::AlreadyClosed);
    }

    #[tokio::test]
    async fn dismissing_during_submission_fires_on_closed_once() {
        let submitter = Arc::new(GatedSubmitPort::new(true));
        let notifier = Arc::new(RecordingNotifier::default());
        let events = Arc::new(RecordingEvents::default());
        let dialog = open_dialog(
            DialogMode::Dismissible,
            submitter.clone(),
            notifier.clone(),
            events.clone(),
        );
        dialog.select_candidate(stars(4));

        let submit = dialog.request_submit();
        let dismiss = async {
            tokio::task::yield_now().await;
            let decision = dialog.request_close();
            submitter.release();
            decision
        };
        let (result, decision) = tokio::join!(submit, dismiss);

        assert_eq!(decision, CloseDecision::Closed);
        assert_eq!(result, SubmitResult::Completed(SubmissionOutcome::Accepted));
        assert_eq!(notifier.notices(), vec![Notice::rating_submitted()]);
        assert_eq!(events.reasons(), vec![CloseReason::Dismissed]);
        assert!(!dialog.snapshot().is_submitting());
    }

    #[tokio::test]
    async fn dropping_submit_future_resets_phase() {
        let submitter = Arc::new(GatedSubmitPort::new(true));
        let dialog = open_dialog(
            DialogMode::Dismissible,
            submitter.clone(),
            Arc::new(RecordingNotifier::default()),
            Arc::new(RecordingEvents::default()),
        );
        dialog.select_candidate(stars(1));

        {
            let submit = dialog.request_submit();
            tokio::pin!(submit);
            assert!(futures_util::poll!(submit.as_mut()).is_pending());
            assert!(dialog.snapshot().is_submitting());
        }

        assert!(!dialog.snapshot().is_submitting());
        assert_eq!(submitter.calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn accepted_rating_is_never_resubmitted_by_racing_callers() {
        use crate::infrastructure::{FakeOutcome, FakeRatingBackend};

        for _ in 0..200 {
            let backend = Arc::new(FakeRatingBackend::new(FakeOutcome::Accept));
            let events = Arc::new(RecordingEvents::default());
            let dialog = Arc::new(open_dialog(
                DialogMode::Enforced,
                backend.clone(),
                Arc::new(RecordingNotifier::default()),
                events.clone(),
            ));
            dialog.select_candidate(stars(4));

            let callers: Vec<_> = (0..3)
                .map(|_| {
                    let dialog = Arc::clone(&dialog);
                    tokio::spawn(async move {
                        while dialog.is_open() {
                            dialog.request_submit().await;
                            tokio::task::yield_now().await;
                        }
                    })
                })
                .collect();
            for caller in callers {
                assert!(caller.await.is_ok());
            }

            assert_eq!(backend.received().len(), 1);
            assert_eq!(events.reasons(), vec![CloseReason::Submitted]);
        }
    }

    #[test]
    fn selecting_on_closed_dialog_logs_nothing() {
        use std::io::Write;

        #[derive(Clone, Default)]
        struct SharedBuf(Arc<Mutex<Vec<u8>>>);

        impl Write for SharedBuf {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let dialog = open_dialog(
            DialogMode::Dismissible,
            Arc::new(MockRatingSubmitPort::new()),
            Arc::new(RecordingNotifier::default()),
            Arc::new(RecordingEvents::default()),
        );

        tracing::subscriber::with_default(subscriber, || {
            dialog.select_candidate(stars(2));
            assert_eq!(dialog.request_close(), CloseDecision::Closed);
            dialog.select_candidate(stars(5));
        });

        let logs = String::from_utf8_lossy(
            &buf.0.lock().unwrap_or_else(PoisonError::into_inner),
        )
        .into_owned();
        assert_eq!(logs.matches("Rating selected").count(), 1);
        assert_eq!(dialog.snapshot().selected_value(), 0);
    }

    #[test]
    fn select_value_rejects_out_of_range() {
        let dialog = open_dialog(
            DialogMode::Dismissible,
            Arc::new(MockRatingSubmitPort::new()),
            Arc::new(RecordingNotifier::default()),
            Arc::new(RecordingEvents::default()),
        );

        assert!(dialog.select_value(0).is_err());
        assert!(dialog.select_value(6).is_err());
        assert_eq!(dialog.snapshot().selected_value(), 0);

        assert!(dialog.select_value(5).is_ok());
        assert_eq!(dialog.snapshot().selected_value(), 5);
    }

    #[test]
    fn snapshot_reports_submit_affordance() {
        let dialog = open_dialog(
            DialogMode::Dismissible,
            Arc::new(MockRatingSubmitPort::new()),
            Arc::new(RecordingNotifier::default()),
            Arc::new(RecordingEvents::default()),
        );

        assert!(!dialog.snapshot().can_submit());
        dialog.preview_candidate(stars(3));
        assert!(!dialog.snapshot().can_submit());
        assert_eq!(dialog.snapshot().display_value(), 3);

        dialog.select_candidate(stars(2));
        dialog.clear_preview();
        assert!(dialog.snapshot().can_submit());
        assert_eq!(dialog.snapshot().display_value(), 2);
    }

    #[test]
    fn each_open_starts_fresh() {
        let service = RatingDialogService::new(RatingDialogPorts::new(
            Arc::new(MockRatingSubmitPort::new()),
            Arc::new(RecordingNotifier::default()),
            Arc::new(RecordingEvents::default()),
        ));

        let first = service.open(context(DialogMode::Dismissible));
        first.select_candidate(stars(5));
        first.request_close();

        let second = service.open(context(DialogMode::Dismissible));
        let snapshot = second.snapshot();
        assert!(snapshot.is_open);
        assert_eq!(snapshot.selected_value(), 0);
        assert_eq!(snapshot.interaction.phase(), SubmitPhase::Idle);
    }
}
