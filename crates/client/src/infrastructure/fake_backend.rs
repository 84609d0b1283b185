//! Fake rating backend
//!
//! Answers submissions according to a fixed [`FakeOutcome`]. The console
//! runner uses it in place of a real service, and tests use it to exercise
//! the dialog end to end without mocks.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use taskrate_domain::{DomainError, StarRating, TaskId, UserId};

use crate::ports::outbound::{RatingSubmitPort, SubmitError};

/// How the fake backend answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FakeOutcome {
    /// Every rating is accepted
    #[default]
    Accept,
    /// Every rating is declined
    Reject,
    /// Every submission fails with a transport error
    Fail,
    /// First rating per (task, partner) is accepted, later ones are declined
    RejectDuplicates,
}

impl std::str::FromStr for FakeOutcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            "fail" => Ok(Self::Fail),
            "reject_duplicates" | "duplicates" => Ok(Self::RejectDuplicates),
            other => Err(DomainError::parse(format!("Unknown fake outcome: {other}"))),
        }
    }
}

/// A rating the fake backend received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedRating {
    pub task_id: TaskId,
    pub partner_id: UserId,
    pub rating: StarRating,
}

pub struct FakeRatingBackend {
    outcome: FakeOutcome,
    latency: Option<Duration>,
    received: Mutex<Vec<ReceivedRating>>,
    rated: Mutex<HashSet<(TaskId, UserId)>>,
}

impl FakeRatingBackend {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            latency: None,
            received: Mutex::new(Vec::new()),
            rated: Mutex::new(HashSet::new()),
        }
    }

    /// Delay every answer, so the dialog visibly sits in `Submitting`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn received(&self) -> Vec<ReceivedRating> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn first_rating_for(&self, task_id: TaskId, partner_id: UserId) -> bool {
        self.rated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((task_id, partner_id))
    }
}

#[async_trait]
impl RatingSubmitPort for FakeRatingBackend {
    async fn submit(
        &self,
        task_id: TaskId,
        partner_id: UserId,
        rating: StarRating,
    ) -> Result<bool, SubmitError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ReceivedRating {
                task_id,
                partner_id,
                rating,
            });

        let answer = match self.outcome {
            FakeOutcome::Accept => Ok(true),
            FakeOutcome::Reject => Ok(false),
            FakeOutcome::Fail => Err(SubmitError::transport("fake backend unreachable")),
            FakeOutcome::RejectDuplicates => Ok(self.first_rating_for(task_id, partner_id)),
        };
        tracing::debug!(task_id = %task_id, rating = rating.get(), answer = ?answer, "Fake backend answered");
        answer
    }
}
