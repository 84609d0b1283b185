//! Rating perspective - who is rating whom
//!
//! Only the presentation layer reads this. Validation and submission behave
//! the same for both perspectives.

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// The doer rates the task creator
    DoerRatingCreator,
    /// The task creator rates the doer
    CreatorRatingDoer,
}

impl Perspective {
    pub fn from_is_doer(is_doer: bool) -> Self {
        if is_doer {
            Self::DoerRatingCreator
        } else {
            Self::CreatorRatingDoer
        }
    }

    /// Phrase naming the party being rated.
    pub fn rated_party(&self) -> &'static str {
        match self {
            Self::DoerRatingCreator => "the task creator",
            Self::CreatorRatingDoer => "the doer",
        }
    }
}

impl std::str::FromStr for Perspective {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doer" | "doer_rating_creator" => Ok(Self::DoerRatingCreator),
            "creator" | "creator_rating_doer" => Ok(Self::CreatorRatingDoer),
            other => Err(DomainError::parse(format!("Unknown perspective: {other}"))),
        }
    }
}
