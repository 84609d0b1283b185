//! Star rating value object
//!
//! A rating is a whole number of stars between 1 and 5. "No rating yet" is
//! not a `StarRating`; it is modelled as `Option<StarRating>` by the callers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// A validated 1–5 star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::validation(format!(
                "rating must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    /// Number of stars.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Every rating in ascending order, for rendering the picker.
    pub fn all() -> impl Iterator<Item = StarRating> {
        (Self::MIN..=Self::MAX).map(StarRating)
    }

    /// Integer view of an optional rating where 0 means "none".
    pub fn value_or_zero(rating: Option<StarRating>) -> u8 {
        rating.map_or(0, StarRating::get)
    }
}

impl TryFrom<u8> for StarRating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StarRating> for u8 {
    fn from(rating: StarRating) -> Self {
        rating.0
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
