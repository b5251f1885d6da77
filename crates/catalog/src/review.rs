use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use oxcart_core::{DomainError, DomainResult, Entity, ReviewId, UserId};

/// A customer review attached to a product. Reviews are append-only; once
/// written they are never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    id: ReviewId,
    user_id: UserId,
    rating: u8,
    comment: String,
    created_at: DateTime<Utc>,
}

impl Review {
    /// Ratings are a 1-5 scale; anything outside is rejected rather than
    /// clamped.
    pub fn new(user_id: UserId, rating: u8, comment: impl Into<String>) -> DomainResult<Self> {
        if !(1..=5).contains(&rating) {
            return Err(DomainError::invalid_value(format!(
                "rating must be between 1 and 5, got {rating}"
            )));
        }
        Ok(Self {
            id: ReviewId::new(),
            user_id,
            rating,
            comment: comment.into(),
            created_at: Utc::now(),
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
