//! Persistence for ratings and reviews.
//!
//! Handlers talk to a [`FeedbackStore`] trait object so the server can run
//! against PostgreSQL in production and against [`MemoryFeedbackStore`] in
//! tests or when no database is configured.
//!
//! Both implementations enforce at most one rating and one review per
//! (learner, listing) pair and report violations as
//! [`StoreError::DuplicateRating`] / [`StoreError::DuplicateReview`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use skillswap_core::{AppError, ErrorCode};
use skillswap_models::{NewRating, NewReview, Rating, Review};

pub use memory::MemoryFeedbackStore;
pub use postgres::PgFeedbackStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("learner has already rated this listing")]
    DuplicateRating,
    #[error("learner has already reviewed this listing")]
    DuplicateReview,
    #[error("stored value out of range: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub const ALREADY_RATED_MESSAGE: &str = "You have already rated this listing";
pub const ALREADY_REVIEWED_MESSAGE: &str = "You have already reviewed this listing";

impl StoreError {
    /// Duplicates become structured 409 conflicts; everything else is a server fault.
    pub fn into_app_error(self) -> AppError {
        match self {
            StoreError::DuplicateRating => {
                AppError::conflict(ErrorCode::AlreadyRated, ALREADY_RATED_MESSAGE)
            }
            StoreError::DuplicateReview => {
                AppError::conflict(ErrorCode::AlreadyReviewed, ALREADY_REVIEWED_MESSAGE)
            }
            other => AppError::internal(anyhow::Error::new(other)),
        }
    }
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn insert_rating(&self, rating: NewRating) -> Result<Rating, StoreError>;

    /// Ratings for a listing, oldest first.
    async fn ratings_for_listing(&self, listing_id: &str) -> Result<Vec<Rating>, StoreError>;

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError>;

    /// Reviews for a listing, oldest first.
    async fn reviews_for_listing(&self, listing_id: &str) -> Result<Vec<Review>, StoreError>;
}
