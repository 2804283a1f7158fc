//! # SkillSwap Models
//!
//! Wire types for the feedback surface. Field names follow the document
//! store conventions the frontend already speaks (`_id`, `learnerID`,
//! `teacherID`, `listingID`, `reviewText`).
//!
//! - [`users`]: [`UserRef`], a user id that may arrive populated
//! - [`ratings`]: [`Rating`], [`Stars`], create DTO and response envelopes
//! - [`reviews`]: [`Review`], review text rules, create DTO and envelopes

pub mod ratings;
pub mod reviews;
pub mod users;

pub use ratings::{
    CreateRatingDto, InvalidStars, NewRating, Rating, RatingCreatedResponse, RatingListResponse,
    Stars,
};
pub use reviews::{
    CreateReviewDto, NewReview, REVIEW_MAX_CHARS, REVIEW_MIN_CHARS, Review, ReviewCreatedResponse,
    ReviewListResponse, ReviewTextError, check_review_text,
};
pub use users::UserRef;

/// Generates a document id in the 24-hex-digit shape the frontend expects.
pub fn new_document_id() -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    simple[..24].to_string()
}
