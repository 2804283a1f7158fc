use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ratings::Stars;
use crate::users::UserRef;

/// Bounds on the trimmed review text, counted in characters.
pub const REVIEW_MIN_CHARS: usize = 10;
pub const REVIEW_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTextError {
    TooShort { chars: usize },
    TooLong { chars: usize },
}

impl fmt::Display for ReviewTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewTextError::TooShort { .. } => write!(
                f,
                "Review must be at least {} characters long",
                REVIEW_MIN_CHARS
            ),
            ReviewTextError::TooLong { .. } => write!(
                f,
                "Review must be at most {} characters long",
                REVIEW_MAX_CHARS
            ),
        }
    }
}

impl std::error::Error for ReviewTextError {}

/// Trims `text` and checks it against the length bounds.
pub fn check_review_text(text: &str) -> Result<&str, ReviewTextError> {
    let trimmed = text.trim();
    let chars = trimmed.chars().count();

    if chars < REVIEW_MIN_CHARS {
        return Err(ReviewTextError::TooShort { chars });
    }
    if chars > REVIEW_MAX_CHARS {
        return Err(ReviewTextError::TooLong { chars });
    }

    Ok(trimmed)
}

fn validate_review_text(text: &str) -> Result<(), ValidationError> {
    check_review_text(text).map(|_| ()).map_err(|err| {
        ValidationError::new("review_text").with_message(Cow::Owned(err.to_string()))
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "learnerID")]
    #[schema(value_type = String)]
    pub learner_id: UserRef,
    #[serde(rename = "teacherID")]
    #[schema(value_type = String)]
    pub teacher_id: UserRef,
    #[serde(rename = "listingID")]
    pub listing_id: String,
    #[serde(rename = "reviewText")]
    pub review_text: String,
    #[schema(minimum = 1, maximum = 5)]
    pub rating: u8,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Review ready to be persisted; `review_text` is already trimmed.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub learner_id: String,
    pub teacher_id: String,
    pub listing_id: String,
    pub review_text: String,
    pub stars: Stars,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReviewDto {
    #[serde(rename = "learnerID")]
    #[validate(length(min = 1, message = "learnerID is required"))]
    pub learner_id: String,
    #[serde(rename = "teacherID")]
    #[validate(length(min = 1, message = "teacherID is required"))]
    pub teacher_id: String,
    #[serde(rename = "listingID")]
    #[validate(length(min = 1, message = "listingID is required"))]
    pub listing_id: String,
    #[serde(rename = "reviewText")]
    #[validate(custom(function = "validate_review_text"))]
    pub review_text: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(minimum = 1, maximum = 5)]
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewListResponse {
    pub success: bool,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewCreatedResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub review: Option<Review>,
}
