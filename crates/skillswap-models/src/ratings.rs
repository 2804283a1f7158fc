use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::UserRef;

/// A star value in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stars(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStars(pub u8);

impl fmt::Display for InvalidStars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rating must be between 1 and 5, got {}", self.0)
    }
}

impl std::error::Error for InvalidStars {}

impl Stars {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, InvalidStars> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidStars(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All star values, lowest first.
    pub fn all() -> impl Iterator<Item = Stars> {
        (Self::MIN..=Self::MAX).map(Stars)
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Poor - Not satisfied",
            2 => "Fair - Below expectations",
            3 => "Good - Met expectations",
            4 => "Very Good - Above expectations",
            _ => "Excellent - Outstanding experience",
        }
    }
}

impl TryFrom<u8> for Stars {
    type Error = InvalidStars;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Stars::new(value)
    }
}

impl From<Stars> for u8 {
    fn from(stars: Stars) -> Self {
        stars.0
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rating {
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
    #[schema(minimum = 1, maximum = 5)]
    pub rating: u8,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// `None` when the stored value is outside `1..=5`.
    pub fn stars(&self) -> Option<Stars> {
        Stars::new(self.rating).ok()
    }
}

/// Rating ready to be persisted, after the request has been validated.
#[derive(Debug, Clone)]
pub struct NewRating {
    pub learner_id: String,
    pub teacher_id: String,
    pub listing_id: String,
    pub stars: Stars,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRatingDto {
    #[serde(rename = "learnerID")]
    #[validate(length(min = 1, message = "learnerID is required"))]
    pub learner_id: String,
    #[serde(rename = "teacherID")]
    #[validate(length(min = 1, message = "teacherID is required"))]
    pub teacher_id: String,
    #[serde(rename = "listingID")]
    #[validate(length(min = 1, message = "listingID is required"))]
    pub listing_id: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(minimum = 1, maximum = 5)]
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingListResponse {
    pub success: bool,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingCreatedResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
}
