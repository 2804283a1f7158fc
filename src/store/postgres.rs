use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use skillswap_models::{NewRating, NewReview, Rating, Review, UserRef, new_document_id};

use super::{FeedbackStore, StoreError};

#[derive(Debug, Clone)]
pub struct PgFeedbackStore {
    db: PgPool,
}

impl PgFeedbackStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromRow)]
struct RatingRow {
    id: String,
    learner_id: String,
    teacher_id: String,
    listing_id: String,
    rating: i16,
    created_at: DateTime<Utc>,
}

impl TryFrom<RatingRow> for Rating {
    type Error = StoreError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        Ok(Rating {
            id: row.id,
            learner_id: UserRef::Id(row.learner_id),
            teacher_id: UserRef::Id(row.teacher_id),
            listing_id: row.listing_id,
            rating: u8::try_from(row.rating)
                .map_err(|_| StoreError::Corrupt(format!("rating {}", row.rating)))?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ReviewRow {
    id: String,
    learner_id: String,
    teacher_id: String,
    listing_id: String,
    review_text: String,
    rating: i16,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = StoreError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        Ok(Review {
            id: row.id,
            learner_id: UserRef::Id(row.learner_id),
            teacher_id: UserRef::Id(row.teacher_id),
            listing_id: row.listing_id,
            review_text: row.review_text,
            rating: u8::try_from(row.rating)
                .map_err(|_| StoreError::Corrupt(format!("rating {}", row.rating)))?,
            created_at: row.created_at,
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    #[instrument(skip(self))]
    async fn insert_rating(&self, rating: NewRating) -> Result<Rating, StoreError> {
        let row = sqlx::query_as::<_, RatingRow>(
            r#"INSERT INTO ratings (id, learner_id, teacher_id, listing_id, rating)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, learner_id, teacher_id, listing_id, rating, created_at"#,
        )
        .bind(new_document_id())
        .bind(&rating.learner_id)
        .bind(&rating.teacher_id)
        .bind(&rating.listing_id)
        .bind(i16::from(rating.stars.get()))
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return StoreError::DuplicateRating;
            }
            StoreError::from(e)
        })?;

        Rating::try_from(row)
    }

    #[instrument(skip(self))]
    async fn ratings_for_listing(&self, listing_id: &str) -> Result<Vec<Rating>, StoreError> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"SELECT id, learner_id, teacher_id, listing_id, rating, created_at
               FROM ratings
               WHERE listing_id = $1
               ORDER BY created_at ASC"#,
        )
        .bind(listing_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Rating::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"INSERT INTO reviews (id, learner_id, teacher_id, listing_id, review_text, rating)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, learner_id, teacher_id, listing_id, review_text, rating, created_at"#,
        )
        .bind(new_document_id())
        .bind(&review.learner_id)
        .bind(&review.teacher_id)
        .bind(&review.listing_id)
        .bind(&review.review_text)
        .bind(i16::from(review.stars.get()))
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return StoreError::DuplicateReview;
            }
            StoreError::from(e)
        })?;

        Review::try_from(row)
    }

    #[instrument(skip(self))]
    async fn reviews_for_listing(&self, listing_id: &str) -> Result<Vec<Review>, StoreError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"SELECT id, learner_id, teacher_id, listing_id, review_text, rating, created_at
               FROM reviews
               WHERE listing_id = $1
               ORDER BY created_at ASC"#,
        )
        .bind(listing_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Review::try_from).collect()
    }
}
