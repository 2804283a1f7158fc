use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use skillswap_models::{NewRating, NewReview, Rating, Review, UserRef, new_document_id};

use super::{FeedbackStore, StoreError};

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryFeedbackStore {
    inner: RwLock<Collections>,
}

#[derive(Debug, Default)]
struct Collections {
    ratings: Vec<Rating>,
    reviews: Vec<Review>,
    // (learner_id, listing_id)
    rating_keys: HashSet<(String, String)>,
    review_keys: HashSet<(String, String)>,
}

impl MemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn insert_rating(&self, rating: NewRating) -> Result<Rating, StoreError> {
        let mut inner = self.inner.write().await;
        let key = (rating.learner_id.clone(), rating.listing_id.clone());
        if inner.rating_keys.contains(&key) {
            return Err(StoreError::DuplicateRating);
        }

        let stored = Rating {
            id: new_document_id(),
            learner_id: UserRef::Id(rating.learner_id),
            teacher_id: UserRef::Id(rating.teacher_id),
            listing_id: rating.listing_id,
            rating: rating.stars.get(),
            created_at: Utc::now(),
        };

        inner.ratings.push(stored.clone());
        inner.rating_keys.insert(key);

        Ok(stored)
    }

    async fn ratings_for_listing(&self, listing_id: &str) -> Result<Vec<Rating>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .ratings
            .iter()
            .filter(|r| r.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let mut inner = self.inner.write().await;
        let key = (review.learner_id.clone(), review.listing_id.clone());
        if inner.review_keys.contains(&key) {
            return Err(StoreError::DuplicateReview);
        }

        let stored = Review {
            id: new_document_id(),
            learner_id: UserRef::Id(review.learner_id),
            teacher_id: UserRef::Id(review.teacher_id),
            listing_id: review.listing_id,
            review_text: review.review_text,
            rating: review.stars.get(),
            created_at: Utc::now(),
        };

        inner.reviews.push(stored.clone());
        inner.review_keys.insert(key);

        Ok(stored)
    }

    async fn reviews_for_listing(&self, listing_id: &str) -> Result<Vec<Review>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .iter()
            .filter(|r| r.listing_id == listing_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillswap_models::Stars;

    fn new_rating(learner: &str, listing: &str, stars: u8) -> NewRating {
        NewRating {
            learner_id: learner.to_string(),
            teacher_id: "teacher-1".to_string(),
            listing_id: listing.to_string(),
            stars: Stars::new(stars).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_ratings() {
        let store = MemoryFeedbackStore::new();
        store.insert_rating(new_rating("a", "listing-1", 4)).await.unwrap();
        store.insert_rating(new_rating("b", "listing-1", 5)).await.unwrap();
        store.insert_rating(new_rating("a", "listing-2", 3)).await.unwrap();

        let ratings = store.ratings_for_listing("listing-1").await.unwrap();
        assert_eq!(ratings.len(), 2);
        assert!(ratings[0].learner_id.is("a"));
        assert_eq!(ratings[1].rating, 5);
    }

    #[tokio::test]
    async fn test_duplicate_rating_rejected() {
        let store = MemoryFeedbackStore::new();
        store.insert_rating(new_rating("a", "listing-1", 4)).await.unwrap();

        let result = store.insert_rating(new_rating("a", "listing-1", 2)).await;
        assert!(matches!(result, Err(StoreError::DuplicateRating)));
    }

    #[tokio::test]
    async fn test_duplicate_review_rejected() {
        let store = MemoryFeedbackStore::new();
        let review = NewReview {
            learner_id: "a".to_string(),
            teacher_id: "t".to_string(),
            listing_id: "listing-1".to_string(),
            review_text: "Clear and patient teacher".to_string(),
            stars: Stars::new(5).unwrap(),
        };
        store.insert_review(review.clone()).await.unwrap();

        let result = store.insert_review(review).await;
        assert!(matches!(result, Err(StoreError::DuplicateReview)));
        assert_eq!(store.reviews_for_listing("listing-1").await.unwrap().len(), 1);
    }
}
