use tracing::{info, instrument};

use skillswap_auth::Identity;
use skillswap_core::AppError;
use skillswap_models::{CreateReviewDto, NewReview, Review, Stars, check_review_text};

use crate::store::FeedbackStore;

pub struct ReviewService;

impl ReviewService {
    /// Records a written review on behalf of the caller.
    ///
    /// The text is stored trimmed. A second review for the same listing is
    /// answered with an `ALREADY_REVIEWED` conflict.
    #[instrument(skip(store, dto), fields(listing_id = %dto.listing_id))]
    pub async fn create_review(
        store: &dyn FeedbackStore,
        caller: &Identity,
        dto: CreateReviewDto,
    ) -> Result<Review, AppError> {
        if dto.learner_id != caller.user_id {
            return Err(AppError::forbidden("You can only submit reviews as yourself"));
        }

        let review_text = check_review_text(&dto.review_text)
            .map_err(|e| AppError::unprocessable(e.to_string()))?
            .to_string();
        let stars = Stars::new(dto.rating).map_err(|e| AppError::unprocessable(e.to_string()))?;

        let review = store
            .insert_review(NewReview {
                learner_id: dto.learner_id,
                teacher_id: dto.teacher_id,
                listing_id: dto.listing_id,
                review_text,
                stars,
            })
            .await
            .map_err(|e| e.into_app_error())?;

        info!(review_id = %review.id, "Review created");

        Ok(review)
    }

    #[instrument(skip(store))]
    pub async fn get_listing_reviews(
        store: &dyn FeedbackStore,
        listing_id: &str,
    ) -> Result<Vec<Review>, AppError> {
        store
            .reviews_for_listing(listing_id)
            .await
            .map_err(|e| e.into_app_error())
    }
}
