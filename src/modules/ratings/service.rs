use tracing::{info, instrument};

use skillswap_auth::Identity;
use skillswap_core::AppError;
use skillswap_models::{CreateRatingDto, NewRating, Rating, Stars};

use crate::store::FeedbackStore;

pub struct RatingService;

impl RatingService {
    /// Records a rating on behalf of the caller.
    ///
    /// The body's `learnerID` must be the authenticated user; a second rating
    /// for the same listing is answered with an `ALREADY_RATED` conflict.
    #[instrument(skip(store))]
    pub async fn create_rating(
        store: &dyn FeedbackStore,
        caller: &Identity,
        dto: CreateRatingDto,
    ) -> Result<Rating, AppError> {
        if dto.learner_id != caller.user_id {
            return Err(AppError::forbidden("You can only submit ratings as yourself"));
        }

        let stars = Stars::new(dto.rating).map_err(|e| AppError::unprocessable(e.to_string()))?;

        let rating = store
            .insert_rating(NewRating {
                learner_id: dto.learner_id,
                teacher_id: dto.teacher_id,
                listing_id: dto.listing_id,
                stars,
            })
            .await
            .map_err(|e| e.into_app_error())?;

        info!(rating_id = %rating.id, listing_id = %rating.listing_id, "Rating created");

        Ok(rating)
    }

    #[instrument(skip(store))]
    pub async fn get_listing_ratings(
        store: &dyn FeedbackStore,
        listing_id: &str,
    ) -> Result<Vec<Rating>, AppError> {
        store
            .ratings_for_listing(listing_id)
            .await
            .map_err(|e| e.into_app_error())
    }
}
