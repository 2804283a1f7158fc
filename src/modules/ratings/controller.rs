use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use skillswap_core::{AppError, ErrorBody};
use skillswap_models::{CreateRatingDto, RatingCreatedResponse, RatingListResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::ratings::service::RatingService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/ratings/create",
    request_body = CreateRatingDto,
    responses(
        (status = 201, description = "Rating created", body = RatingCreatedResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 401, description = "Missing or invalid credential", body = ErrorBody),
        (status = 403, description = "learnerID does not match the caller", body = ErrorBody),
        (status = 409, description = "Listing already rated by this learner", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
    tag = "Ratings",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_rating(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateRatingDto>,
) -> Result<(StatusCode, Json<RatingCreatedResponse>), AppError> {
    let rating = RatingService::create_rating(state.store.as_ref(), &auth_user.0, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(RatingCreatedResponse {
            success: true,
            message: Some("Rating submitted successfully".to_string()),
            rating: Some(rating),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/ratings/listing/{listing_id}",
    params(
        ("listing_id" = String, Path, description = "Skill listing ID")
    ),
    responses(
        (status = 200, description = "Ratings for the listing", body = RatingListResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorBody)
    ),
    tag = "Ratings",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_listing_ratings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(listing_id): Path<String>,
) -> Result<Json<RatingListResponse>, AppError> {
    let ratings = RatingService::get_listing_ratings(state.store.as_ref(), &listing_id).await?;

    Ok(Json(RatingListResponse {
        success: true,
        ratings,
    }))
}
