use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use skillswap_core::{AppError, ErrorBody};
use skillswap_models::{CreateReviewDto, ReviewCreatedResponse, ReviewListResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::reviews::service::ReviewService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/reviews/create",
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = ReviewCreatedResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 401, description = "Missing or invalid credential", body = ErrorBody),
        (status = 403, description = "learnerID does not match the caller", body = ErrorBody),
        (status = 409, description = "Listing already reviewed by this learner", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    ),
    tag = "Reviews",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<ReviewCreatedResponse>), AppError> {
    let review = ReviewService::create_review(state.store.as_ref(), &auth_user.0, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreatedResponse {
            success: true,
            message: Some("Review submitted successfully".to_string()),
            review: Some(review),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews/listing/{listing_id}",
    params(
        ("listing_id" = String, Path, description = "Skill listing ID")
    ),
    responses(
        (status = 200, description = "Reviews for the listing", body = ReviewListResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorBody)
    ),
    tag = "Reviews",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_listing_reviews(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(listing_id): Path<String>,
) -> Result<Json<ReviewListResponse>, AppError> {
    let reviews = ReviewService::get_listing_reviews(state.store.as_ref(), &listing_id).await?;

    Ok(Json(ReviewListResponse {
        success: true,
        reviews,
    }))
}
