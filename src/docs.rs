use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

use skillswap_core::{ErrorBody, ErrorCode};
use skillswap_models::{
    CreateRatingDto, CreateReviewDto, Rating, RatingCreatedResponse, RatingListResponse, Review,
    ReviewCreatedResponse, ReviewListResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::ratings::controller::create_rating,
        crate::modules::ratings::controller::get_listing_ratings,
        crate::modules::reviews::controller::create_review,
        crate::modules::reviews::controller::get_listing_reviews,
    ),
    components(
        schemas(
            Rating,
            CreateRatingDto,
            RatingListResponse,
            RatingCreatedResponse,
            Review,
            CreateReviewDto,
            ReviewListResponse,
            ReviewCreatedResponse,
            ErrorBody,
            ErrorCode,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Ratings", description = "Star ratings learners leave on skill listings"),
        (name = "Reviews", description = "Written reviews learners leave on skill listings")
    ),
    info(
        title = "SkillSwap Feedback API",
        version = "0.1.0",
        description = "Ratings and reviews for the SkillSwap marketplace. Every endpoint requires a JWT in the `token` cookie or an `Authorization: Bearer` header.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            );
        }
    }
}
