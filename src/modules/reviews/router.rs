use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_review, get_listing_reviews};

pub fn init_reviews_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_review))
        .route("/listing/{listing_id}", get(get_listing_reviews))
}
