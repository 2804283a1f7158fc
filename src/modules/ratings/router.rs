use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_rating, get_listing_ratings};

pub fn init_ratings_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_rating))
        .route("/listing/{listing_id}", get(get_listing_ratings))
}
