pub mod controller;
pub mod router;
pub mod service;

pub use router::init_ratings_router;
pub use skillswap_models::ratings::*;
