pub mod ratings;
pub mod reviews;
