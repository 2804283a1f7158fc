//! # SkillSwap Core
//!
//! Foundational types shared by the SkillSwap API server and its clients.
//!
//! - [`errors`]: the server-side [`AppError`] with HTTP response conversion, the
//!   machine-readable [`ErrorCode`] and the [`ErrorBody`] wire shape every
//!   failed request answers with.
//!
//! # Example
//!
//! ```ignore
//! use skillswap_core::{AppError, ErrorCode};
//!
//! let error = AppError::conflict(ErrorCode::AlreadyRated, "You have already rated this listing");
//! ```

pub mod errors;

// Re-export commonly used types at crate root
pub use errors::{AppError, AppResult, ErrorBody, ErrorCode};
