//! Middleware for request processing.
//!
//! - [`auth`]: the auth guard ([`auth::authenticate`]) and the
//!   [`auth::AuthUser`] extractor
//!
//! # Authentication Flow
//!
//! 1. Client sends the credential in the `token` cookie or as
//!    `Authorization: Bearer <token>`
//! 2. `authenticate` verifies it and attaches the caller's `Identity`
//! 3. Handlers receive it through `AuthUser`
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn handler(auth_user: AuthUser) -> impl IntoResponse {
//!     let user_id = auth_user.user_id();
//!     // ...
//! }
//! ```

pub mod auth;
