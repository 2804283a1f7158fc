//! # SkillSwap Auth
//!
//! Credential claims and JWT utilities.
//!
//! - [`claims`]: the signed payload ([`Claims`]) and the request-scoped
//!   [`Identity`] derived from it
//! - [`jwt`]: signing and verification
//!
//! Credentials are issued by the login flow, which lives outside this
//! service; [`create_token`] exists for tests and the developer CLI.
//!
//! # Example
//!
//! ```ignore
//! use skillswap_auth::{create_token, verify_token};
//! use skillswap_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_token("64f1c0ffee", &config)?;
//! let identity = verify_token(&token, &config)?;
//! assert_eq!(identity.user_id, "64f1c0ffee");
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, Identity};
pub use jwt::{TokenError, create_token, create_token_with_expiry, verify_token};
