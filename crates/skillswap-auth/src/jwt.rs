//! JWT signing and verification.
//!
//! Verification distinguishes two failure kinds:
//!
//! - [`TokenError::Invalid`]: the token is well-formed but cannot be trusted
//!   (bad signature, expired, wrong algorithm, missing `exp`, no `userId`).
//!   The auth guard answers these with 401.
//! - [`TokenError::Unexpected`]: the token cannot even be taken apart
//!   (wrong segment count, bad base64, bad UTF-8, a header or payload that is
//!   not JSON) or the key material is unusable. The auth guard logs these and
//!   answers 500. Well-formed JSON whose claims have the wrong shape is
//!   [`TokenError::Invalid`].

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use skillswap_config::JwtConfig;
use skillswap_core::AppError;

use crate::claims::{Claims, Identity};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("token could not be processed: {0}")]
    Unexpected(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Utf8(_)
            | ErrorKind::InvalidEcdsaKey
            | ErrorKind::InvalidRsaKey(_)
            | ErrorKind::RsaFailedSigning
            | ErrorKind::InvalidKeyFormat
            | ErrorKind::Crypto(_) => TokenError::Unexpected(err),
            ErrorKind::Json(json) if !json.is_data() => TokenError::Unexpected(err),
            _ => TokenError::Invalid,
        }
    }
}

/// Signs a credential for `user_id` using the configured expiry.
pub fn create_token(user_id: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_token_with_expiry(user_id, jwt_config.token_expiry, jwt_config)
}

/// Signs a credential that expires `expiry_secs` from now.
///
/// A negative expiry yields an already expired token.
pub fn create_token_with_expiry(
    user_id: &str,
    expiry_secs: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + expiry_secs).max(0) as usize;

    let claims = Claims {
        user_id: Some(user_id.to_string()),
        exp,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Verifies signature and expiry and returns the identity the token names.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Identity, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )?;

    data.claims.identity().ok_or(TokenError::Invalid)
}
