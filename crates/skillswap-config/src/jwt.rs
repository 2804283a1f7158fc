use std::env;

pub const DEFAULT_COOKIE_NAME: &str = "token";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of issued credentials, in seconds.
    pub token_expiry: i64,
    /// Cookie consulted before the `Authorization` header.
    pub cookie_name: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_expiry: 86400,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self {
            secret: env::var("SECRET_KEY")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            token_expiry: env::var("JWT_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86400), // 1 day
            cookie_name: env::var("AUTH_COOKIE_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
        }
    }
}
