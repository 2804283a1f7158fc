use std::fmt;

use skillswap_auth::{Identity, TokenError, create_token_with_expiry, verify_token};
use skillswap_config::JwtConfig;

/// Signs a credential for `user_id`. `expiry_secs` overrides the configured lifetime.
pub fn issue(user_id: &str, expiry_secs: Option<i64>, config: &JwtConfig) -> anyhow::Result<String> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        anyhow::bail!("user id must not be empty");
    }

    let expiry = expiry_secs.unwrap_or(config.token_expiry);
    create_token_with_expiry(user_id, expiry, config).map_err(|err| err.error)
}

/// What the auth guard would make of a token.
#[derive(Debug)]
pub enum Inspection {
    Valid(Identity),
    /// Answered with 401 "Invalid token".
    Invalid,
    /// Answered with 500; carries the underlying cause.
    Unprocessable(String),
}

impl Inspection {
    pub fn is_valid(&self) -> bool {
        matches!(self, Inspection::Valid(_))
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inspection::Valid(identity) => write!(f, "valid: userId={}", identity.user_id),
            Inspection::Invalid => write!(f, "rejected (401): Invalid token"),
            Inspection::Unprocessable(cause) => {
                write!(f, "rejected (500): token could not be processed: {}", cause)
            }
        }
    }
}

pub fn inspect(token: &str, config: &JwtConfig) -> Inspection {
    match verify_token(token.trim(), config) {
        Ok(identity) => Inspection::Valid(identity),
        Err(TokenError::Invalid) => Inspection::Invalid,
        Err(TokenError::Unexpected(err)) => Inspection::Unprocessable(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("cli-test-secret-key-at-least-32-characters")
    }

    #[test]
    fn test_issue_then_inspect() {
        let config = config();
        let token = issue("64f1c0ffee", None, &config).unwrap();

        match inspect(&token, &config) {
            Inspection::Valid(identity) => assert_eq!(identity.user_id, "64f1c0ffee"),
            other => panic!("unexpected inspection: {other}"),
        }
    }

    #[test]
    fn test_issue_rejects_blank_user() {
        assert!(issue("   ", None, &config()).is_err());
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let config = config();
        let token = issue("64f1c0ffee", Some(-3600), &config).unwrap();
        assert!(matches!(inspect(&token, &config), Inspection::Invalid));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = issue("64f1c0ffee", None, &config()).unwrap();
        let other = JwtConfig::new("a-completely-different-secret-value");
        let inspection = inspect(&token, &other);
        assert!(!inspection.is_valid());
        assert_eq!(inspection.to_string(), "rejected (401): Invalid token");
    }

    #[test]
    fn test_garbage_is_unprocessable() {
        assert!(matches!(
            inspect("garbage", &config()),
            Inspection::Unprocessable(_)
        ));
    }
}
