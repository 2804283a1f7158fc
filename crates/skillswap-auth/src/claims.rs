//! Credential payload and the identity derived from it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload of a SkillSwap credential.
///
/// `userId` is optional at the type level so that a token which verifies but
/// carries no subject is reported as invalid rather than as a decoding fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Issued-at timestamp (Unix timestamp)
    #[serde(default)]
    pub iat: usize,
}

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl Claims {
    /// The identity this payload vouches for, if it names a subject.
    pub fn identity(&self) -> Option<Identity> {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Identity {
                user_id: id.to_string(),
            })
    }
}
