use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reference to a user that is either a bare id or a populated document.
///
/// ```json
/// "64f1c0ffee..."
/// { "_id": "64f1c0ffee...", "fullname": "Ada Lovelace" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UserRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fullname: Option<String>,
    },
}

impl UserRef {
    pub fn id(&self) -> &str {
        match self {
            UserRef::Id(id) => id,
            UserRef::Populated { id, .. } => id,
        }
    }

    pub fn fullname(&self) -> Option<&str> {
        match self {
            UserRef::Id(_) => None,
            UserRef::Populated { fullname, .. } => fullname.as_deref(),
        }
    }

    pub fn is(&self, user_id: &str) -> bool {
        self.id() == user_id
    }
}

impl From<String> for UserRef {
    fn from(id: String) -> Self {
        UserRef::Id(id)
    }
}

impl From<&str> for UserRef {
    fn from(id: &str) -> Self {
        UserRef::Id(id.to_string())
    }
}
