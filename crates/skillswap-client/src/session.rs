//! Who is using the flow and what they opened it for.
//!
//! [`Session`] replaces ambient client storage: the signed-in user and the
//! credential are handed to the flow and the HTTP client explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use skillswap_models::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Learner,
    Teacher,
    Admin,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            fullname: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<CurrentUser>,
    pub token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: CurrentUser, token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
        }
    }
}

/// The session record the flow was opened from, as the sessions list passes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(rename = "teacherID", default)]
    pub teacher: Option<UserRef>,
    #[serde(rename = "learnerID", default)]
    pub learner: Option<UserRef>,
    #[serde(rename = "skillName", default)]
    pub skill_name: Option<String>,
    #[serde(rename = "skillListingID", default)]
    pub skill_listing: Option<ListingRef>,
    #[serde(rename = "scheduledTime", default)]
    pub scheduled_time: Option<DateTime<Utc>>,
}

/// Reference to a skill listing, bare or populated with its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

impl ListingRef {
    pub fn id(&self) -> &str {
        match self {
            ListingRef::Id(id) => id,
            ListingRef::Populated { id, .. } => id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ListingRef::Id(_) => None,
            ListingRef::Populated { title, .. } => title.as_deref(),
        }
    }
}

/// Display strings for the session summary card. Unknown values read `N/A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDetails {
    pub skill: String,
    pub teacher: String,
    pub date: String,
}

const NOT_AVAILABLE: &str = "N/A";

impl SessionData {
    pub fn details(&self) -> SessionDetails {
        SessionDetails {
            skill: self
                .skill_name
                .clone()
                .filter(|name| !name.is_empty())
                .or_else(|| {
                    self.skill_listing
                        .as_ref()
                        .and_then(ListingRef::title)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            teacher: self
                .teacher
                .as_ref()
                .and_then(UserRef::fullname)
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            date: self
                .scheduled_time
                .map(|at| at.format("%b %-d, %Y").to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// Everything the flow is opened with besides the session.
///
/// Explicit ids win over the ones carried by `session_data`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowContext {
    pub listing_id: Option<String>,
    pub teacher_id: Option<String>,
    pub learner_id: Option<String>,
    pub session_data: Option<SessionData>,
    /// Opaque state handed back to the sign-in route so it can resume here.
    pub return_state: Option<Value>,
}

impl FlowContext {
    pub fn for_listing(listing_id: impl Into<String>) -> Self {
        Self {
            listing_id: Some(listing_id.into()),
            ..Self::default()
        }
    }

    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_id = Some(teacher_id.into());
        self
    }

    pub fn with_learner(mut self, learner_id: impl Into<String>) -> Self {
        self.learner_id = Some(learner_id.into());
        self
    }

    pub fn with_session_data(mut self, session_data: SessionData) -> Self {
        self.session_data = Some(session_data);
        self
    }

    pub fn with_return_state(mut self, return_state: Value) -> Self {
        self.return_state = Some(return_state);
        self
    }

    pub(crate) fn listing(&self) -> Option<&str> {
        self.listing_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    pub(crate) fn resolve_teacher_id(&self) -> Option<String> {
        non_empty(self.teacher_id.as_deref()).or_else(|| {
            self.session_data
                .as_ref()
                .and_then(|data| data.teacher.as_ref())
                .and_then(|teacher| non_empty(Some(teacher.id())))
        })
    }

    pub(crate) fn resolve_learner_id(&self, user: Option<&CurrentUser>) -> Option<String> {
        non_empty(self.learner_id.as_deref())
            .or_else(|| {
                self.session_data
                    .as_ref()
                    .and_then(|data| data.learner.as_ref())
                    .and_then(|learner| non_empty(Some(learner.id())))
            })
            .or_else(|| user.and_then(|user| non_empty(Some(user.id.as_str()))))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
