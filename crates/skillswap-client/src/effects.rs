use serde_json::Value;

use skillswap_models::{CreateRatingDto, CreateReviewDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient message for the user (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Places the flow can send the user to.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    SignIn {
        return_url: String,
        return_state: Option<Value>,
    },
    LearnerSessions,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::SignIn { .. } => "/signin",
            Route::LearnerSessions => "/sessions/learner",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    LookupRatings { listing_id: String },
    LookupReviews { listing_id: String },
    CreateRating(CreateRatingDto),
    CreateReview(CreateReviewDto),
}

/// Something the flow needs done outside itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Notice),
    Navigate(Route),
    Send(ApiRequest),
}

impl Effect {
    pub(crate) fn info(message: impl Into<String>) -> Self {
        Effect::Notify(Notice::info(message))
    }

    pub(crate) fn success(message: impl Into<String>) -> Self {
        Effect::Notify(Notice::success(message))
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Effect::Notify(Notice::error(message))
    }
}
