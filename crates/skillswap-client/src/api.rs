use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use skillswap_core::ErrorCode;
use skillswap_models::{
    CreateRatingDto, CreateReviewDto, Rating, RatingCreatedResponse, RatingListResponse, Review,
    ReviewCreatedResponse, ReviewListResponse,
};

use crate::config::ClientConfig;
use crate::session::Session;

/// Substrings older servers used to signal duplicates before `code` existed.
const LEGACY_ALREADY_RATED: &str = "already rated";
const LEGACY_ALREADY_REVIEWED: &str = "already reviewed";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with `success: false` or a non-2xx status.
    #[error("{message}")]
    Rejected {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn rejected(status: u16, code: Option<ErrorCode>, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ApiError::Rejected { code, .. } => *code,
            _ => None,
        }
    }

    pub fn is_already_rated(&self) -> bool {
        self.is_conflict(ErrorCode::AlreadyRated, LEGACY_ALREADY_RATED)
    }

    pub fn is_already_reviewed(&self) -> bool {
        self.is_conflict(ErrorCode::AlreadyReviewed, LEGACY_ALREADY_REVIEWED)
    }

    fn is_conflict(&self, expected: ErrorCode, legacy: &str) -> bool {
        match self {
            ApiError::Rejected {
                code: Some(code), ..
            } => *code == expected,
            ApiError::Rejected {
                code: None,
                message,
                ..
            } => message.contains(legacy),
            _ => false,
        }
    }

    /// The server's own message when it sent one, `fallback` otherwise.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// The four feedback calls the flow makes.
#[async_trait]
pub trait FeedbackApi: Send + Sync {
    async fn listing_ratings(&self, listing_id: &str) -> Result<Vec<Rating>, ApiError>;

    async fn listing_reviews(&self, listing_id: &str) -> Result<Vec<Review>, ApiError>;

    async fn create_rating(&self, dto: &CreateRatingDto)
    -> Result<RatingCreatedResponse, ApiError>;

    async fn create_review(&self, dto: &CreateReviewDto)
    -> Result<ReviewCreatedResponse, ApiError>;
}

/// [`FeedbackApi`] over HTTP. The session's credential is sent as a bearer token.
#[derive(Debug, Clone)]
pub struct HttpFeedbackApi {
    client: Client,
    config: ClientConfig,
    token: Option<String>,
}

impl HttpFeedbackApi {
    pub fn new(config: &ClientConfig, session: &Session) -> Self {
        Self::with_client(Client::new(), config, session)
    }

    pub fn with_client(client: Client, config: &ClientConfig, session: &Session) -> Self {
        Self {
            client,
            config: config.clone(),
            token: session.token.clone(),
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "Feedback API responded");

        decode_envelope(status, &bytes)
    }
}

/// Turns a response into `T`, or into [`ApiError::Rejected`] when the status
/// is not 2xx or the envelope says `success: false`.
fn decode_envelope<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, ApiError> {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(err) if status.is_success() => return Err(ApiError::Decode(err)),
        Err(_) => {
            let message = status.canonical_reason().unwrap_or("Request failed");
            return Err(ApiError::rejected(status.as_u16(), None, message));
        }
    };

    let succeeded = value.get("success").and_then(Value::as_bool) != Some(false);
    if status.is_success() && succeeded {
        return Ok(serde_json::from_value(value)?);
    }

    let code = value
        .get("code")
        .cloned()
        .and_then(|code| serde_json::from_value::<ErrorCode>(code).ok());
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Err(ApiError::rejected(status.as_u16(), code, message))
}

/// `/api/v1/{resource}/listing/{listing_id}`, with the id escaped as one path segment.
fn listing_url(config: &ClientConfig, resource: &str, listing_id: &str) -> Result<Url, ApiError> {
    let base = config.endpoint(&format!("/api/v1/{resource}/listing"));
    let mut url =
        Url::parse(&base).map_err(|err| ApiError::InvalidUrl(format!("{base}: {err}")))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(base.clone()))?
        .push(listing_id);
    Ok(url)
}

#[async_trait]
impl FeedbackApi for HttpFeedbackApi {
    async fn listing_ratings(&self, listing_id: &str) -> Result<Vec<Rating>, ApiError> {
        let url = listing_url(&self.config, "ratings", listing_id)?;
        let response: RatingListResponse = self.execute(self.client.get(url)).await?;
        Ok(response.ratings)
    }

    async fn listing_reviews(&self, listing_id: &str) -> Result<Vec<Review>, ApiError> {
        let url = listing_url(&self.config, "reviews", listing_id)?;
        let response: ReviewListResponse = self.execute(self.client.get(url)).await?;
        Ok(response.reviews)
    }

    async fn create_rating(
        &self,
        dto: &CreateRatingDto,
    ) -> Result<RatingCreatedResponse, ApiError> {
        let url = self.config.endpoint("/api/v1/ratings/create");
        self.execute(self.client.post(url).json(dto)).await
    }

    async fn create_review(
        &self,
        dto: &CreateReviewDto,
    ) -> Result<ReviewCreatedResponse, ApiError> {
        let url = self.config.endpoint("/api/v1/reviews/create");
        self.execute(self.client.post(url).json(dto)).await
    }
}
