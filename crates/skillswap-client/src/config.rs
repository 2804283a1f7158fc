use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(env::var("SKILLSWAP_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))
    }

    /// Absolute URL for an API path such as `/api/v1/ratings/create`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
