//! Remote Marvel Rivals API client.
//!
//! The dispatch core only depends on the [`RivalsApi`] contract: given an
//! API key and a resource identifier, fetch a JSON body or a classified
//! error. [`HttpRivalsApi`] is the production implementation over
//! `reqwest`; tests substitute a stub.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::handler::BoxFuture;

/// Base URL of the production API.
pub const DEFAULT_BASE_URL: &str = "https://marvelrivalsapi.com/api/v1";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Request timeout for remote calls. The loop blocks for the duration of a
/// handler, so a stuck request would stall the whole worker without this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Classified remote API failures.
///
/// Each status class gets a distinct, human-readable message; handlers
/// surface these verbatim in failure envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401 - key rejected.
    #[error("The API key was rejected (401 unauthorized).")]
    Unauthorized,

    /// 404 - resource does not exist.
    #[error("The requested resource was not found (404).")]
    NotFound,

    /// 429 - too many requests.
    #[error("Rate limited by the API (429). Try again shortly.")]
    RateLimited,

    /// 5xx - server-side failure.
    #[error("The API reported a server error (status {0}).")]
    Server(u16),

    /// Any other non-200 status.
    #[error("Unexpected API response (status {0}).")]
    Unexpected(u16),

    /// The request timed out.
    #[error("The API request timed out.")]
    Timeout,

    /// Connection-level failure or undecodable body.
    #[error("The API request failed: {0}")]
    Transport(String),
}

/// Map an HTTP status to the error taxonomy. `Ok(())` only for 200.
pub fn classify_status(status: u16) -> Result<(), ApiError> {
    match status {
        200 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        429 => Err(ApiError::RateLimited),
        s if s >= 500 => Err(ApiError::Server(s)),
        s => Err(ApiError::Unexpected(s)),
    }
}

/// Contract between the domain handlers and the remote API.
pub trait RivalsApi: Send + Sync {
    /// Fetch a hero record by slug (e.g. `ironman`).
    fn fetch_hero(&self, api_key: &str, slug: &str)
        -> BoxFuture<'static, Result<Value, ApiError>>;

    /// Fetch a player record by name.
    fn fetch_player(
        &self,
        api_key: &str,
        name: &str,
    ) -> BoxFuture<'static, Result<Value, ApiError>>;
}

/// Production implementation over HTTP.
pub struct HttpRivalsApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRivalsApi {
    /// Create a client against the production base URL.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn get_json(&self, url: String, api_key: &str) -> BoxFuture<'static, Result<Value, ApiError>> {
        let request = self.http.get(&url).header(API_KEY_HEADER, api_key);

        Box::pin(async move {
            tracing::debug!(url = %url, "sending API request");

            let response = request.send().await.map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout
                } else {
                    ApiError::Transport(e.to_string())
                }
            })?;

            classify_status(response.status().as_u16())?;

            response
                .json::<Value>()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))
        })
    }
}

impl RivalsApi for HttpRivalsApi {
    fn fetch_hero(
        &self,
        api_key: &str,
        slug: &str,
    ) -> BoxFuture<'static, Result<Value, ApiError>> {
        self.get_json(format!("{}/heroes/hero/{}", self.base_url, slug), api_key)
    }

    fn fetch_player(
        &self,
        api_key: &str,
        name: &str,
    ) -> BoxFuture<'static, Result<Value, ApiError>> {
        self.get_json(format!("{}/player/{}", self.base_url, name), api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status_ok() {
        assert!(classify_status(200).is_ok());
    }

    #[test]
    fn test_classify_status_taxonomy() {
        assert_eq!(classify_status(401), Err(ApiError::Unauthorized));
        assert_eq!(classify_status(404), Err(ApiError::NotFound));
        assert_eq!(classify_status(429), Err(ApiError::RateLimited));
        assert_eq!(classify_status(500), Err(ApiError::Server(500)));
        assert_eq!(classify_status(503), Err(ApiError::Server(503)));
        assert_eq!(classify_status(302), Err(ApiError::Unexpected(302)));
        assert_eq!(classify_status(418), Err(ApiError::Unexpected(418)));
    }

    #[test]
    fn test_distinct_messages_per_class() {
        let messages = [
            ApiError::Unauthorized.to_string(),
            ApiError::NotFound.to_string(),
            ApiError::RateLimited.to_string(),
            ApiError::Server(500).to_string(),
            ApiError::Unexpected(302).to_string(),
            ApiError::Timeout.to_string(),
        ];

        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_not_found_reads_as_not_found() {
        assert!(ApiError::NotFound.to_string().contains("not found"));
    }
}
