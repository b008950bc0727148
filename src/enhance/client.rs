//! EnhanceClient - sends ASCII art to a Gemini-compatible text generator.

use std::time::Duration;

use super::prompt::{EnhancedOutput, GenerateContentRequest, GenerateContentResponse};
use super::sanitize::sanitize;

/// The environment variable name for the generator API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default base URL for the generator API.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model for enhancement.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Default connection timeout (10 seconds).
///
/// There is no overall request timeout; callers decide how long to wait.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP status code for rate limiting.
const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Parse the Retry-After header as integer seconds.
fn parse_retry_after(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
}

/// Client for the remote ASCII art enhancer.
pub struct EnhanceClient {
    api_key: String,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl EnhanceClient {
    /// Create a new EnhanceClient by reading the API key from environment.
    ///
    /// # Errors
    ///
    /// Returns `EnhanceError::MissingApiKey` if `GEMINI_API_KEY` is not set.
    pub fn new() -> Result<Self, EnhanceError> {
        let api_key =
            std::env::var(GEMINI_API_KEY_ENV).map_err(|_| EnhanceError::MissingApiKey)?;
        Self::with_api_key(api_key)
    }

    /// Create a new EnhanceClient with an explicit API key.
    pub fn with_api_key(api_key: String) -> Result<Self, EnhanceError> {
        if api_key.is_empty() {
            return Err(EnhanceError::MissingApiKey);
        }

        let http_client = reqwest::Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            api_key,
            base_url: GEMINI_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            http_client,
        })
    }

    /// Point the client at a different API host (e.g. a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Enhance ASCII art through the remote generator.
    ///
    /// The input is sanitized before it is sent and the generator's output is
    /// sanitized the same way before it is returned, so the result only holds
    /// printable ASCII, line breaks and the four block glyphs. Exactly one
    /// request is made; nothing is retried.
    ///
    /// # Errors
    ///
    /// - `EnhanceError::EmptyInput` if the art is blank
    /// - `EnhanceError::RateLimit` on HTTP 429
    /// - `EnhanceError::ApiError` for other non-success statuses
    /// - `EnhanceError::EmptyResponse` if no output text came back
    /// - `EnhanceError::MalformedResponse` if the output is not the expected JSON
    /// - `EnhanceError::HttpError` if the request itself fails
    pub async fn enhance(&self, art: &str) -> Result<String, EnhanceError> {
        let input = sanitize(art);
        if input.trim().is_empty() {
            return Err(EnhanceError::EmptyInput);
        }

        log::info!(
            "Requesting enhancement from {} ({} chars)",
            self.model,
            input.chars().count()
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .header("Content-Type", "application/json")
            .json(&GenerateContentRequest::for_art(&input))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();

            if status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS {
                let retry_after_secs = parse_retry_after(&response);
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Rate limit exceeded".to_string());
                log::warn!(
                    "Rate limited by enhancement API. Retry-After: {:?} seconds",
                    retry_after_secs
                );
                return Err(EnhanceError::RateLimit {
                    message: error_text,
                    retry_after_secs,
                });
            }

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::warn!("Enhancement request failed with status {}", status);
            return Err(EnhanceError::ApiError(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body.first_text().ok_or(EnhanceError::EmptyResponse)?;

        let output: EnhancedOutput = serde_json::from_str(text)
            .map_err(|e| EnhanceError::MalformedResponse(e.to_string()))?;

        match output.enhanced_ascii_art {
            Some(art) if !art.trim().is_empty() => Ok(sanitize(&art)),
            _ => Err(EnhanceError::EmptyResponse),
        }
    }
}

/// Errors that can occur during enhancement.
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error("API key not configured (set {})", GEMINI_API_KEY_ENV)]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {message}")]
    RateLimit {
        /// Human-readable rate limit message
        message: String,
        /// Retry-After header value in seconds, if provided
        retry_after_secs: Option<u64>,
    },

    #[error("AI did not return an output for ASCII enhancement")]
    EmptyResponse,

    #[error("Malformed enhancement response: {0}")]
    MalformedResponse(String),

    #[error("Nothing to enhance")]
    EmptyInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_api_key_creates_client() {
        let client = EnhanceClient::with_api_key("test-api-key".to_string()).unwrap();
        assert_eq!(client.api_key(), "test-api-key");
        assert_eq!(client.base_url(), GEMINI_API_BASE_URL);
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_with_api_key_empty_returns_error() {
        let result = EnhanceClient::with_api_key(String::new());
        assert!(matches!(result, Err(EnhanceError::MissingApiKey)));
    }

    #[test]
    fn test_builders() {
        let client = EnhanceClient::with_api_key("k".to_string())
            .unwrap()
            .with_base_url("http://localhost:1234/")
            .with_model("custom-model");
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert_eq!(client.model(), "custom-model");
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/custom-model:generateContent"
        );
    }

    #[tokio::test]
    async fn test_blank_input_rejected_without_request() {
        // Unroutable base URL: reaching the network would fail differently
        let client = EnhanceClient::with_api_key("k".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let result = client.enhance("😀😀\n  ").await;
        assert!(matches!(result, Err(EnhanceError::EmptyInput)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EnhanceError::EmptyResponse.to_string(),
            "AI did not return an output for ASCII enhancement"
        );
        assert!(EnhanceError::MissingApiKey
            .to_string()
            .contains(GEMINI_API_KEY_ENV));
    }
}
