//! Dog CEO API client
//!
//! - Effect handler calls `DogApi::fetch_random` from a spawned task
//! - The task turns the `Result` into `DogDidLoad` / `DogDidError`
//! - No async in reducer or components

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Random image endpoint of the Dog CEO API
pub const DEFAULT_ENDPOINT: &str = "https://dog.ceo/api/breeds/image/random";

/// Errors from a single fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API reported status {status:?}")]
    Api { status: String },

    #[error("response is not an image URL: {0}")]
    NotAnImage(String),
}

/// Response body of the random image endpoint
#[derive(Debug, Deserialize)]
struct RandomImageResponse {
    message: String,
    status: Option<String>,
}

/// HTTP client bound to one endpoint
#[derive(Clone, Debug)]
pub struct DogApi {
    client: reqwest::Client,
    endpoint: String,
}

impl DogApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue one GET and extract the image URL
    pub async fn fetch_random(&self) -> Result<String, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching random dog");

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        parse_random_image(&body)
    }
}

impl Default for DogApi {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

fn parse_random_image(body: &str) -> Result<String, FetchError> {
    let data: RandomImageResponse = serde_json::from_str(body)?;

    if let Some(status) = data.status {
        if status != "success" {
            return Err(FetchError::Api { status });
        }
    }

    let url = data.message.trim();
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(url.to_string())
    } else {
        Err(FetchError::NotAnImage(data.message))
    }
}
