use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("upstream API key is missing or blank")]
    MissingApiKey,
    #[error("invalid upstream endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),

    #[error("request to upstream failed: {0}")]
    UpstreamRequest(reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode upstream response: {0}")]
    UpstreamDecode(reqwest::Error),
    #[error("upstream did not answer within {0:?}")]
    UpstreamTimeout(Duration),
}

pub type RelayResult<T> = std::result::Result<T, RelayError>;
