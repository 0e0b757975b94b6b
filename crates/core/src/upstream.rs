//! Upstream text generation.
//!
//! [`TextGenerator`] is the seam between the fulfilment service and the model provider.
//! [`GeminiClient`] talks to the Gemini `generateContent` endpoint with one POST per call; no
//! retries are made. The timeout is applied by the caller, and dropping the returned future
//! aborts the HTTP request.

use crate::config::CoreConfig;
use crate::{RelayError, RelayResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Something that turns a prompt into model text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`.
    ///
    /// # Returns
    /// * `Ok(Some(text))` - the model answered with text
    /// * `Ok(None)` - the model answered without any candidate text
    ///
    /// # Errors
    /// Returns a `RelayError::Upstream*` variant if the request fails, the upstream answers
    /// with a non-success status, or its body cannot be decoded.
    async fn generate(&self, prompt: &str) -> RelayResult<Option<String>>;
}

/// Gemini `generateContent` client authenticated with a query-string API key.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: reqwest::Url,
    api_key: String,
}

impl GeminiClient {
    /// Build a client for the endpoint and key in `cfg`.
    ///
    /// # Errors
    /// Returns `RelayError::InvalidEndpoint` if the configured URL does not parse, or
    /// `RelayError::HttpClient` if the TLS backend cannot be initialised.
    pub fn new(cfg: &CoreConfig) -> RelayResult<Self> {
        let endpoint = reqwest::Url::parse(cfg.api_url())
            .map_err(|e| RelayError::InvalidEndpoint(format!("{}: {e}", cfg.api_url())))?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(RelayError::HttpClient)?;

        Ok(Self {
            http,
            endpoint,
            api_key: cfg.api_key().to_string(),
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> RelayResult<Option<String>> {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            // The URL carries the key, so it must not reach the error text.
            .map_err(|e| RelayError::UpstreamRequest(e.without_url()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RelayError::UpstreamStatus { status, body });
        }

        let data = resp
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| RelayError::UpstreamDecode(e.without_url()))?;
        Ok(data.first_text().map(str::to_string))
    }
}

// Request/Response types

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

/// Response body. Every level is defaulted so a reply without candidates still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if it has any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
