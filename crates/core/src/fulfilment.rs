//! Webhook fulfilment.
//!
//! One inbound payload produces exactly one reply: intake, render, one upstream call raced
//! against the configured timeout, sanitise. Every failure is absorbed here and turned into the
//! fixed fallback text, so the transport layer never sees an error.

use crate::config::CoreConfig;
use crate::constants::{FALLBACK_TEXT, NO_ANSWER_TEXT};
use crate::prompt::PromptText;
use crate::upstream::{GeminiClient, TextGenerator};
use crate::{intake, prompt, sanitise, RelayError, RelayResult};
use api_shared::WebhookRes;
use serde_json::Value;
use std::sync::Arc;

/// Turns webhook payloads into fulfillment replies. Cheap to clone and shared across requests.
#[derive(Clone)]
pub struct FulfilmentService {
    cfg: Arc<CoreConfig>,
    generator: Arc<dyn TextGenerator>,
}

impl FulfilmentService {
    pub fn new(cfg: Arc<CoreConfig>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { cfg, generator }
    }

    /// Creates a service backed by the Gemini endpoint configured in `cfg`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built for the configured endpoint.
    pub fn with_gemini(cfg: Arc<CoreConfig>) -> RelayResult<Self> {
        let client = GeminiClient::new(&cfg)?;
        tracing::debug!("Using upstream endpoint {}", client.endpoint());
        Ok(Self::new(cfg, Arc::new(client)))
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Produce the reply for one webhook payload. Never fails.
    ///
    /// # Returns
    /// * the sanitised model answer on success
    /// * the sanitised "unable to generate" text if the model answered without text
    /// * the fallback retry text if the upstream call failed or timed out
    pub async fn fulfil(&self, payload: &Value) -> WebhookRes {
        let req = intake::extract(payload, &self.cfg);
        tracing::debug!(
            query_type = %req.query_type,
            language = %req.language,
            "fulfilling webhook query"
        );

        let prompt = prompt::render(&req);
        match self.answer(&prompt).await {
            Ok(answer) => WebhookRes::new(sanitise::clean(&answer)),
            Err(e) => {
                tracing::error!("Fulfilment error: {}", e);
                WebhookRes::new(FALLBACK_TEXT)
            }
        }
    }

    /// Ask the upstream once, waiting at most the configured timeout.
    ///
    /// On timeout the upstream future is dropped, which aborts its HTTP request. A missing or
    /// blank answer is replaced with the fixed "unable to generate" text.
    ///
    /// # Errors
    /// Returns `RelayError::UpstreamTimeout` if the budget runs out, or the upstream error.
    pub async fn answer(&self, prompt: &PromptText) -> RelayResult<String> {
        let budget = self.cfg.upstream_timeout();
        let generated = tokio::time::timeout(budget, self.generator.generate(prompt.as_str()))
            .await
            .map_err(|_| RelayError::UpstreamTimeout(budget))??;

        match generated.filter(|text| !text.trim().is_empty()) {
            Some(text) => Ok(text),
            None => {
                tracing::warn!("upstream answered without candidate text");
                Ok(NO_ANSWER_TEXT.to_string())
            }
        }
    }
}
