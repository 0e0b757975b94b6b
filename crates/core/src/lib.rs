//! # Vaidya Core
//!
//! Core logic for the Vaidya webhook relay.
//!
//! This crate turns one webhook payload into one fulfillment reply:
//! - request intake with total defaulting (`intake`)
//! - prompt rendering from per-language templates (`prompt`)
//! - one upstream text-generation call under a timeout (`upstream`, `fulfilment`)
//! - sanitisation of the model's answer (`sanitise`)
//!
//! **No API concerns**: HTTP routing, CORS and OpenAPI documentation belong in `api-rest`;
//! shared wire types live in `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod fulfilment;
pub mod intake;
pub mod profile;
pub mod prompt;
pub mod query;
pub mod sanitise;
pub mod upstream;

pub use api_shared::WebhookRes;
pub use config::CoreConfig;
pub use error::{RelayError, RelayResult};
pub use fulfilment::FulfilmentService;
pub use profile::{Profile, ProfileSource};
pub use prompt::{render, PromptText};
pub use query::{Language, PromptRequest, QueryType};
pub use sanitise::clean;
pub use upstream::{GeminiClient, TextGenerator};
