//! # API Shared
//!
//! Shared wire types and services for the Vaidya APIs.
//!
//! Contains:
//! - Webhook request/response bodies (`webhook` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`, `vaidya-core` and the CLI so that every surface speaks the same shape.

pub mod health;
pub mod webhook;

pub use health::{HealthRes, HealthService};
pub use webhook::{Parameters, QueryResult, WebhookReq, WebhookRes};
