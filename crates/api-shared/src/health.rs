use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Simple health service that can be used by the REST API and the CLI
///
/// The relay holds no connections or storage of its own, so being able to answer is the whole
/// of its health.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the relay is able to serve.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Vaidya is alive".into(),
        }
    }
}
