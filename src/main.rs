use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use vaidya_core::config::{rest_addr_from_env_values, ENV_PORT, ENV_REST_ADDR};
use vaidya_core::{CoreConfig, FulfilmentService};

/// Main entry point for the Vaidya webhook relay
///
/// Resolves configuration once from the environment (and `.env`), then serves the REST API
/// until the process exits.
///
/// # Environment Variables
/// - `GEMINI_API_KEY`: upstream API key (required)
/// - `GEMINI_API_URL`: upstream `generateContent` endpoint (default: Gemini 2.0 Flash)
/// - `VAIDYA_REST_ADDR`: listen address (default: "0.0.0.0:$PORT")
/// - `PORT`: listen port when `VAIDYA_REST_ADDR` is unset (default: 3000)
/// - `VAIDYA_UPSTREAM_TIMEOUT_MS`, `VAIDYA_DEFAULT_LANGUAGE`, `VAIDYA_PROFILE_SOURCE`,
///   `VAIDYA_DEFAULT_AGE`, `VAIDYA_DEFAULT_ALLERGIES`, `VAIDYA_DEFAULT_CONDITIONS`,
///   `VAIDYA_MAX_ITEM_CHARS`: see `vaidya_core::config`
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is missing or invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vaidya_run=info".parse()?)
                .add_directive("vaidya_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(CoreConfig::from_env_lookup(|key| std::env::var(key).ok())?);
    let rest_addr = rest_addr_from_env_values(
        std::env::var(ENV_REST_ADDR).ok(),
        std::env::var(ENV_PORT).ok(),
    )?;

    tracing::info!(
        "++ Starting Vaidya REST on {} (upstream timeout {:?}, default language {})",
        rest_addr,
        cfg.upstream_timeout(),
        cfg.default_language()
    );

    let state = AppState {
        fulfilment: FulfilmentService::with_gemini(cfg)?,
    };
    let app = api_rest::router(state);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
