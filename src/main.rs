//! docmine - configuration backend for document extraction pipelines.
//!
//! Stores the per-source configuration an extraction pipeline consumes:
//! extraction profiles, field definitions, normalization rules, and
//! prompt templates.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docmine::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "docmine=info"
    } else {
        "docmine=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
