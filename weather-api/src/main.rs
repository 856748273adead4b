//! Binary crate for the weather lookup HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Loading configuration from the environment (with optional `.env`)
//! - Wiring the axum router to the core query handler

use std::sync::Arc;

use clap::Parser;
use weather_core::{Config, OpenWeatherProvider, QueryHandler};

mod cli;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; already-exported variables win over file values.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_api=info,weather_core=info".into()),
        )
        .init();

    let args = cli::Args::parse();
    let config = Config::from_env()?;

    let provider = Arc::new(OpenWeatherProvider::new());
    let handler = Arc::new(QueryHandler::new(&config, provider));

    let app = routes::router(handler);
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!(bind = %args.bind, zone = %config.time_zone, "weather service listening");

    axum::serve(listener, app).await?;

    Ok(())
}
