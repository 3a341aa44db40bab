pub mod app;
pub mod config;
pub mod server;
pub mod services;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use config::AppConfig;
use services::log_buffer::LogCaptureLayer;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Install the global subscriber: env filter, console output and the
/// in-memory capture behind `/api/logs`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(LogCaptureLayer::new())
        .init();
}

/// Load environment and runtime config.
pub fn init_foundation() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();

    let config = AppConfig::load();
    let addr = config.bind_addr()?;

    tracing::info!(%addr, log_limit = config.log_limit, "Settings loaded");
    Ok(config)
}
