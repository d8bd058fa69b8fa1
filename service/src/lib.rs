//! Image transform service: HTTP binding, worker pool, and configuration.

pub mod app;
pub mod config;
pub mod server;
pub mod services;

use config::ServiceConfig;

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load environment and resolve the service configuration.
pub fn init_foundation() -> Result<ServiceConfig, anyhow::Error> {
    load_dotenv();
    let config = ServiceConfig::load()?;
    tracing::info!(
        addr = %config.listen_addr(),
        workers = config.max_workers,
        queue_capacity = config.queue_capacity,
        canny_low = config.canny_low,
        canny_high = config.canny_high,
        "Configuration loaded"
    );
    Ok(config)
}
