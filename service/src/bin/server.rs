//! Image transform server binary.
//!
//! Starts the axum server and the transform worker pool, then waits for
//! Ctrl+C to shut down gracefully.

use tracing_subscriber::EnvFilter;

use image_service_lib::app::SharedState;
use image_service_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting image transform service");

    let config = image_service_lib::init_foundation()?;
    let state = SharedState::new(config);

    let server_state = state.clone();
    let mut server_handle = tokio::spawn(async move { server::start_server(server_state).await });

    tracing::info!(
        port = state.server_port(),
        "Image service running. Press Ctrl+C to stop."
    );

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutting down...");
        }
        result = &mut server_handle => {
            // Server exited on its own, e.g. the port was taken
            return result?;
        }
    }

    state.shutdown_token().cancel();
    server_handle.await??;
    Ok(())
}
