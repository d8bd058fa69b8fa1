pub mod api;
pub mod router;

use crate::app::SharedState;
use anyhow::Result;
use tokio::net::TcpListener;

/// Bind the configured address and serve until shutdown.
pub async fn start_server(state: SharedState) -> Result<()> {
    let addr = state.config().listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Image service listening on http://{}", addr);
    serve(listener, state).await
}

/// Serve on an already-bound listener until the shutdown token is cancelled.
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    let shutdown_token = state.shutdown_token().clone();
    let app = router::create_router(state);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move { shutdown_token.cancelled().await })
        .await?;

    tracing::info!("Image service stopped");
    Ok(())
}
