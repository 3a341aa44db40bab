pub mod api;
pub mod assets;
pub mod router;

use crate::app::SharedState;
use anyhow::Result;

/// Start the axum HTTP server and run until Ctrl+C.
pub async fn start_server(state: SharedState) -> Result<()> {
    let addr = state.config().bind_addr()?;
    let app = router::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("QR Studio listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}
