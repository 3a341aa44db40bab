//! Local web server for the QR code generator.
//!
//! Serves the browser page and the generate/download/reset API, then runs
//! until Ctrl+C.

use qr_studio_lib::app::SharedState;
use qr_studio_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    qr_studio_lib::init_tracing();

    tracing::info!("Starting QR Studio");

    let config = qr_studio_lib::init_foundation()?;
    let state = SharedState::new(config);

    server::start_server(state).await?;

    tracing::info!("Shut down");
    Ok(())
}
