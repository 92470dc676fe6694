pub mod app;
pub mod handlers;

use anyhow::Result;
use tracing::info;

pub async fn start_server(port: u16, app: axum::Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
