use crate::api::routes;
use crate::llm::LlmClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Binds the HTTP bridge on `0.0.0.0:port` and serves until the process stops
pub async fn launch_server(port: u16, client: LlmClient) -> Result<(), std::io::Error> {
    let app = routes::app(Arc::new(client));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
