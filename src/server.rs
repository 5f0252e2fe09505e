// 🌐 Placeholder Backend - one static route
//
// GET / -> 200 "hello world" (text/plain). Nothing else is routed and
// nothing is stored server-side.

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const GREETING: &str = "hello world";

/// GET / - Static greeting
async fn hello_world() -> &'static str {
    GREETING
}

/// Build the application router
pub fn router() -> Router {
    Router::new()
        .route("/", get(hello_world))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, router()).await?;
    Ok(())
}
