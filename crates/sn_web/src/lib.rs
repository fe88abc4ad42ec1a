use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod error;
pub mod handlers;
pub mod service;
pub mod state;

#[cfg(test)]
mod test_support;

pub use service::ArticleService;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/articles", get(handlers::list_articles))
        .route("/articles/:id", get(handlers::get_article))
        .route("/fetch-news", post(handlers::fetch_news))
        .route("/translate-article/:id", post(handlers::translate_article))
        .route("/translate-all", post(handlers::translate_all))
        .route("/stats", get(handlers::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl-C handler");
    }
    info!("shutting down");
}

pub mod prelude {
    pub use crate::service::{ArticleService, FetchRequest, TranslateOutcome};
    pub use crate::{create_app, serve, AppState};
    pub use sn_core::{Article, Error, Result};
}
