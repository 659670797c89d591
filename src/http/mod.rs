use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{delete, get, post},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::HabitService;

mod error;
mod handlers;
mod pages;

/// Build the router for the full HTTP surface: JSON API plus the three
/// server-rendered pages.
pub fn router(service: Arc<HabitService>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/report", get(pages::report))
        .route("/maintenance", get(pages::maintenance))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route("/api/log", post(handlers::log_occurrence))
        .route("/api/log/manual", post(handlers::log_manual))
        .route("/api/log/{id}", delete(handlers::delete_log))
        .route("/api/habit/{id}", delete(handlers::delete_habit))
        .route("/api/stats", get(handlers::stats))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve the application until SIGINT/SIGTERM.
pub async fn serve(service: Arc<HabitService>, port: u16) -> Result<()> {
    let app = router(service);

    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
