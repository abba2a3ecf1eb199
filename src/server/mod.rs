//! HTTP surface of the tutor: dashboard page plus a small JSON API.
//!
//! Routes:
//!   - `GET  /`         dashboard
//!   - `POST /chat`     ask the tutor
//!   - `POST /clear`    reset conversation and stats
//!   - `GET  /progress` session summary
//!   - `GET  /stats`    dashboard counters
//!   - `GET  /health`   liveness check

pub mod dashboard;
pub mod handlers;
pub mod stats;

use crate::core::tutor::QuantumTutorAgent;
use crate::server::stats::SessionStats;
use crate::utils::error::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::trace::TraceLayer;

pub struct AppState {
    agent: tokio::sync::Mutex<QuantumTutorAgent>,
    stats: Mutex<SessionStats>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(agent: QuantumTutorAgent) -> SharedState {
        Arc::new(Self {
            agent: tokio::sync::Mutex::new(agent),
            stats: Mutex::new(SessionStats::new()),
        })
    }

    /// Held across the LLM call so each conversation turn sees a consistent memory.
    pub async fn agent(&self) -> tokio::sync::MutexGuard<'_, QuantumTutorAgent> {
        self.agent.lock().await
    }

    /// Never held across an `.await`, so `/stats` does not wait on the LLM.
    pub fn stats(&self) -> MutexGuard<'_, SessionStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chat", post(handlers::chat))
        .route("/clear", post(handlers::clear))
        .route("/progress", get(handlers::progress))
        .route("/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `listen_addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(listen_addr: &str, state: SharedState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(
        "🚀 Starting Quantum Tutor Web Dashboard on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("quantum-tutor shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("received shutdown signal");
}
