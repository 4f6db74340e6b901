use crate::extractor::Extractor;
use crate::utils::config::ServerSettings;
use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod routes_api;

pub use error::ApiError;

/// Shared application context
///
/// Holds no per-request state; every extraction result lives only for the
/// request that produced it.
#[derive(Clone)]
pub struct AppContext {
    pub extractor: Arc<dyn Extractor>,
}

impl AppContext {
    pub fn new(extractor: Arc<dyn Extractor>) -> Self {
        Self { extractor }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes_api::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Start the HTTP server
pub async fn start_server(settings: ServerSettings, extractor: Arc<dyn Extractor>) -> Result<()> {
    let addr = settings.bind_addr().await?;

    tracing::info!("Using extractor: {}", extractor.id());
    let app = create_router(AppContext::new(extractor));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix. If no handler can be installed the
/// server runs until killed.
///
/// The SIGTERM handler is installed on call, not on first poll.
fn shutdown_signal() -> impl Future<Output = ()> {
    #[cfg(unix)]
    let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(stream) => Some(stream),
        Err(e) => {
            tracing::warn!("SIGTERM handler unavailable, stopping on Ctrl+C only: {}", e);
            None
        }
    };

    async move {
        #[cfg(unix)]
        let terminated = async {
            match sigterm.as_mut() {
                Some(stream) => stream.recv().await.map(|_| "SIGTERM"),
                None => None,
            }
        };
        #[cfg(not(unix))]
        let terminated = async { None::<&str> };

        let interrupted = async {
            match signal::ctrl_c().await {
                Ok(()) => Some("Ctrl+C"),
                Err(e) => {
                    tracing::warn!("Ctrl+C handler unavailable: {}", e);
                    None
                }
            }
        };

        // A source that failed to install drops out; with both gone, wait forever
        let received = tokio::select! {
            Some(name) = interrupted => name,
            Some(name) = terminated => name,
            else => std::future::pending().await,
        };

        tracing::info!("{} received, shutting down", received);
    }
}
