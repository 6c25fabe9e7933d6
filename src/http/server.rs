//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the exposition handler
//! - Wire up middleware (tracing)
//! - Bind server to listener
//! - Encode the registry on every scrape
//!
//! # Design Decisions
//! - A single GET route; every other path is 404
//! - Scrapes never block the poller; the registry is internally synchronized

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use prometheus::Registry;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
}

/// HTTP server exposing the metrics registry.
pub struct MetricsServer {
    router: Router,
    metrics_path: String,
}

impl MetricsServer {
    /// Create a server serving `registry` at `metrics_path`.
    ///
    /// `metrics_path` must be a literal route starting with `/`; config
    /// validation rejects anything else.
    pub fn new(registry: Registry, metrics_path: &str) -> Self {
        let router = Router::new()
            .route(metrics_path, get(metrics_handler))
            .with_state(AppState { registry })
            .layer(TraceLayer::new_for_http());

        Self {
            router,
            metrics_path: metrics_path.to_string(),
        }
    }

    /// The configured router, for serving or in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.metrics_path,
            "Metrics server listening on http://{}{}",
            addr,
            self.metrics_path
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Metrics server stopped");
        Ok(())
    }
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match metrics::encode(&state.registry) {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Encoding metrics failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Encoding metrics failed").into_response()
        }
    }
}
