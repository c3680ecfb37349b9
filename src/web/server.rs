//! Status server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the status and health handlers
//! - Wire up middleware (request timeout, tracing)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::cluster::ops::ClusterOps;
use crate::config::schema::WebConfig;
use crate::seeder::executor::SeedExecutor;
use crate::seeder::plan::SeedPlan;
use crate::web::handlers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<SeedExecutor<Arc<dyn ClusterOps>>>,
    pub plan: Arc<SeedPlan>,
}

/// The status web server.
pub struct WebServer {
    router: Router,
}

impl WebServer {
    /// Create a new server over the given state.
    pub fn new(state: AppState, config: &WebConfig) -> Self {
        let router = Router::new()
            .route("/", get(handlers::index))
            .route("/healthz", get(handlers::healthz))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Status server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Status server stopped");
        Ok(())
    }
}
