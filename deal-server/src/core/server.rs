//! Server Implementation
//!
//! HTTP 服务器启动和管理

use crate::core::{Config, Result, ServerState};
use crate::services::{build_router, serve};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<()> {
        let state = self.state.clone();
        let tasks = state.start_background_tasks();

        tracing::info!(
            products = state.catalog.len(),
            last_updated = %state.catalog.last_updated().to_rfc3339(),
            environment = %self.config.environment,
            "🛍️ Deal server ready on port {}",
            self.config.http_port
        );

        let app = build_router(state.clone());
        let result = serve(self.config.http_port, app, shutdown_signal()).await;

        if tasks.check_health() > 0 {
            tracing::warn!("Some background tasks exited before shutdown");
        }
        tasks.shutdown(self.config.shutdown_timeout()).await;

        result
    }
}

/// Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
    tracing::info!("Shutting down...");
}
