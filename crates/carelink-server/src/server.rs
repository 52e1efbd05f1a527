use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{self, ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Carelink API server.
pub struct CarelinkServer {
    config: ServerConfig,
    state: AppState,
}

impl CarelinkServer {
    /// Create a server with fresh, empty state.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_state(config, AppState::new())
    }

    /// Create a server over existing state (pre-seeded data, tests).
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        error::set_environment(config.environment);
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("Carelink API listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = CarelinkServer::new(ServerConfig::default());
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:5000".parse().unwrap()
        );
    }

    #[test]
    fn router_builds() {
        let server = CarelinkServer::new(ServerConfig::default());
        let _router = server.router();
    }
}
