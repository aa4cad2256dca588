//! HTTP gateway
//!
//! Builds the axum router over shared application state and runs the
//! listener. Requests are independent; the only shared mutable resource is
//! the session log behind [`SessionStore`].

pub mod error;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use routes::{ChatRequest, ChatResponse, LIVENESS_MESSAGE};

use crate::config::Config;
use crate::error::Result;
use crate::knowledge::KnowledgeLoader;
use crate::providers::{create_provider, Provider};
use crate::storage::{JsonFileStore, SessionStore};

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Language-model backend
    pub provider: Arc<dyn Provider>,
    /// Session log
    pub store: Arc<dyn SessionStore>,
    /// Knowledge document reader
    pub knowledge: KnowledgeLoader,
}

impl AppState {
    /// Assemble state from explicit collaborators
    pub fn new(
        provider: Arc<dyn Provider>,
        store: Arc<dyn SessionStore>,
        knowledge: KnowledgeLoader,
    ) -> Self {
        Self {
            provider,
            store,
            knowledge,
        }
    }

    /// Assemble state from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be created
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider: Arc<dyn Provider> = Arc::from(create_provider(&config.provider)?);
        let store = JsonFileStore::new(&config.storage.session_log)
            .with_max_sessions(config.storage.max_sessions);

        Ok(Self::new(
            provider,
            Arc::new(store),
            KnowledgeLoader::new(&config.knowledge.path),
        ))
    }
}

/// Build the gateway router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::home))
        .route("/chat", post(routes::chat))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the gateway server and run until interrupted
///
/// # Errors
///
/// Returns error if the address is invalid, the listener cannot bind, or the
/// server fails
pub async fn start_server(config: &Config) -> Result<()> {
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    let state = AppState::from_config(config)?;
    if !state.provider.has_credentials() {
        tracing::warn!(
            "No API key configured for provider '{}'; chat requests will fail until GOOGLE_API_KEY is set",
            state.provider.name()
        );
    }
    tracing::info!(
        knowledge = %config.knowledge.path.display(),
        session_log = %config.storage.session_log.display(),
        "Serving model {}",
        state.provider.model()
    );

    let router = build_router(state);

    tracing::info!("Starting CareGP Chat on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("CareGP Chat stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
