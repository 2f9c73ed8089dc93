use axum::{
    routing::{get, post},
    Router,
};
use finplan_core::config::ServerConfig;
use finplan_core::llm::LlmClient;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::{routes, static_files};

#[derive(Clone)]
pub struct AppState {
    // None when OPENAI_API_KEY is absent.
    llm: Option<Arc<dyn LlmClient>>,
}

impl AppState {
    pub fn new(llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self { llm }
    }

    pub fn provider_configured(&self) -> bool {
        self.llm.is_some()
    }

    pub fn llm(&self) -> Result<&dyn LlmClient, ApiError> {
        self.llm.as_deref().ok_or(ApiError::NotConfigured)
    }
}

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/chat", post(routes::chat))
        .route("/api/recommendations", post(routes::recommendations))
        .with_state(state);

    let app = if config.serve_static {
        app.fallback_service(static_files::service(&config.static_root))
    } else {
        app
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
