//! API routes configuration module

use crate::api::handlers::{health, list_actions, run_action, run_conversation};
use crate::llm::LlmClient;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

/// Creates the router, sharing one inference client across handlers
pub fn app(client: Arc<LlmClient>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/run", post(run_conversation))
        .route("/actions", get(list_actions))
        .route("/actions/:action", post(run_action))
        .layer(Extension(client))
}
