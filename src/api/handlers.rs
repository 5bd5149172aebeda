use crate::actions::WritingAction;
use crate::api::errors::{api_error, ApiError};
use crate::llm::{ChatMessage, LlmClient};
use axum::http::StatusCode;
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Request payload for a raw conversation run
#[derive(Deserialize)]
pub struct RunRequest {
    /// Overrides the configured model for this request only
    #[serde(default)]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
}

/// Upstream status and decoded body, passed through as received
#[derive(Serialize)]
pub struct RunResponse {
    pub request_id: String,
    pub status: u16,
    pub body: Value,
}

#[derive(Deserialize)]
pub struct ActionRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct ActionResponse {
    pub request_id: String,
    pub action: String,
    pub output: String,
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Runs a conversation and returns the endpoint's reply untouched.
///
/// A 2xx reply whose envelope reports `success: false` is still returned with
/// its status, so the caller sees exactly what the endpoint said.
pub async fn run_conversation(
    Extension(client): Extension<Arc<LlmClient>>,
    Json(payload): Json<RunRequest>,
) -> Result<Json<RunResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let model = payload.model.as_deref().unwrap_or(client.model());
    info!(%request_id, model, "Relaying {} messages", payload.messages.len());

    let response = client
        .run_with_model(model, &payload.messages)
        .await
        .map_err(|e| {
            warn!(%request_id, "Run failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(RunResponse {
        request_id,
        status: response.status,
        body: response.body,
    }))
}

/// Applies a writing preset to the posted text.
pub async fn run_action(
    Path(action): Path<String>,
    Extension(client): Extension<Arc<LlmClient>>,
    Json(payload): Json<ActionRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let action: WritingAction = action
        .parse()
        .map_err(|e: String| api_error(StatusCode::NOT_FOUND, &e))?;
    let request_id = Uuid::new_v4().to_string();
    info!(%request_id, action = action.slug(), "Applying preset");

    let output = action.apply(&client, &payload.text).await.map_err(|e| {
        warn!(%request_id, "Preset failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(ActionResponse {
        request_id,
        action: action.slug().to_string(),
        output,
    }))
}

/// Lists the available presets.
pub async fn list_actions() -> Json<Value> {
    let actions: Vec<Value> = WritingAction::ALL
        .into_iter()
        .map(|a| json!({"name": a.slug(), "title": a.title()}))
        .collect();
    Json(Value::Array(actions))
}
