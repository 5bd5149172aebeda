//! In-memory providers for unit tests.

use super::InferenceProvider;
use crate::errors::RunError;
use crate::llm::{ChatMessage, InferenceResponse};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Provider answering from a fixed queue and recording every call.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<Vec<Result<InferenceResponse, RunError>>>,
    pub calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl ScriptedProvider {
    /// Replies are handed out in the given order; once exhausted, `null` bodies follow.
    pub fn replying(replies: Vec<Result<InferenceResponse, RunError>>) -> Self {
        ScriptedProvider {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl InferenceProvider for ScriptedProvider {
    fn endpoint(&self, model: &str) -> String {
        format!("scripted://{}", model)
    }

    async fn run(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<InferenceResponse, RunError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(InferenceResponse::new(200, Value::Null)))
    }
}

/// Lets a test keep a handle on a provider owned by the client.
#[derive(Debug)]
pub struct SharedProvider(pub Arc<ScriptedProvider>);

#[async_trait]
impl InferenceProvider for SharedProvider {
    fn endpoint(&self, model: &str) -> String {
        self.0.endpoint(model)
    }

    async fn run(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<InferenceResponse, RunError> {
        self.0.run(model, messages).await
    }
}

/// A successful Workers AI envelope carrying `text`.
pub fn text_reply(text: &str) -> Result<InferenceResponse, RunError> {
    Ok(InferenceResponse::new(
        200,
        json!({"result": {"response": text}, "success": true, "errors": [], "messages": []}),
    ))
}
