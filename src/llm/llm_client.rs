use crate::config::RunnerConfig;
use crate::constants::{PING_MESSAGE, PING_MODEL};
use crate::errors::RunError;
use crate::llm::providers::cloudflare::CloudflareProvider;
use crate::llm::providers::InferenceProvider;
use crate::llm::{ChatMessage, InferenceResponse};
use serde_json::Value;
use tracing::debug;

/// Inference client bound to one provider and a default model.
#[derive(Debug)]
pub struct LlmClient {
    provider: Box<dyn InferenceProvider>,
    model: String,
}

impl LlmClient {
    /// Creates a Workers AI client from resolved configuration.
    pub fn new(config: &RunnerConfig) -> Result<Self, RunError> {
        let provider = CloudflareProvider::new(config)?;
        Ok(Self::with_provider(Box::new(provider), &config.model))
    }

    pub fn with_provider(provider: Box<dyn InferenceProvider>, model: &str) -> Self {
        LlmClient {
            provider,
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        self.provider.endpoint(&self.model)
    }

    /// Runs the conversation against the configured model.
    pub async fn run(&self, messages: &[ChatMessage]) -> Result<InferenceResponse, RunError> {
        self.run_with_model(&self.model, messages).await
    }

    pub async fn run_with_model(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<InferenceResponse, RunError> {
        debug!("Running {} messages on {}", messages.len(), model);
        self.provider.run(model, messages).await
    }

    /// Runs the conversation and returns only the generated text.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, RunError> {
        self.run(messages).await?.into_text()
    }

    /// Sends a short test message to a small model to check account id and token.
    ///
    /// Succeeds only when the envelope explicitly reports `success: true`. A
    /// rejected request (bad token, unknown account) reports the first envelope
    /// error of its body, like an unsuccessful 2xx reply does.
    pub async fn ping(&self) -> Result<InferenceResponse, RunError> {
        let messages = [ChatMessage::user(PING_MESSAGE)];
        let response = match self.run_with_model(PING_MODEL, &messages).await {
            Ok(response) => response,
            Err(RunError::Status { status, body }) => {
                let body = serde_json::from_str(&body).unwrap_or(Value::Null);
                return Err(envelope_failure(InferenceResponse::new(status, body)));
            }
            Err(err) => return Err(err),
        };
        if response.envelope_success() == Some(true) {
            return Ok(response);
        }
        Err(envelope_failure(response))
    }
}

fn envelope_failure(response: InferenceResponse) -> RunError {
    RunError::Api {
        status: response.status,
        message: response
            .error_messages()
            .into_iter()
            .next()
            .unwrap_or_else(|| "Unknown error occurred".to_string()),
    }
}
