use crate::errors::RunError;
use crate::llm::{ChatMessage, InferenceResponse};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod cloudflare;
#[cfg(test)]
pub mod scripted;

#[async_trait]
pub trait InferenceProvider: Debug + Send + Sync {
    /// Full URL a request for `model` is sent to.
    fn endpoint(&self, model: &str) -> String;

    async fn run(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<InferenceResponse, RunError>;
}
