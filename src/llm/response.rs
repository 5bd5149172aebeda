use crate::errors::RunError;
use serde_json::Value;

/// Decoded reply of the inference endpoint.
///
/// The status travels with the body because some gateways wrap failures in a
/// 2xx envelope; callers decide what counts as success.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResponse {
    pub status: u16,
    pub body: Value,
}

impl InferenceResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// The envelope's `success` flag, when present.
    pub fn envelope_success(&self) -> Option<bool> {
        self.body.get("success").and_then(Value::as_bool)
    }

    /// Messages of the envelope's `errors` array, in order.
    pub fn error_messages(&self) -> Vec<String> {
        self.body
            .get("errors")
            .and_then(Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| match e {
                        Value::String(s) => Some(s.clone()),
                        other => other
                            .get("message")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Generated text at `result.response`.
    pub fn response_text(&self) -> Option<&str> {
        self.body
            .get("result")
            .and_then(|r| r.get("response"))
            .and_then(Value::as_str)
    }

    /// Extracts the generated text, turning an error envelope into `RunError::Api`.
    pub fn into_text(self) -> Result<String, RunError> {
        if self.envelope_success() == Some(false) {
            return Err(RunError::Api {
                status: self.status,
                message: self
                    .error_messages()
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| "Unknown error occurred".to_string()),
            });
        }
        match self.response_text() {
            Some(text) => Ok(text.trim().to_string()),
            None => Err(RunError::Api {
                status: self.status,
                message: "No content in inference response".to_string(),
            }),
        }
    }
}
