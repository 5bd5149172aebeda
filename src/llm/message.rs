use serde::{Deserialize, Serialize};

/// Represents a chat message with a role and content
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Role of the message sender (e.g. "system", "user", "assistant")
    pub role: String,
    /// Content/text of the message
    pub content: String,
}

impl ChatMessage {
    /// Creates a new chat message
    ///
    /// # Arguments
    /// * `role` - Role of the message sender
    /// * `content` - Content/text of the message
    pub fn new(role: &str, content: &str) -> Self {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    pub fn system(content: &str) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: &str) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: &str) -> Self {
        Self::new("assistant", content)
    }

    /// Parses the `role:content` form accepted on the command line.
    ///
    /// Only the first colon separates the role, so the content may contain colons.
    pub fn parse_pair(raw: &str) -> Result<Self, String> {
        match raw.split_once(':') {
            Some((role, content)) if !role.is_empty() => Ok(Self::new(role, content)),
            _ => Err(format!("expected ROLE:CONTENT, got '{}'", raw)),
        }
    }
}

/// Body of a run request: the conversation, in order, under `messages`.
#[derive(Serialize, Debug)]
pub struct InferenceRequest<'a> {
    pub messages: &'a [ChatMessage],
}

impl<'a> InferenceRequest<'a> {
    pub fn new(messages: &'a [ChatMessage]) -> Self {
        Self { messages }
    }
}
