use crate::errors::RunError;
use crate::llm::{ChatMessage, LlmClient};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Multi-turn conversation kept in send order.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    pub conversation: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(system_prompt: Option<&str>) -> Self {
        let conversation = system_prompt
            .filter(|p| !p.trim().is_empty())
            .map(|p| vec![ChatMessage::system(p)])
            .unwrap_or_default();
        ChatSession { conversation }
    }

    /// Appends `text` as a user turn, runs the conversation and records the reply.
    ///
    /// On failure the user turn is removed again so the history only holds
    /// exchanges that completed.
    pub async fn send(&mut self, client: &LlmClient, text: &str) -> Result<String, RunError> {
        self.conversation.push(ChatMessage::user(text));
        match client.complete(&self.conversation).await {
            Ok(reply) => {
                self.conversation.push(ChatMessage::assistant(&reply));
                debug!("Conversation now has {} messages", self.conversation.len());
                Ok(reply)
            }
            Err(e) => {
                self.conversation.pop();
                Err(e)
            }
        }
    }

    /// Number of completed user/assistant exchanges.
    pub fn turns(&self) -> usize {
        self.conversation
            .iter()
            .filter(|m| m.role == "assistant")
            .count()
    }

    /// Writes the conversation as pretty JSON to `dir/conversation-<timestamp>.json`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!(
            "conversation-{}.json",
            Local::now().format("%Y-%m-%d_%H%M%S")
        ));
        let json = serde_json::to_string_pretty(&self.conversation).map_err(std::io::Error::from)?;
        fs::write(&path, json)?;
        info!("Conversation exported to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::scripted::{text_reply, ScriptedProvider, SharedProvider};
    use std::sync::Arc;

    #[tokio::test]
    async fn send_accumulates_history_in_order() {
        let provider = Arc::new(ScriptedProvider::replying(vec![
            text_reply("Hi!"),
            text_reply("Fine, thanks."),
        ]));
        let client = LlmClient::with_provider(Box::new(SharedProvider(provider.clone())), "m");
        let mut session = ChatSession::new(Some("Be brief"));

        assert_eq!(session.send(&client, "Hello").await.unwrap(), "Hi!");
        assert_eq!(session.send(&client, "How are you?").await.unwrap(), "Fine, thanks.");

        assert_eq!(
            session.conversation,
            vec![
                ChatMessage::system("Be brief"),
                ChatMessage::user("Hello"),
                ChatMessage::assistant("Hi!"),
                ChatMessage::user("How are you?"),
                ChatMessage::assistant("Fine, thanks."),
            ]
        );
        assert_eq!(session.turns(), 2);

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls[1].1.len(), 4);
        assert_eq!(calls[1].1[3], ChatMessage::user("How are you?"));
    }

    #[tokio::test]
    async fn failed_send_rolls_back_user_turn() {
        let client = LlmClient::with_provider(
            Box::new(ScriptedProvider::replying(vec![Err(RunError::Status {
                status: 500,
                body: "boom".to_string(),
            })])),
            "m",
        );
        let mut session = ChatSession::new(None);
        assert!(session.send(&client, "Hello").await.is_err());
        assert!(session.conversation.is_empty());
    }

    #[test]
    fn blank_system_prompt_is_ignored() {
        assert!(ChatSession::new(Some("  ")).conversation.is_empty());
    }

    #[test]
    fn export_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let session = ChatSession {
            conversation: vec![ChatMessage::user("a"), ChatMessage::assistant("b")],
        };
        let path = session.export(&dir.path().join("nested")).unwrap();
        let written: Vec<ChatMessage> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, session.conversation);
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("conversation-"));
    }
}
