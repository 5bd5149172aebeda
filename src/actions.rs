//! Writing assistant presets.
//!
//! Each preset pairs a system prompt with a short instruction prefixed to the
//! user's text, and turns a piece of text into a two-message conversation.

use crate::constants::*;
use crate::errors::RunError;
use crate::llm::{ChatMessage, LlmClient};
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WritingAction {
    Proofread,
    Rewrite,
    Friendly,
    Professional,
    Concise,
    Summary,
    KeyPoints,
    Stepify,
}

impl WritingAction {
    pub const ALL: [WritingAction; 8] = [
        WritingAction::Proofread,
        WritingAction::Rewrite,
        WritingAction::Friendly,
        WritingAction::Professional,
        WritingAction::Concise,
        WritingAction::Summary,
        WritingAction::KeyPoints,
        WritingAction::Stepify,
    ];

    /// Name used on the command line and in API paths.
    pub fn slug(self) -> &'static str {
        match self {
            WritingAction::Proofread => "proofread",
            WritingAction::Rewrite => "rewrite",
            WritingAction::Friendly => "friendly",
            WritingAction::Professional => "professional",
            WritingAction::Concise => "concise",
            WritingAction::Summary => "summary",
            WritingAction::KeyPoints => "key-points",
            WritingAction::Stepify => "stepify",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WritingAction::Proofread => "Proofread",
            WritingAction::Rewrite => "Rewrite",
            WritingAction::Friendly => "Friendly",
            WritingAction::Professional => "Professional",
            WritingAction::Concise => "Concise",
            WritingAction::Summary => "Summary",
            WritingAction::KeyPoints => "Key Points",
            WritingAction::Stepify => "Stepify",
        }
    }

    /// Instruction placed in front of the user's text.
    pub fn pre_prompt(self) -> &'static str {
        match self {
            WritingAction::Proofread => "Proofread this:\n\n",
            WritingAction::Rewrite => "Rewrite this:\n\n",
            WritingAction::Friendly => "Make this more friendly:\n\n",
            WritingAction::Professional => "Make this more professional:\n\n",
            WritingAction::Concise => "Make this more concise:\n\n",
            WritingAction::Summary => "Summarize this:\n\n",
            WritingAction::KeyPoints => "Extract key points from this:\n\n",
            WritingAction::Stepify => "Convert this into a step-by-step guide:\n\n",
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            WritingAction::Proofread => PROOFREAD_SYSTEM_PROMPT,
            WritingAction::Rewrite => REWRITE_SYSTEM_PROMPT,
            WritingAction::Friendly => FRIENDLY_SYSTEM_PROMPT,
            WritingAction::Professional => PROFESSIONAL_SYSTEM_PROMPT,
            WritingAction::Concise => CONCISE_SYSTEM_PROMPT,
            WritingAction::Summary => SUMMARY_SYSTEM_PROMPT,
            WritingAction::KeyPoints => KEY_POINTS_SYSTEM_PROMPT,
            WritingAction::Stepify => STEPIFY_SYSTEM_PROMPT,
        }
    }

    pub fn build_messages(self, text: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_prompt()),
            ChatMessage::user(&format!("{}{}", self.pre_prompt(), text)),
        ]
    }

    /// Runs the preset on `text` and returns the model's output.
    ///
    /// The incompatible-input sentinel is reported as `RunError::Api`.
    pub async fn apply(self, client: &LlmClient, text: &str) -> Result<String, RunError> {
        info!("Applying '{}' to {} characters", self.title(), text.chars().count());
        let output = client.complete(&self.build_messages(text)).await?;
        if output.contains(INCOMPATIBLE_TEXT_SENTINEL) {
            return Err(RunError::Api {
                status: 200,
                message: format!("the text is not suitable for '{}'", self.title()),
            });
        }
        Ok(output)
    }
}

impl fmt::Display for WritingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for WritingAction {
    type Err = String;

    /// Accepts the slug or the title, ignoring case, spaces, dashes and underscores.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        WritingAction::ALL
            .into_iter()
            .find(|a| a.slug().replace('-', "") == wanted)
            .ok_or_else(|| format!("unknown action '{}'", raw))
    }
}
