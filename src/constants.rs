use std::time::Duration;

/// Root of the Cloudflare REST API; the account and model are appended per request.
pub const DEFAULT_API_ROOT: &str = "https://api.cloudflare.com/client/v4";

/// Model used when neither the config file nor the command line names one.
pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3-8b-instruct";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable holding the Cloudflare account identifier
pub const ACCOUNT_ID_ENV: &str = "CLOUDFLARE_ACCOUNT_ID";

/// Environment variable holding the Workers AI API token
pub const API_TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

/// Default system message of the built-in conversation
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly assistant";

/// Default user message of the built-in conversation
pub const DEFAULT_USER_PROMPT: &str = "Hello";

/// Small model used by the connection test
pub const PING_MODEL: &str = "@cf/meta/llama-2-7b-chat-int8";

pub const PING_MESSAGE: &str =
    "Hello! This is a test message. Please respond with 'API test successful' if you receive this.";

/// Sentinel the writing presets ask the model to answer with when the input makes no sense.
pub const INCOMPATIBLE_TEXT_SENTINEL: &str = "ERROR_TEXT_INCOMPATIBLE_WITH_REQUEST";

/// Directory used for conversation exports and rolling log files
pub const LOG_DIR: &str = "logs";

pub const DEFAULT_API_PORT: u16 = 3000;

/// System prompt of the proofreading preset
pub const PROOFREAD_SYSTEM_PROMPT: &str = "You are a grammar proofreading assistant. Output ONLY the corrected text without any additional comments. Maintain the original text structure and writing style. Respond in the same language as the input (e.g., English US, French). If the text is absolutely incompatible with this (e.g., totally random gibberish), output \"ERROR_TEXT_INCOMPATIBLE_WITH_REQUEST\".";

/// System prompt of the rewriting preset
pub const REWRITE_SYSTEM_PROMPT: &str = "You are a writing assistant. Rewrite the text provided by the user to improve phrasing. Output ONLY the rewritten text without additional comments. Respond in the same language as the input (e.g., English US, French). If the text is absolutely incompatible with proofreading (e.g., totally random gibberish), output \"ERROR_TEXT_INCOMPATIBLE_WITH_REQUEST\".";

/// System prompt of the friendlier-tone preset
pub const FRIENDLY_SYSTEM_PROMPT: &str = "You are a writing assistant. Rewrite the text provided by the user to be more friendly. Output ONLY the revised text without additional comments. Respond in the same language as the input (e.g., English US, French). If the text is absolutely incompatible with rewriting (e.g., totally random gibberish), output \"ERROR_TEXT_INCOMPATIBLE_WITH_REQUEST\".";

/// System prompt of the professional-tone preset
pub const PROFESSIONAL_SYSTEM_PROMPT: &str = "You are a writing assistant. Rewrite the text provided by the user to sound more professional. Output ONLY the revised text without additional comments. Respond in the same language as the input (e.g., English US, French). If the text is absolutely incompatible with this (e.g., totally random gibberish), output \"ERROR_TEXT_INCOMPATIBLE_WITH_REQUEST\".";

/// System prompt of the concise preset
pub const CONCISE_SYSTEM_PROMPT: &str = "You are a writing assistant. Rewrite the text provided by the user to be more concise. Output ONLY the concise version without additional comments. Respond in the same language as the input (e.g., English US, French). If the text is absolutely incompatible with this (e.g., totally random gibberish), output \"ERROR_TEXT_INCOMPATIBLE_WITH_REQUEST\".";

/// System prompt of the summary preset
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a summarization assistant. Provide a concise summary of the text provided by the user. Output ONLY the summary without additional comments. Respond in the same language as the input (e.g., English US, French). If the text is absolutely incompatible with summarization (e.g., totally random gibberish), output \"ERROR_TEXT_INCOMPATIBLE_WITH_REQUEST\".";

/// System prompt of the key points preset
pub const KEY_POINTS_SYSTEM_PROMPT: &str = "You are an assistant that extracts key points from text provided by the user. Output ONLY the key points without additional comments. Respond in the same language as the input (e.g., English US, French). If the text is absolutely incompatible with extracting key points (e.g., totally random gibberish), output \"ERROR_TEXT_INCOMPATIBLE_WITH_REQUEST\".";

/// System prompt of the step-by-step preset
pub const STEPIFY_SYSTEM_PROMPT: &str = "You are an assistant that converts text provided by the user into a step-by-step guide. Output ONLY the steps without additional comments. Respond in the same language as the input (e.g., English US, French). If the text is absolutely incompatible with this with conversion, output \"ERROR_TEXT_INCOMPATIBLE_WITH_REQUEST\".";
