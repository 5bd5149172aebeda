mod llm_client;
mod message;
pub mod providers;
mod response;

pub use llm_client::*;
pub use message::*;
pub use response::*;
