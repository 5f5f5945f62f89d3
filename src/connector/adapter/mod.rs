mod http_error;

pub mod anthropic_client;
pub mod gemini_client;
mod scripted_chat_client;

pub use anthropic_client::AnthropicClient;
pub use gemini_client::GeminiClient;
pub use scripted_chat_client::*;
