use async_trait::async_trait;

use crate::domain::DomainError;

/// An interface for sending a system instruction plus one user prompt to a
/// hosted language model and receiving the generated text.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. An answer without any text is returned as `Ok(String::new())`;
/// deciding what that means is left to the caller.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a `system` instruction followed by a `user` prompt and return the
    /// model's response text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
