use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ChatMessage, FailureKind, Role};

/// First message of every conversation.
pub const GREETING_TEXT: &str =
    "G'day! I'm VoltBot 🤖. Have you got any electrical issues I can help you with today?";

/// Append-only message sequence for one chat session.
///
/// Never empty: it starts with the model greeting and only grows. Timestamps
/// are non-decreasing in append order even if the wall clock steps back.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(at: DateTime<Utc>) -> Self {
        Self {
            messages: vec![ChatMessage::new(Role::Model, GREETING_TEXT, at)],
        }
    }

    /// Append a message stamped with the current time.
    pub fn push(
        &mut self,
        role: Role,
        text: impl Into<String>,
        failure: Option<FailureKind>,
    ) -> &ChatMessage {
        self.push_at(role, text, failure, Utc::now())
    }

    pub fn push_at(
        &mut self,
        role: Role,
        text: impl Into<String>,
        failure: Option<FailureKind>,
        at: DateTime<Utc>,
    ) -> &ChatMessage {
        let floor = self.last().timestamp();
        let timestamp = if at < floor { floor } else { at };
        self.messages
            .push(ChatMessage::new(role, text, timestamp).with_failure(failure));
        self.last()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn greeting(&self) -> &ChatMessage {
        &self.messages[0]
    }

    pub fn last(&self) -> &ChatMessage {
        // seeded with the greeting and never shrinks
        &self.messages[self.messages.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
