use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FailureKind;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged, timestamped unit of conversation text.
///
/// Messages are immutable once appended to a [`super::Conversation`]; the
/// accessors below are the only way to read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    text: String,
    timestamp: DateTime<Utc>,
    /// Set when `text` is a fallback notice rather than a generated answer.
    failure: Option<FailureKind>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp,
            failure: None,
        }
    }

    pub fn with_failure(mut self, failure: Option<FailureKind>) -> Self {
        self.failure = failure;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}
