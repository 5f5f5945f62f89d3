use serde::{Deserialize, Serialize};

/// Reply shown when the service answers without any usable text.
pub const APOLOGY_TEXT: &str = "I apologize, I cannot process your request at the moment.";

/// Reply shown for every transport, timeout, or service failure.
pub const FALLBACK_TEXT: &str = "Sorry, the system is currently busy or there is a connection issue. Please try again later or call our emergency number.";

/// Reply shown when an advice request fails outside the advice client itself.
pub const INTERNAL_ERROR_TEXT: &str =
    "Something went wrong while sending your message. Please try again or call our emergency number.";

/// Why a reply is a fallback notice instead of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Network,
    Timeout,
    Service,
    Malformed,
    EmptyResponse,
    Internal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Service => "service",
            Self::Malformed => "malformed",
            Self::EmptyResponse => "empty_response",
            Self::Internal => "internal",
        }
    }

    /// The user-facing text for this failure.
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::EmptyResponse => APOLOGY_TEXT,
            Self::Internal => INTERNAL_ERROR_TEXT,
            Self::Network | Self::Timeout | Self::Service | Self::Malformed => FALLBACK_TEXT,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one advice request: the text to show, and the failure behind it
/// if it is not a generated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceReply {
    text: String,
    failure: Option<FailureKind>,
}

impl AdviceReply {
    pub fn answered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure: None,
        }
    }

    pub fn failed(kind: FailureKind) -> Self {
        Self {
            text: kind.display_text().to_string(),
            failure: Some(kind),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    pub fn is_answer(&self) -> bool {
        self.failure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_share_one_fallback() {
        for kind in [
            FailureKind::Network,
            FailureKind::Timeout,
            FailureKind::Service,
            FailureKind::Malformed,
        ] {
            let reply = AdviceReply::failed(kind);
            assert_eq!(reply.text(), FALLBACK_TEXT);
            assert_eq!(reply.failure(), Some(kind));
        }
    }

    #[test]
    fn empty_response_uses_apology() {
        let reply = AdviceReply::failed(FailureKind::EmptyResponse);
        assert_eq!(reply.text(), APOLOGY_TEXT);
        assert!(!reply.is_answer());
    }

    #[test]
    fn failure_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::EmptyResponse).unwrap();
        assert_eq!(json, "\"empty_response\"");
    }
}
