pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AdviceDispatcher, ChatClient, ChatWidget, GenerateAdviceUseCase, RequestId, Resolution,
    SendTicket, WidgetState, DEFAULT_TIMEOUT, SYSTEM_INSTRUCTION,
};

pub use cli::{Commands, OutputFormat, Provider};

pub use connector::{
    AnthropicClient, Container, ContainerConfig, GeminiClient, RecordedCall, Router,
    ScriptedChatClient,
};

pub use domain::{
    AdviceReply, ChatMessage, Conversation, DomainError, FailureKind, Role, APOLOGY_TEXT,
    FALLBACK_TEXT, GREETING_TEXT, INTERNAL_ERROR_TEXT,
};
