//! # Application Layer
//!
//! Advice generation and chat-session orchestration on top of the
//! [`ChatClient`] interface.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
