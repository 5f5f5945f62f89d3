//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion clients (Gemini, Anthropic-compatible, scripted)
//! - CLI wiring (container, router, controllers)
//! - Terminal chat UI

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
pub use api::{Container, ContainerConfig, Router};
