//! # Domain Layer
//!
//! Chat messages, conversations, advice replies and the crate error type.
//! Independent of HTTP clients, terminals and async runtimes.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
