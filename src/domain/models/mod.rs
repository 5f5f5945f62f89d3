mod advice;
mod chat_message;
mod conversation;

pub use advice::*;
pub use chat_message::*;
pub use conversation::*;
