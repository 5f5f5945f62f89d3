mod advice_dispatcher;
mod chat_widget;
mod generate_advice;

pub use advice_dispatcher::*;
pub use chat_widget::*;
pub use generate_advice::*;
