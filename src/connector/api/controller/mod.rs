pub mod ask_controller;
pub mod persona_controller;

pub use ask_controller::AskController;
pub use persona_controller::PersonaController;
