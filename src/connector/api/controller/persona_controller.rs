use crate::{GREETING_TEXT, SYSTEM_INSTRUCTION};

use super::super::ContainerConfig;

/// Prints the assistant persona from configuration alone; no client is built.
pub struct PersonaController<'a> {
    config: &'a ContainerConfig,
}

impl<'a> PersonaController<'a> {
    pub fn new(config: &'a ContainerConfig) -> Self {
        Self { config }
    }

    pub fn persona(&self) -> String {
        format!(
            "VoltBot Persona\n===============\nProvider: {}\nModel:    {}\nEndpoint: {}\nTimeout:  {}s\nGreeting: {}\n\n{}",
            self.config.provider.as_str(),
            self.config.model,
            self.config.base_url,
            self.config.timeout.as_secs(),
            GREETING_TEXT,
            SYSTEM_INSTRUCTION
        )
    }
}
