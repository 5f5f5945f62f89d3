use anyhow::Result;

use crate::Commands;

use super::container::{Container, ContainerConfig};
use super::controller::{AskController, PersonaController};

/// Routes one-shot commands to their controllers.
///
/// The completion client is only built for commands that call the service,
/// so `persona` works without credentials.
pub struct Router<'a> {
    config: &'a ContainerConfig,
}

impl<'a> Router<'a> {
    pub fn new(config: &'a ContainerConfig) -> Self {
        Self { config }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { query, format } => {
                let container = Container::new(self.config.clone())?;
                AskController::new(&container).ask(query, format).await
            }
            Commands::Persona => Ok(PersonaController::new(self.config).persona()),
            Commands::Chat { .. } => anyhow::bail!("chat runs the terminal UI, not the router"),
        }
    }
}
