use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::OutputFormat;
use crate::{AdviceReply, DomainError};

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, query: String, format: OutputFormat) -> Result<String> {
        if query.trim().is_empty() {
            return Err(DomainError::invalid_input("question must not be empty").into());
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("VoltBot is thinking...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let reply = self.container.advice_use_case().execute(&query).await;
        spinner.finish_and_clear();

        self.format_reply(&reply, format)
    }

    fn format_reply(&self, reply: &AdviceReply, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(reply.text().to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "model": self.container.model(),
                "text": reply.text(),
                "failure": reply.failure(),
            }))?),
        }
    }
}
