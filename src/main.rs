use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use voltsafe::connector::tui;
use voltsafe::{ChatWidget, Commands, Container, ContainerConfig, Provider, Router};

#[derive(Parser)]
#[command(name = "voltbot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Completion API to use (defaults to VOLTBOT_PROVIDER, then gemini)
    #[arg(long, global = true, value_enum)]
    provider: Option<Provider>,

    #[arg(long, global = true)]
    model: Option<String>,

    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Give up on a reply after this many seconds
    #[arg(long, global = true, default_value = "30")]
    timeout_secs: u64,

    /// Write logs to this file (the chat UI discards logs otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let chat = matches!(cli.command, Commands::Chat { .. });
    init_tracing(cli.verbose, cli.log_file.as_deref(), chat)?;

    let config = ContainerConfig::from_env(
        cli.provider,
        cli.model,
        cli.base_url,
        Duration::from_secs(cli.timeout_secs.max(1)),
    )?;
    debug!(
        "Provider {} model {}",
        config.provider.as_str(),
        config.model
    );

    match cli.command {
        Commands::Chat { open } => {
            let container = Container::new(config)?;
            let mut widget = ChatWidget::new();
            if open {
                widget.open();
            }
            tui::run(widget, container.advice_use_case()).await?;
        }
        command => {
            let output = Router::new(&config).route(command).await?;
            println!("{output}");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool, log_file: Option<&Path>, chat: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        // the terminal UI owns stdout and stderr
        None if chat => builder.with_writer(std::io::sink).try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}
