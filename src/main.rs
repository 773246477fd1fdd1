// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use unified_platform::{
    commands,
    config::{initialize_config, ConfigOverrides},
    logging::init_logging,
    ui,
};

#[derive(Debug, Parser)]
#[command(name = "unified-platform", version, about = "Unified Web Platform client")]
struct Cli {
    /// JSON config file (defaults to ~/.config/unified-platform/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the project assistant
    #[arg(long, global = true)]
    chatbot_a_url: Option<String>,

    /// Base URL of the general knowledge assistant
    #[arg(long, global = true)]
    chatbot_b_url: Option<String>,

    /// URL or file path of the solutions album
    #[arg(long, global = true)]
    album_source: Option<String>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Full-screen terminal UI (default)
    Tui,
    /// Line-by-line chat on stdin
    Chat,
    /// Print the solutions album
    Album,
    /// Print task analytics
    Analytics,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        chatbot_a_url: cli.chatbot_a_url,
        chatbot_b_url: cli.chatbot_b_url,
        album_source: cli.album_source,
        log_level: cli.log_level,
    };
    let config = initialize_config(cli.config.as_deref(), &overrides)?;

    let command = cli.command.unwrap_or(Command::Tui);
    let plain = !matches!(command, Command::Tui);
    let _logger = init_logging(&config, plain)?;
    info!("starting in {:?} mode", command);

    match command {
        Command::Tui => ui::run_ui().await?,
        Command::Chat => commands::run_repl().await?,
        Command::Album => commands::print_album().await?,
        Command::Analytics => commands::print_analytics().await?,
    }

    Ok(())
}
