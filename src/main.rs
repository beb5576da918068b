use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ts_launcher::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "ts-launcher")]
#[command(about = "Desktop launcher for TradingStar 3")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.ts-launcher/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the launcher window (default)
    Gui,

    /// Start TradingStar 3 without a window and stream its console here
    Run {
        /// Executable to launch (defaults to the saved path)
        #[arg(long)]
        path: Option<String>,

        /// API key (defaults to the saved key)
        #[arg(long)]
        key: Option<String>,

        /// Remember the given path and key
        #[arg(long)]
        save: bool,

        /// Print every process event as a JSON line instead of raw output
        #[arg(long)]
        json: bool,
    },

    /// Show or update the saved launch settings
    Config {
        /// New executable path
        #[arg(long)]
        path: Option<String>,

        /// New API key
        #[arg(long)]
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config_path = cli.config.unwrap_or_else(Config::global_config_path);

    match cli.command {
        Some(Commands::Run {
            path,
            key,
            save,
            json,
        }) => {
            cli::run::run_command(&config_path, path, key, save, json).await?;
        }
        Some(Commands::Config { path, key }) => {
            cli::config::config_command(&config_path, path, key)?;
        }
        Some(Commands::Gui) | None => {
            ts_launcher::gui::run_gui(config_path, tokio::runtime::Handle::current())?;
        }
    }

    Ok(())
}
