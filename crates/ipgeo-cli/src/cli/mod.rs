//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use ipgeo_core::config::Config;
use ipgeo_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "ipgeo")]
#[command(version)]
#[command(about = "Instant geolocation and IP look-up")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Look up an IP address without signing in (nothing is logged remotely)
    Lookup {
        /// Address to look up; omit to look up your own
        ip: Option<String>,

        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write the default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config commands must work even when the config file is broken.
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let config = Config::load().context("load config")?;
    let _guard = logging::init_logging(&config.logging).context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let Some(command) = cli.command else {
        return commands::app::run(&config).await;
    };

    match command {
        Commands::Lookup { ip, json } => {
            commands::lookup::run(&config, ip.as_deref().unwrap_or_default(), json).await
        }
        // Handled in `run` before logging starts.
        Commands::Config { .. } => Ok(()),
    }
}
