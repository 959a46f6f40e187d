//! CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::repository::migrate;
use crate::server;

#[derive(Parser)]
#[command(name = "docmine")]
#[command(about = "Configuration backend for document extraction pipelines")]
#[command(version)]
pub struct Cli {
    /// Data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the configuration API server
    Serve {
        /// Bind address: a port, a host, or host:port
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Apply pending database migrations and exit
    Migrate,
}

/// Parse and run the CLI command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = data_dir;
    }
    settings.ensure_directories()?;

    match cli.command {
        Commands::Serve { bind } => cmd_serve(&settings, bind.as_deref()).await,
        Commands::Migrate => cmd_migrate(&settings).await,
    }
}

async fn cmd_migrate(settings: &Settings) -> anyhow::Result<()> {
    migrate::run_migrations(&settings.database_url()).await?;
    println!("Database ready at {}", settings.database_url());
    Ok(())
}

async fn cmd_serve(settings: &Settings, bind: Option<&str>) -> anyhow::Result<()> {
    // Run database migrations first
    migrate::run_migrations(&settings.database_url())
        .await
        .map_err(|e| anyhow::anyhow!("Database migration failed: {}", e))?;

    let (host, port) = match bind {
        Some(bind) => parse_bind_address(bind, settings.api_port),
        None => (settings.api_host.clone(), settings.api_port),
    };

    println!("Starting docmine server at http://{}:{}", host, port);
    println!("  Press Ctrl+C to stop");

    server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "8000" -> 127.0.0.1:8000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:<default>
/// - Host and port: "0.0.0.0:8000" -> 0.0.0.0:8000
fn parse_bind_address(bind: &str, default_port: u16) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return ("127.0.0.1".to_string(), port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    (bind.to_string(), default_port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(
            parse_bind_address("9000", 8000),
            ("127.0.0.1".to_string(), 9000)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0", 8000),
            ("0.0.0.0".to_string(), 8000)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0:9000", 8000),
            ("0.0.0.0".to_string(), 9000)
        );
    }
}
