//! # League Dashboard Binary
//!
//! Command-line entry point for the league projection dashboard.

use clap::Parser;
use dashboard_service::cli::{Cli, CliHandler};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    dashboard_service::init_tracing();

    // Parse CLI arguments
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    // Create CLI handler
    let handler = CliHandler::new(config);

    // Handle command
    if let Err(e) = handler.handle_command(cli.command).await {
        if let Some(message) = e.user_message() {
            eprintln!("{message}");
            std::process::exit(1);
        }
        error!("Dashboard failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
