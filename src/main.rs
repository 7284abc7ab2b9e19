//! `cleaning-booking-api` binary: parses the command line, sets up
//! logging and hands off to a command.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cleaning_booking_api::{
    cli::{Cli, Commands},
    commands,
    config::Config,
    errors::AppResult,
};

const DEFAULT_LOG_FILTER: &str = "cleaning_booking_api=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(log_filter(cli.verbose))
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> AppResult<()> {
    let config = Config::from_env();
    tracing::debug!(?config, "Configuration loaded");

    match command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Migrate(args) => commands::migrate::execute(args, config).await,
        Commands::BootstrapAdmin(args) => commands::bootstrap_admin::execute(args, config).await,
    }
}

/// `--verbose` wins over `RUST_LOG`.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
