//! Pinscan CLI entry point
//!
//! Parses arguments, initializes logging from `[general]`, and dispatches
//! to the subcommand handlers. Errors are printed to stderr and mapped to
//! the exit codes defined by [`error::CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use pinscan_core::config::{GeneralConfig, PinscanConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let general = bootstrap_logging_config(&cli).await;
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("warning: {e}");
    }
    pinscan_core::metrics::describe_all();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Scan(args) => commands::scan::execute(args, &cli.config, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}

/// Resolve the `[general]` section before logging is up.
///
/// Load failures are ignored here; the command reports them after logging starts.
/// `--log-level` wins over the file and environment.
async fn bootstrap_logging_config(cli: &Cli) -> GeneralConfig {
    let mut general = match PinscanConfig::load(&cli.config).await {
        Ok(config) => config.general,
        Err(_) => {
            let mut config = PinscanConfig::default();
            config.apply_env_overrides();
            config.general
        }
    };

    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    general
}
