//! loco-sync - Loco translation export tool
//!
//! Main entry point for the `loco-sync` binary.

use std::process::ExitCode;

use clap::Parser;
use loco_sync_config::Environment;
use loco_sync_log::LogConfig;
use tracing::error;

mod cli;
mod commands;
mod error;

use cli::{Cli, CommandContext};
use error::{CliError, Exit};

fn main() -> ExitCode {
    // .env must be loaded before clap reads env-backed arguments
    let _env = Environment::init();

    let cli = Cli::parse();

    let log_config = LogConfig::from_env().with_verbosity(cli.verbose, cli.quiet);
    if let Err(e) = loco_sync_log::init(log_config) {
        eprintln!("loco-sync: {e}");
        return Exit::ConfigError.into();
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to create tokio runtime");
            return Exit::GeneralError.into();
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            error!("{e}");
            if let Some(hint) = e.hint() {
                error!("hint: {hint}");
            }
            e.exit().into()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    let api_key = cli.api_key()?;
    let ctx = CommandContext::new(config, &api_key)?;

    cli.execute(&ctx).await
}
