use std::io::Write;

use clap::Parser;
use loco_sync_export::fallback;

use crate::cli::CommandContext;
use crate::error::CliError;

/// Print the fallback chain of every locale
#[derive(Debug, Parser)]
pub struct FallbackCommand {}

impl FallbackCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let lines = fallback::fallback(&ctx.api).await?;

        let mut stdout = std::io::stdout().lock();
        for line in lines {
            writeln!(stdout, "{line}")?;
        }
        Ok(())
    }
}
