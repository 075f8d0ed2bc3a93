//! Asset id constants command.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use loco_sync_export::assets;

use crate::cli::CommandContext;
use crate::error::CliError;

/// Generate source constants for every asset id
#[derive(Debug, Parser)]
pub struct AssetsCommand {
    /// File to write
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Template to render instead of the configured or built-in one
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub template: Option<PathBuf>,
}

impl AssetsCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let template = self
            .template
            .as_deref()
            .or(ctx.api.config().assets.template.as_deref());

        let count = assets::generate(&ctx.api, &self.file, template).await?;
        tracing::debug!(count, "asset constants generated");
        Ok(())
    }
}
