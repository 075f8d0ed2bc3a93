//! Placeholder conversion command.

use clap::Parser;
use loco_sync_export::convert;

use crate::cli::CommandContext;
use crate::error::CliError;

/// Convert python placeholders of one asset to i18next
#[derive(Debug, Parser)]
pub struct ConvertCommand {
    /// Asset id, e.g. `import.drop-here %(filename)s`
    pub asset: String,

    /// Placeholder name; parsed from the asset id when omitted
    pub format_key: Option<String>,
}

impl ConvertCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        if self.asset.trim().is_empty() {
            return Err(CliError::User {
                message: "asset id must not be empty".to_string(),
                hint: Some("quote asset ids containing spaces".to_string()),
            });
        }

        let summary = convert::convert_asset(&ctx.api, &self.asset, self.format_key.as_deref()).await?;
        if summary.updated > 0 && !summary.asset_updated {
            tracing::warn!(asset = %self.asset, "translations updated but asset printf was not");
        }
        Ok(())
    }
}
