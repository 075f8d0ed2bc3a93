//! Export commands: one per output platform.

use std::path::PathBuf;

use clap::Parser;
use clap::ValueHint;
use loco_sync_export::formats::{android, hugo, i18next, ios, ios_catalog, po};
use loco_sync_export::WriteSummary;
use loco_sync_log::spans::Timer;

use crate::cli::CommandContext;
use crate::error::CliError;

fn report(summary: &WriteSummary) {
    tracing::info!(
        files = summary.written.len(),
        skipped = summary.skipped,
        "export finished"
    );
    for path in &summary.written {
        tracing::debug!(file = %path.display(), "wrote");
    }
}

/// Write gettext catalogs for the backend
#[derive(Debug, Parser)]
pub struct PoCommand {
    /// Translations directory; `<locale>/LC_MESSAGES` is created below it
    #[arg(value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,
}

impl PoCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let timer = Timer::start("po");
        let summary = po::export(&ctx.api, &self.dir).await?;
        report(&summary);
        timer.finish();
        Ok(())
    }
}

/// Write Android string resources
#[derive(Debug, Parser)]
pub struct AndroidCommand {
    /// The `res` directory holding the `values-*` directories
    #[arg(value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,
}

impl AndroidCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let timer = Timer::start("android");
        let summary = android::export(&ctx.api, &self.dir).await?;
        report(&summary);
        timer.finish();
        Ok(())
    }
}

/// Write iOS strings, stringsdict and InfoPlist files
#[derive(Debug, Parser)]
pub struct IosCommand {
    /// Directory holding the `<locale>.lproj` directories
    #[arg(value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,
}

impl IosCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let timer = Timer::start("ios");
        let summary = ios::export(&ctx.api, &self.dir).await?;
        report(&summary);
        timer.finish();
        Ok(())
    }
}

/// Write iOS string catalogs
#[derive(Debug, Parser)]
pub struct IosCatalogCommand {
    /// Directory receiving the `.xcstrings` files and holding the `.lproj` directories
    #[arg(value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,
}

impl IosCatalogCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let timer = Timer::start("ioscat");
        let summary = ios_catalog::export(&ctx.api, &self.dir).await?;
        report(&summary);
        timer.finish();
        Ok(())
    }
}

/// Write i18next JSON bundles
#[derive(Debug, Parser)]
pub struct JsonCommand {
    /// Output directory, must exist
    #[arg(value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,

    /// Only export assets with this tag
    pub tag: Option<String>,
}

impl JsonCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let timer = Timer::start("json");
        let tag = self.tag.as_deref().unwrap_or_default();
        let summary = i18next::export(&ctx.api, &self.dir, tag).await?;
        report(&summary);
        timer.finish();
        Ok(())
    }
}

/// Write Hugo translation tables
#[derive(Debug, Parser)]
pub struct HugoCommand {
    /// Output directory, must exist
    #[arg(value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,

    /// Only export assets with this tag
    pub tag: Option<String>,
}

impl HugoCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let timer = Timer::start("hugoyaml");
        let tag = self.tag.as_deref().unwrap_or_default();
        let summary = hugo::export(&ctx.api, &self.dir, tag).await?;
        report(&summary);
        timer.finish();
        Ok(())
    }
}
