//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use loco_sync_config::{vars, ApiKeys, ConfigLoader, SyncConfig};
use loco_sync_export::LocoApi;
use loco_sync_log::spans::command_span;
use tracing::Instrument;

use crate::commands::{
    AndroidCommand, AssetsCommand, ConvertCommand, FallbackCommand, HugoCommand,
    IosCatalogCommand, IosCommand, JsonCommand, PoCommand,
};
use crate::error::CliError;

/// loco-sync - Loco translation exports for every client platform
///
/// Downloads translations from the Loco API and writes them in the layout
/// each platform expects.
#[derive(Debug, Parser)]
#[command(
    name = "loco-sync",
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::LOCO_SYNC_CONFIG,
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Loco read-only API key
    #[arg(
        long,
        global = true,
        env = vars::LOCO_RO_API_KEY,
        hide_env_values = true,
        help = "Loco read-only API key"
    )]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write gettext catalogs for the backend
    Po(PoCommand),

    /// Generate source constants for every asset id
    Assets(AssetsCommand),

    /// Write i18next JSON bundles
    Json(JsonCommand),

    /// Write Hugo translation tables
    #[command(name = "hugoyaml")]
    HugoYaml(HugoCommand),

    /// Print the fallback chain of every locale
    Fallback(FallbackCommand),

    /// Write Android string resources
    Android(AndroidCommand),

    /// Write iOS strings, stringsdict and InfoPlist files
    Ios(IosCommand),

    /// Write iOS string catalogs
    #[command(name = "ioscat")]
    IosCatalog(IosCatalogCommand),

    /// Convert python placeholders of one asset to i18next
    #[command(name = "i18conv")]
    I18Conv(ConvertCommand),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Po(_) => "po",
            Command::Assets(_) => "assets",
            Command::Json(_) => "json",
            Command::HugoYaml(_) => "hugoyaml",
            Command::Fallback(_) => "fallback",
            Command::Android(_) => "android",
            Command::Ios(_) => "ios",
            Command::IosCatalog(_) => "ioscat",
            Command::I18Conv(_) => "i18conv",
        }
    }
}

impl Cli {
    /// Load configuration from `--config` or the current directory
    pub fn load_config(&self) -> Result<SyncConfig, CliError> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::default(),
        };
        tracing::debug!(path = %loader.path().display(), "loading configuration");
        Ok(loader.load()?)
    }

    /// The Loco key from `--api-key`, falling back to the environment
    pub fn api_key(&self) -> Result<String, CliError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key.to_string()),
            _ => Ok(ApiKeys::require_loco()?),
        }
    }

    /// Execute the selected command
    pub async fn execute(self, ctx: &CommandContext) -> Result<(), CliError> {
        let span = command_span(self.command.name());
        async move {
            match &self.command {
                Command::Po(cmd) => cmd.execute(ctx).await,
                Command::Assets(cmd) => cmd.execute(ctx).await,
                Command::Json(cmd) => cmd.execute(ctx).await,
                Command::HugoYaml(cmd) => cmd.execute(ctx).await,
                Command::Fallback(cmd) => cmd.execute(ctx).await,
                Command::Android(cmd) => cmd.execute(ctx).await,
                Command::Ios(cmd) => cmd.execute(ctx).await,
                Command::IosCatalog(cmd) => cmd.execute(ctx).await,
                Command::I18Conv(cmd) => cmd.execute(ctx).await,
            }
        }
        .instrument(span)
        .await
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub api: LocoApi,
}

impl CommandContext {
    pub fn new(config: SyncConfig, api_key: &str) -> Result<Self, CliError> {
        let api = LocoApi::new(config, api_key)?;
        Ok(Self { api })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_optional_tag() {
        let cli = Cli::try_parse_from(["loco-sync", "json", "out/locales"]).unwrap();
        match cli.command {
            Command::Json(cmd) => {
                assert_eq!(cmd.dir, PathBuf::from("out/locales"));
                assert_eq!(cmd.tag, None);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["loco-sync", "hugoyaml", "site/i18n", "web"]).unwrap();
        match cli.command {
            Command::HugoYaml(cmd) => assert_eq!(cmd.tag.as_deref(), Some("web")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_i18conv() {
        let cli = Cli::try_parse_from(["loco-sync", "-vv", "i18conv", "import.drop %(file)s", "file"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::I18Conv(cmd) => {
                assert_eq!(cmd.asset, "import.drop %(file)s");
                assert_eq!(cmd.format_key.as_deref(), Some("file"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["loco-sync", "-q", "-v", "fallback"]).is_err());
    }

    #[test]
    fn test_dir_required() {
        assert!(Cli::try_parse_from(["loco-sync", "po"]).is_err());
    }

    #[test]
    fn test_api_key_flag_wins() {
        let cli = Cli::try_parse_from(["loco-sync", "--api-key", " abc ", "fallback"]).unwrap();
        assert_eq!(cli.api_key().unwrap(), "abc");
    }
}
