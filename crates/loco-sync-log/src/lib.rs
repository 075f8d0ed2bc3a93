//! Logging infrastructure for loco-sync.
//!
//! Diagnostics go to stderr (and optionally a file) so that commands which
//! print results on stdout stay pipeable.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVEL_VAR: &str = "LOCO_SYNC_LOG_LEVEL";
pub const LOG_FORMAT_VAR: &str = "LOCO_SYNC_LOG_FORMAT";
pub const LOG_FILE_VAR: &str = "LOCO_SYNC_LOG_FILE";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Log file path (if file logging enabled).
    pub file_path: Option<PathBuf>,
    /// Include targets in output.
    pub targets: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            file_path: None,
            targets: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = std::env::var(LOG_LEVEL_VAR) {
            if let Some(l) = LogLevel::parse(&level) {
                config.level = l;
            }
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            if let Some(l) = LogLevel::parse(&level) {
                config.level = l;
            }
        }

        if let Ok(format) = std::env::var(LOG_FORMAT_VAR) {
            config.format = LogFormat::parse(&format);
        }

        if let Ok(file_path) = std::env::var(LOG_FILE_VAR) {
            if !file_path.is_empty() {
                config.file_path = Some(PathBuf::from(file_path));
            }
        }

        config
    }

    /// Apply `-v`/`-q` command line flags on top of the environment.
    ///
    /// `-q` keeps errors only, `-v` enables debug output and `-vv` trace.
    pub fn with_verbosity(mut self, verbose: u8, quiet: bool) -> Self {
        if quiet {
            self.level = LogLevel::Error;
            return self;
        }

        self.level = match verbose {
            0 => self.level,
            1 => self.level.min(LogLevel::Debug),
            _ => LogLevel::Trace,
        };
        self.targets = verbose >= 2;
        self
    }
}

/// Initialize logging with the given configuration.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::new(config.level.as_str());
    let registry = tracing_subscriber::registry().with(filter);

    let file = match &config.file_path {
        Some(path) => Some(Mutex::new(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        )),
        None => None,
    };

    match (config.format, file) {
        (LogFormat::Pretty, None) => registry
            .with(fmt::layer().with_writer(io::stderr).with_target(config.targets))
            .try_init(),
        (LogFormat::Pretty, Some(file)) => registry
            .with(fmt::layer().with_writer(io::stderr).with_target(config.targets))
            .with(fmt::layer().with_writer(file).with_ansi(false))
            .try_init(),
        (LogFormat::Compact, None) => registry
            .with(fmt::layer().compact().with_writer(io::stderr).with_target(config.targets))
            .try_init(),
        (LogFormat::Compact, Some(file)) => registry
            .with(fmt::layer().compact().with_writer(io::stderr).with_target(config.targets))
            .with(fmt::layer().compact().with_writer(file).with_ansi(false))
            .try_init(),
        (LogFormat::Json, None) => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        (LogFormat::Json, Some(file)) => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .with(fmt::layer().json().with_writer(file))
            .try_init(),
    }
    .map_err(|e| LogError::InitError(e.to_string()))
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

/// Span and timing helpers.
pub mod spans;

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Pretty);
    }

    #[test]
    fn test_verbosity_flags() {
        let base = LogConfig::default();

        assert_eq!(base.clone().with_verbosity(0, false).level, LogLevel::Info);
        assert_eq!(base.clone().with_verbosity(1, false).level, LogLevel::Debug);
        assert_eq!(base.clone().with_verbosity(3, false).level, LogLevel::Trace);
        assert_eq!(base.clone().with_verbosity(0, true).level, LogLevel::Error);
        assert!(base.with_verbosity(2, false).targets);
    }

    #[test]
    fn test_verbose_never_raises_threshold() {
        let config = LogConfig {
            level: LogLevel::Trace,
            ..LogConfig::default()
        };
        assert_eq!(config.with_verbosity(1, false).level, LogLevel::Trace);
    }

    #[test]
    fn test_init_with_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loco-sync.log");
        let config = LogConfig {
            format: LogFormat::Compact,
            file_path: Some(path.clone()),
            ..LogConfig::default()
        };

        init(config.clone()).unwrap();
        tracing::info!("written to file");
        assert!(path.exists());

        // the global subscriber can only be installed once
        assert!(matches!(init(config), Err(LogError::InitError(_))));
    }

    #[test]
    fn test_config_from_env() {
        let original_level = env::var(LOG_LEVEL_VAR).ok();
        let original_format = env::var(LOG_FORMAT_VAR).ok();
        let original_file = env::var(LOG_FILE_VAR).ok();

        env::set_var(LOG_LEVEL_VAR, "debug");
        env::set_var(LOG_FORMAT_VAR, "json");
        env::set_var(LOG_FILE_VAR, "/tmp/loco-sync-test.log");

        let config = LogConfig::from_env();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file_path.unwrap(), PathBuf::from("/tmp/loco-sync-test.log"));

        env::remove_var(LOG_LEVEL_VAR);
        env::remove_var(LOG_FORMAT_VAR);
        env::remove_var(LOG_FILE_VAR);

        if let Some(val) = original_level {
            env::set_var(LOG_LEVEL_VAR, val);
        }
        if let Some(val) = original_format {
            env::set_var(LOG_FORMAT_VAR, val);
        }
        if let Some(val) = original_file {
            env::set_var(LOG_FILE_VAR, val);
        }
    }
}
