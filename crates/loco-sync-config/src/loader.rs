//! Configuration file loading and parsing.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::types::SyncConfig;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".loco-sync.yaml";

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("valid regex"));

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    path: PathBuf,
    required: bool,
}

impl ConfigLoader {
    /// Load from an explicit file, which must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required: true,
        }
    }

    /// Load `.loco-sync.yaml` from a directory if present, defaults otherwise.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(DEFAULT_CONFIG_FILE),
            required: false,
        }
    }

    /// Path the loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> Result<SyncConfig, ConfigError> {
        if !self.path.exists() {
            if self.required {
                return Err(ConfigError::NotFound {
                    path: self.path.clone(),
                });
            }
            return Ok(SyncConfig::default());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let expanded = self.expand_env_vars(&contents)?;

        // an empty or comment-only file means defaults
        let config: SyncConfig = match serde_yaml::from_str::<Option<SyncConfig>>(&expanded) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                return Err(ConfigError::ParseError {
                    line: e.location().map(|l| l.line()),
                    message: e.to_string(),
                })
            }
        };

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &SyncConfig) -> Result<(), ConfigError> {
        if config.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "api.base_url must not be empty".to_string(),
            });
        }

        if config.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                message: "api.timeout_secs must be greater than 0".to_string(),
            });
        }

        if config.project.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "project must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::in_dir(std::env::current_dir().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::in_dir(dir.path());
        let config = loader.load().unwrap();
        assert_eq!(config.project, "hourglass");
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::from_file(dir.path().join("missing.yaml"));
        match loader.load().unwrap_err() {
            ConfigError::NotFound { path } => assert!(path.ends_with("missing.yaml")),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        let config_content = r#"
api:
  base_url: https://example.test/api
  timeout_secs: 25
project: website
fallback_locale: en-GB
"#;
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), config_content).unwrap();

        let config = ConfigLoader::in_dir(dir.path()).load().unwrap();

        assert_eq!(config.api.base_url, "https://example.test/api");
        assert_eq!(config.api.timeout_secs, 25);
        assert_eq!(config.project, "website");
        assert_eq!(config.fallback_locale, "en-GB");
        assert_eq!(config.api.connect_timeout_secs, 10);
        assert_eq!(config.tags.backend, "backend");
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "# nothing here\n").unwrap();
        let config = ConfigLoader::in_dir(dir.path()).load().unwrap();
        assert_eq!(config.fallback_locale, "en-US");
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("LOCO_SYNC_TEST_VAR", "test_value");
        let loader = ConfigLoader::in_dir(".");
        let result = loader.expand_env_vars("key: ${LOCO_SYNC_TEST_VAR}").unwrap();
        assert_eq!(result, "key: test_value");
        std::env::remove_var("LOCO_SYNC_TEST_VAR");
    }

    #[test]
    fn test_env_var_default() {
        let loader = ConfigLoader::in_dir(".");
        let result = loader
            .expand_env_vars("key: ${LOCO_SYNC_NONEXISTENT:-default}")
            .unwrap();
        assert_eq!(result, "key: default");
    }

    #[test]
    fn test_env_var_pattern_reused_across_loads() {
        let loader = ConfigLoader::in_dir(".");
        for _ in 0..3 {
            let result = loader
                .expand_env_vars("a: ${LOCO_SYNC_UNSET_A:-1}\nb: ${LOCO_SYNC_UNSET_B:-two}")
                .unwrap();
            assert_eq!(result, "a: 1\nb: two");
        }
        assert!(ENV_VAR.is_match("${X}"));
        assert!(!ENV_VAR.is_match("$X"));
    }

    #[test]
    fn test_env_var_missing_error() {
        let loader = ConfigLoader::in_dir(".");
        match loader.expand_env_vars("key: ${LOCO_SYNC_MISSING_VAR}").unwrap_err() {
            ConfigError::EnvVarNotFound { var } => assert_eq!(var, "LOCO_SYNC_MISSING_VAR"),
            _ => panic!("Expected EnvVarNotFound error"),
        }
    }

    #[test]
    fn test_validation_errors() {
        let loader = ConfigLoader::in_dir(".");

        let mut config = SyncConfig::default();
        config.api.timeout_secs = 0;
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("timeout_secs")),
            _ => panic!("Expected ValidationError"),
        }

        let mut config = SyncConfig::default();
        config.api.base_url = " ".to_string();
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("base_url")),
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        let bad_yaml = r#"
api:
  base_url: https://localise.biz/api
  timeout_secs: [unclosed
"#;
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), bad_yaml).unwrap();

        match ConfigLoader::in_dir(dir.path()).load().unwrap_err() {
            ConfigError::ParseError { line, .. } => assert!(line.is_some()),
            _ => panic!("Expected ParseError with line number"),
        }
    }
}
