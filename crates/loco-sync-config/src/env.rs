//! Environment variable handling.

use std::env;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("required environment variable not set: {var}")]
    NotSet { var: String },
}

/// Environment variable names.
pub mod vars {
    // Credentials
    pub const LOCO_RO_API_KEY: &str = "LOCO_RO_API_KEY";

    // Configuration
    pub const LOCO_SYNC_CONFIG: &str = "LOCO_SYNC_CONFIG";
    pub const LOCO_SYNC_LOG_LEVEL: &str = "LOCO_SYNC_LOG_LEVEL";
    pub const LOCO_SYNC_LOG_FORMAT: &str = "LOCO_SYNC_LOG_FORMAT";
    pub const LOCO_SYNC_LOG_FILE: &str = "LOCO_SYNC_LOG_FILE";

    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Environment configuration.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Initialize environment from .env files.
    ///
    /// Variables already present in the process environment win over the files.
    pub fn init() -> Self {
        let _ = dotenvy::from_filename(".env");
        let _ = dotenvy::from_filename(".env.local");

        Self { _guard: () }
    }

    /// Get a required, non-empty string variable.
    pub fn require(var: &str) -> Result<String, EnvError> {
        match env::var(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(EnvError::NotSet { var: var.to_string() }),
        }
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok()
    }

    /// Get a variable with a default value.
    pub fn get_or(var: &str, default: &str) -> String {
        env::var(var).unwrap_or_else(|_| default.to_string())
    }
}

/// Read-only Loco credentials.
pub struct ApiKeys;

impl ApiKeys {
    /// The Loco read-only key, if set.
    pub fn loco() -> Option<String> {
        Environment::get(vars::LOCO_RO_API_KEY).filter(|key| !key.trim().is_empty())
    }

    /// The Loco read-only key, or an error naming the variable.
    pub fn require_loco() -> Result<String, EnvError> {
        Environment::require(vars::LOCO_RO_API_KEY)
    }
}
