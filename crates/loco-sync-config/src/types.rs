//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Vendor API settings.
    pub api: ApiConfig,
    /// Loco project key, expected in i18next exports and YAML archive names.
    pub project: String,
    /// Locale the vendor fills missing translations from.
    pub fallback_locale: String,
    /// Tag filters used by the export commands.
    pub tags: TagConfig,
    /// Asset id generator settings.
    pub assets: AssetsConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            project: "hourglass".to_string(),
            fallback_locale: "en-US".to_string(),
            tags: TagConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

/// Vendor API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the Loco REST API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localise.biz/api".to_string(),
            timeout_secs: 20,
            connect_timeout_secs: 10,
        }
    }
}

/// Tag filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Tag of the assets exported as gettext catalogs.
    pub backend: String,
    /// Tag of the assets exported to Android resources.
    pub mobile: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            backend: "backend".to_string(),
            mobile: "mobile-apps".to_string(),
        }
    }
}

/// Asset id generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Custom template for the generated source file.
    pub template: Option<PathBuf>,
}
