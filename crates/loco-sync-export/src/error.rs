//! Export error type.

use std::path::PathBuf;

use loco_sync_http::{HttpError, ResponseError};
use loco_sync_locale::LocaleError;

/// Errors raised while fetching or writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error("invalid base dir: {}", .0.display())]
    InvalidDir(PathBuf),

    #[error("unexpected archive path: {0}")]
    UnexpectedPath(String),

    #[error("got unexpected project in i18next response from loco: {0}")]
    UnexpectedProject(String),

    #[error("no source locale in the locale listing")]
    NoSourceLocale,

    #[error("did not process {expected} sets as expected ({succeeded} succeeded)")]
    Incomplete { expected: usize, succeeded: usize },

    #[error("couldn't determine format key from asset id: {0}")]
    FormatKey(String),

    #[error("missing template variables: {0}")]
    Template(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures talking to the vendor API.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Response(ResponseError::Read(_)))
    }

    /// True for failures caused by the caller's input rather than the vendor or disk.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidDir(_) | Self::FormatKey(_))
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
