//! Loco export synchronization.
//!
//! Fetches translation exports from the Loco API and writes them out in the
//! layouts each client platform expects: gettext catalogs, Android resources,
//! iOS strings and string catalogs, i18next bundles and Hugo tables. Also
//! generates asset-id constants, prints locale fallback chains and converts
//! python placeholders to i18next ones.

pub mod api;
pub mod archive;
pub mod assets;
pub mod convert;
pub mod error;
pub mod fallback;
pub mod fanout;
pub mod formats;
pub mod fs;
pub mod models;
pub mod template;

pub use api::{ExportQuery, LocoApi};
pub use convert::ConvertSummary;
pub use error::{ExportError, Result};
pub use fanout::FanOut;
pub use formats::WriteSummary;
