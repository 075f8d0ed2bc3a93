//! Per-platform export writers.
//!
//! Each module pairs a pure writer (payload in, files out) with an async
//! `export` function that fetches the payload first.

pub mod android;
pub mod hugo;
pub mod i18next;
pub mod ios;
pub mod ios_catalog;
pub mod plist;
pub mod po;

use std::path::PathBuf;

/// What a writer did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
    /// Archive entries or locales skipped, already logged.
    pub skipped: usize,
}

impl WriteSummary {
    pub(crate) fn wrote(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    pub(crate) fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Fold another summary into this one.
    pub fn merge(&mut self, other: WriteSummary) {
        self.written.extend(other.written);
        self.skipped += other.skipped;
    }
}
