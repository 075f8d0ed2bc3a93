//! Hugo translation tables: `<dir>/<locale>.yaml` with `{id: {other: text}}`.

use std::collections::BTreeMap;
use std::path::Path;

use bytes::Bytes;
use loco_sync_locale::{LocaleBatch, Platform};
use serde::Serialize;

use super::WriteSummary;
use crate::api::LocoApi;
use crate::archive::{Archive, EntryPath};
use crate::error::Result;
use crate::fs::{require_dir, write_file};

/// A message in the plural-capable shape go-i18n reads. Only `other` is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub other: String,
}

/// Fetch the simple YAML archive, optionally restricted to one tag.
pub async fn export(api: &LocoApi, dir: &Path, tag: &str) -> Result<WriteSummary> {
    require_dir(dir)?;

    let query = api.query().format("simple").index("id").filter(tag);
    let payload = api.archive("yml", &query).await?;
    write(payload, &api.config().project, dir)
}

/// Write one YAML table per locale in the archive.
pub fn write(payload: Bytes, project: &str, dir: &Path) -> Result<WriteSummary> {
    let mut archive = Archive::new(payload)?;
    let mut summary = WriteSummary::default();

    let mut tables: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    for entry in archive.entries_with_extension("yml") {
        match archive.read(&entry) {
            Ok(data) => {
                tables.insert(entry_locale(&entry, project), data);
            }
            Err(e) => {
                tracing::error!(file = %entry.full, error = %e, "error reading zip data for file");
                summary.skip();
            }
        }
    }

    let batch = LocaleBatch::new(tables.keys());
    for (locale, data) in &tables {
        let stem = match batch.file_stem(locale, Platform::Hugo) {
            Ok(stem) => stem,
            Err(e) => {
                tracing::error!(locale = %locale, error = %e, "cannot parse locale, skipping");
                summary.skip();
                continue;
            }
        };

        let translations: BTreeMap<String, String> = match serde_yaml::from_slice(data) {
            Ok(translations) => translations,
            Err(e) => {
                tracing::error!(file = %stem, error = %e, "error unmarshalling yaml");
                summary.skip();
                continue;
            }
        };

        let path = dir.join(format!("{stem}.yaml"));
        let rendered = serde_yaml::to_string(&wrap(translations))?;
        match write_file(&path, rendered.as_bytes()) {
            Ok(()) => summary.wrote(path),
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "error writing output file");
                summary.skip();
            }
        }
    }

    Ok(summary)
}

/// `hourglass-pt-BR.yml` → `pt-br`
fn entry_locale(entry: &EntryPath, project: &str) -> String {
    let stem = entry.stem();
    let prefix = format!("{project}-");
    stem.strip_prefix(&prefix).unwrap_or(stem).to_lowercase()
}

fn wrap(translations: BTreeMap<String, String>) -> BTreeMap<String, Message> {
    translations
        .into_iter()
        .map(|(asset, other)| (asset, Message { other }))
        .collect()
}
