//! Android string resources: `<dir>/values-<qualifier>/strings.xml`.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use loco_sync_locale::Platform;

use super::WriteSummary;
use crate::api::LocoApi;
use crate::archive::{Archive, EntryPath};
use crate::error::Result;
use crate::fs::{is_valid_dir, require_dir, write_file};

const RESOURCE_FILE: &str = "strings.xml";
const VALUES_PREFIX: &str = "values-";

/// Fetch the mobile XML archive and copy it into existing resource directories.
pub async fn export(api: &LocoApi, base_dir: &Path) -> Result<WriteSummary> {
    require_dir(base_dir)?;

    let query = api
        .query()
        .format("android")
        .index("id")
        .filter(&api.config().tags.mobile);
    let payload = api.archive("xml", &query).await?;
    write(payload, base_dir)
}

/// Copy every `.xml` entry into its resource directory.
///
/// Entries whose directory cannot be found, even after mapping the vendor
/// qualifier to Android's, are logged and skipped.
pub fn write(payload: Bytes, base_dir: &Path) -> Result<WriteSummary> {
    let mut archive = Archive::new(payload)?;
    let mut summary = WriteSummary::default();

    for entry in archive.entries_with_extension("xml") {
        let Some(output_dir) = resource_dir(base_dir, &entry) else {
            summary.skip();
            continue;
        };

        let contents = match archive.read(&entry) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!(file = %entry.full, error = %e, "error reading zip data for file");
                summary.skip();
                continue;
            }
        };

        let path = output_dir.join(RESOURCE_FILE);
        match write_file(&path, &contents) {
            Ok(()) => summary.wrote(path),
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "error writing to file");
                summary.skip();
            }
        }
    }

    Ok(summary)
}

/// Existing output directory for an entry, mapping the qualifier if needed.
fn resource_dir(base_dir: &Path, entry: &EntryPath) -> Option<PathBuf> {
    let dir_name = entry.dir_name();
    let direct = base_dir.join(dir_name);
    if is_valid_dir(&direct) {
        return Some(direct);
    }

    let mapped = match map_qualifier(dir_name) {
        Some(mapped) => mapped,
        None => {
            tracing::error!(filename = %entry.full, "cannot find matching resource for dir");
            return None;
        }
    };

    let output_dir = base_dir.join(&mapped);
    if is_valid_dir(&output_dir) {
        Some(output_dir)
    } else {
        tracing::error!(
            filename = %entry.full,
            mapped = %mapped,
            "cannot find matching resource for dir after mapping"
        );
        None
    }
}

/// `values-pl-rPL` → `values-pl`, `values-zh-rTW` → `values-zh-rTW`, `values-id` → `values-in`.
fn map_qualifier(dir_name: &str) -> Option<String> {
    let qualifier = dir_name.strip_prefix(VALUES_PREFIX)?;
    match Platform::Android.parse(qualifier) {
        Ok(tag) => Some(format!("{VALUES_PREFIX}{}", Platform::Android.normalize_tag(&tag))),
        Err(e) => {
            tracing::debug!(qualifier = %qualifier, error = %e, "unparseable resource qualifier");
            None
        }
    }
}
