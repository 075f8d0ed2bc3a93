//! gettext catalogs: `<dir>/<locale>/LC_MESSAGES/messages.po`.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use loco_sync_locale::{duplicate_name, Platform};

use super::WriteSummary;
use crate::api::LocoApi;
use crate::archive::{Archive, EntryPath};
use crate::error::{ExportError, Result};
use crate::fs::{ensure_dir, write_file};

const CATALOG_FILE: &str = "messages.po";

/// Fetch the backend PO archive and write it below `base_dir`.
pub async fn export(api: &LocoApi, base_dir: &Path) -> Result<WriteSummary> {
    let query = api.query().index("name").filter(&api.config().tags.backend);
    let payload = api.archive("po", &query).await?;
    write(payload, base_dir)
}

/// Write every `.po` entry of an archive.
///
/// Entries are processed independently; the first entry error is returned
/// once all entries have been attempted.
pub fn write(payload: Bytes, base_dir: &Path) -> Result<WriteSummary> {
    let mut archive = Archive::new(payload)?;
    let mut summary = WriteSummary::default();
    let mut first_error = None;

    for entry in archive.entries_with_extension("po") {
        match write_entry(&mut archive, &entry, base_dir, &mut summary) {
            Ok(()) => {}
            Err(e) => {
                tracing::error!(entry = %entry.full, error = %e, "failed to write po entry");
                summary.skip();
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(summary),
    }
}

fn write_entry(
    archive: &mut Archive,
    entry: &EntryPath,
    base_dir: &Path,
    summary: &mut WriteSummary,
) -> Result<()> {
    let vendor_locale = vendor_locale(entry)?;
    let dir_name = match Platform::Gettext.normalize(&vendor_locale) {
        Ok(name) => name,
        Err(e) => {
            tracing::error!(locale = %vendor_locale, error = %e, "cannot parse locale, skipping");
            summary.skip();
            return Ok(());
        }
    };

    let contents = archive.read(entry)?;
    let path = catalog_path(base_dir, &dir_name)?;
    write_file(&path, &contents)?;
    summary.wrote(path);

    // consumers may look the catalog up by its BCP-47 name instead
    match duplicate_name(&dir_name) {
        Ok(Some(canonical)) => {
            tracing::info!(locale = %dir_name, canonical = %canonical, "mismatch for code, writing both");
            let dup = catalog_path(base_dir, &canonical).and_then(|p| {
                write_file(&p, &contents)?;
                Ok(p)
            });
            match dup {
                Ok(p) => summary.wrote(p),
                Err(e) => tracing::error!(locale = %canonical, error = %e, "error creating duplicate output file"),
            }
        }
        Ok(None) => {}
        Err(e) => tracing::debug!(locale = %dir_name, error = %e, "no canonical name"),
    }

    Ok(())
}

/// The vendor locale of an entry: the third directory component, `en_US` → `en-US`.
fn vendor_locale(entry: &EntryPath) -> Result<String> {
    let components: Vec<&str> = entry.dir.split('/').collect();
    if components.len() < 3 {
        return Err(ExportError::UnexpectedPath(entry.full.clone()));
    }
    Ok(components[2].replacen('_', "-", 1))
}

fn catalog_path(base_dir: &Path, locale_dir: &str) -> Result<PathBuf> {
    let dir = base_dir.join(locale_dir).join("LC_MESSAGES");
    ensure_dir(&dir)?;
    Ok(dir.join(CATALOG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::testing::zip_of;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_vendor_locale() {
        let entry = EntryPath::new("hourglass/po/pt_BR/LC_MESSAGES/messages.po");
        assert_eq!(vendor_locale(&entry).unwrap(), "pt-BR");

        let shallow = EntryPath::new("po/messages.po");
        assert!(matches!(vendor_locale(&shallow), Err(ExportError::UnexpectedPath(_))));
    }

    #[test]
    fn test_write_catalogs() {
        let dir = tempdir().unwrap();
        let payload = zip_of(&[
            ("hourglass/po/en_US/LC_MESSAGES/messages.po", "msgid \"a\""),
            ("hourglass/po/pt_BR/LC_MESSAGES/messages.po", "msgid \"b\""),
            ("hourglass/po/sr@latn/LC_MESSAGES/messages.po", "msgid \"c\""),
            ("hourglass/po/pt_BR/LC_MESSAGES/messages.mo", "binary"),
        ]);

        let summary = write(payload, dir.path()).unwrap();

        let read = |p: &str| fs::read_to_string(dir.path().join(p)).unwrap();
        assert_eq!(read("en/LC_MESSAGES/messages.po"), "msgid \"a\"");
        assert_eq!(read("pt_BR/LC_MESSAGES/messages.po"), "msgid \"b\"");
        assert_eq!(read("pt-BR/LC_MESSAGES/messages.po"), "msgid \"b\"");
        assert_eq!(read("sr@latn/LC_MESSAGES/messages.po"), "msgid \"c\"");
        assert_eq!(read("sr-Latn/LC_MESSAGES/messages.po"), "msgid \"c\"");
        assert!(!dir.path().join("en-US").exists());
        assert_eq!(summary.written.len(), 5);
    }

    #[test]
    fn test_names_come_from_static_table_only() {
        let dir = tempdir().unwrap();
        let payload = zip_of(&[
            ("hourglass/po/pt_BR/LC_MESSAGES/messages.po", "msgid \"b\""),
            ("hourglass/po/fr_FR/LC_MESSAGES/messages.po", "msgid \"f\""),
        ]);

        write(payload, dir.path()).unwrap();

        // the only portuguese catalog keeps its region; fr_FR is in the table
        assert!(dir.path().join("pt_BR/LC_MESSAGES/messages.po").exists());
        assert!(!dir.path().join("pt").exists());
        assert!(dir.path().join("fr/LC_MESSAGES/messages.po").exists());
    }

    #[test]
    fn test_bad_entry_does_not_stop_others() {
        let dir = tempdir().unwrap();
        let payload = zip_of(&[
            ("messages.po", "top level"),
            ("hourglass/po/de_DE/LC_MESSAGES/messages.po", "msgid \"d\""),
        ]);

        let err = write(payload, dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::UnexpectedPath(_)));
        assert!(dir.path().join("de/LC_MESSAGES/messages.po").exists());
    }
}
