//! Legacy iOS resources: `<dir>/<locale>.lproj/*.strings|*.stringsdict`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use loco_sync_locale::Platform;

use super::{plist, WriteSummary};
use crate::api::LocoApi;
use crate::archive::{Archive, EntryPath};
use crate::error::Result;
use crate::fanout::FanOut;
use crate::fs::{is_valid_dir, require_dir, write_file};

/// File written from the plist YAML export.
pub const PLIST_STRINGS_FILE: &str = "InfoPlist.strings";

/// One of the three archives making up an iOS export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IosFormat {
    Strings,
    Stringsdict,
    Plist,
}

impl IosFormat {
    pub const ALL: [IosFormat; 3] = [IosFormat::Strings, IosFormat::Stringsdict, IosFormat::Plist];

    /// Vendor tag selecting the assets of this format.
    pub fn filter(self) -> &'static str {
        match self {
            IosFormat::Strings => "iOS-strings",
            IosFormat::Stringsdict => "iOS-plurals",
            IosFormat::Plist => "iOS-plist",
        }
    }

    /// Archive name, which is also the extension of its entries.
    pub fn extension(self) -> &'static str {
        match self {
            IosFormat::Strings => "strings",
            IosFormat::Stringsdict => "stringsdict",
            IosFormat::Plist => "yml",
        }
    }
}

/// Fetch all three archives concurrently; fails unless every one is written.
pub async fn export(api: &LocoApi, base_dir: &Path) -> Result<WriteSummary> {
    require_dir(base_dir)?;

    let mut tasks = FanOut::new();
    for format in IosFormat::ALL {
        let api = api.clone();
        let base_dir = base_dir.to_path_buf();
        tasks.spawn(format.filter(), async move {
            export_format(&api, format, &base_dir).await
        });
    }
    tasks.join().await
}

async fn export_format(api: &LocoApi, format: IosFormat, base_dir: &Path) -> Result<WriteSummary> {
    let query = api.query().filter(format.filter()).index("id");
    let payload = api.archive(format.extension(), &query).await?;
    tracing::info!(tag = format.filter(), "processing");
    write(format, payload, base_dir)
}

/// Write the entries of one archive into existing `.lproj` directories.
pub fn write(format: IosFormat, payload: Bytes, base_dir: &Path) -> Result<WriteSummary> {
    let mut archive = Archive::new(payload)?;
    let mut summary = WriteSummary::default();

    for entry in archive.entries_with_extension(format.extension()) {
        match write_entry(&mut archive, format, &entry, base_dir) {
            Some(path) => summary.wrote(path),
            None => summary.skip(),
        }
    }

    Ok(summary)
}

fn write_entry(
    archive: &mut Archive,
    format: IosFormat,
    entry: &EntryPath,
    base_dir: &Path,
) -> Option<PathBuf> {
    let locale = lproj_locale(entry)?;
    let output_dir = base_dir.join(format!("{locale}.lproj"));
    if !is_valid_dir(&output_dir) {
        tracing::error!(dir = %output_dir.display(), "cannot find output directory");
        return None;
    }

    let data = archive
        .read(entry)
        .map_err(|e| tracing::error!(file = %entry.full, error = %e, "error reading zip data for file"))
        .ok()?;

    let (file_name, contents) = match format {
        IosFormat::Plist => {
            let translations: BTreeMap<String, String> = serde_yaml::from_slice(&data)
                .map_err(|e| tracing::error!(file = %entry.full, error = %e, "invalid plist yaml"))
                .ok()?;
            let rendered = plist::render_strings(&locale, &translations);
            (PLIST_STRINGS_FILE, rendered.into_bytes())
        }
        _ => (entry.name.as_str(), data),
    };

    let path = output_dir.join(file_name);
    match write_file(&path, &contents) {
        Ok(()) => Some(path),
        Err(e) => {
            tracing::error!(file = %path.display(), error = %e, "error writing to file");
            None
        }
    }
}

/// Locale of an entry from its `<locale>.lproj` directory, in iOS naming.
fn lproj_locale(entry: &EntryPath) -> Option<String> {
    let dir_name = entry.dir_name();
    let raw = dir_name.strip_suffix(".lproj").unwrap_or(dir_name);
    if raw.is_empty() {
        tracing::error!(dir = %entry.dir, "cannot find locale");
        return None;
    }
    match Platform::Ios.normalize(raw) {
        Ok(locale) => Some(locale),
        Err(e) => {
            tracing::error!(locale = %raw, error = %e, "cannot parse locale, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::testing::zip_of;
    use std::fs;
    use tempfile::tempdir;

    fn lproj_dirs(base: &Path, names: &[&str]) {
        for name in names {
            fs::create_dir(base.join(format!("{name}.lproj"))).unwrap();
        }
    }

    #[test]
    fn test_lproj_locale() {
        assert_eq!(lproj_locale(&EntryPath::new("x/pt-BR.lproj/a.strings")).as_deref(), Some("pt"));
        assert_eq!(lproj_locale(&EntryPath::new("x/zh-CN.lproj/a.strings")).as_deref(), Some("zh-Hans"));
        assert_eq!(lproj_locale(&EntryPath::new("x/pt-PT.lproj/a.strings")).as_deref(), Some("pt-PT"));
        assert_eq!(lproj_locale(&EntryPath::new("a.strings")), None);
    }

    #[test]
    fn test_write_strings() {
        let dir = tempdir().unwrap();
        lproj_dirs(dir.path(), &["en", "pt"]);

        let payload = zip_of(&[
            ("hourglass/en-US.lproj/Localizable.strings", "\"a\" = \"A\";"),
            ("hourglass/pt-BR.lproj/Localizable.strings", "\"a\" = \"Á\";"),
            ("hourglass/de-DE.lproj/Localizable.strings", "\"a\" = \"Ä\";"),
            ("hourglass/en-US.lproj/Localizable.stringsdict", "<plist/>"),
        ]);

        let summary = write(IosFormat::Strings, payload, dir.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("pt.lproj/Localizable.strings")).unwrap(),
            "\"a\" = \"Á\";"
        );
        assert!(dir.path().join("en.lproj/Localizable.strings").exists());
        assert!(!dir.path().join("en.lproj/Localizable.stringsdict").exists());
        assert_eq!(summary.written.len(), 2);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_write_plist_yaml() {
        let dir = tempdir().unwrap();
        lproj_dirs(dir.path(), &["en"]);

        let payload = zip_of(&[(
            "hourglass/en-US.lproj/hourglass.yml",
            "mobile.camera.usage: Scan receipts\nHourglass: Hourglass\nunknown.asset: ignored\n",
        )]);

        write(IosFormat::Plist, payload, dir.path()).unwrap();

        let strings = fs::read_to_string(dir.path().join("en.lproj").join(PLIST_STRINGS_FILE)).unwrap();
        assert_eq!(
            strings,
            "\"CFBundleName\" = \"Hourglass\";\n\"NSCameraUsageDescription\" = \"Scan receipts\";\n"
        );
    }
}
