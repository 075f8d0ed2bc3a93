//! i18next JSON bundles: one `<dir>/<locale>.json` per locale.

use std::collections::BTreeMap;
use std::path::Path;

use loco_sync_locale::{duplicate_name, LocaleBatch, Platform};
use serde_json::Value;

use super::WriteSummary;
use crate::api::LocoApi;
use crate::error::{ExportError, Result};
use crate::fs::{require_dir, write_file};

/// `{locale: {project: bundle}}` as returned by `/export/all.json`.
pub type I18nextExport = BTreeMap<String, BTreeMap<String, Value>>;

/// Fetch the i18next export, optionally restricted to one tag.
pub async fn export(api: &LocoApi, dir: &Path, tag: &str) -> Result<WriteSummary> {
    require_dir(dir)?;

    let query = api
        .query()
        .format("i18next4")
        .printf("i18next")
        .filter(tag);
    let bundles: I18nextExport = api.export_all("json", &query).await?;
    write(bundles, &api.config().project, dir)
}

/// Write one bundle per locale.
///
/// Locale file names collapse to the bare language when no other locale in
/// the export shares it. A project other than `project` is an error.
pub fn write(bundles: I18nextExport, project: &str, dir: &Path) -> Result<WriteSummary> {
    let batch = LocaleBatch::new(bundles.keys());
    let mut summary = WriteSummary::default();

    for (locale, projects) in &bundles {
        for (name, data) in projects {
            if name != project {
                return Err(ExportError::UnexpectedProject(name.clone()));
            }

            let stem = match batch.file_stem(locale, Platform::I18next) {
                Ok(stem) => stem,
                Err(e) => {
                    tracing::error!(locale = %locale, error = %e, "cannot parse locale, skipping");
                    summary.skip();
                    continue;
                }
            };

            let mut json = serde_json::to_vec(data)?;
            json.push(b'\n');

            let path = dir.join(format!("{stem}.json"));
            write_file(&path, &json)?;
            summary.wrote(path);

            if let Some(canonical) = duplicate_name(&stem)? {
                tracing::info!(file = %stem, canonical = %canonical, "mismatch for code, writing both");
                let path = dir.join(format!("{canonical}.json"));
                write_file(&path, &json)?;
                summary.wrote(path);
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn export_of(value: Value) -> I18nextExport {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_write_collapses_unambiguous_locales() {
        let dir = tempdir().unwrap();
        let bundles = export_of(json!({
            "en-US": {"hourglass": {"greeting": "Hello {{name}}"}},
            "pt-BR": {"hourglass": {"greeting": "Olá {{name}}"}},
            "pt-PT": {"hourglass": {"greeting": "Olá {{name}}!"}},
        }));

        let summary = write(bundles, "hourglass", dir.path()).unwrap();

        let en: Value = serde_json::from_slice(&fs::read(dir.path().join("en.json")).unwrap()).unwrap();
        assert_eq!(en["greeting"], "Hello {{name}}");
        assert!(dir.path().join("pt-BR.json").exists());
        assert!(dir.path().join("pt-PT.json").exists());
        assert!(!dir.path().join("en-US.json").exists());
        assert_eq!(summary.written.len(), 3);
    }

    #[test]
    fn test_unexpected_project() {
        let dir = tempdir().unwrap();
        let bundles = export_of(json!({"en-US": {"website": {}}}));

        let err = write(bundles, "hourglass", dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::UnexpectedProject(p) if p == "website"));
    }

    #[test]
    fn test_unparseable_locale_skipped() {
        let dir = tempdir().unwrap();
        let bundles = export_of(json!({
            "x": {"hourglass": {}},
            "fr-FR": {"hourglass": {"a": "b"}},
        }));

        let summary = write(bundles, "hourglass", dir.path()).unwrap();
        assert_eq!(summary.skipped, 1);
        assert!(dir.path().join("fr.json").exists());
    }
}
