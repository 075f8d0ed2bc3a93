//! Xcode string catalogs: `Localizable.xcstrings` and `InfoPlist.xcstrings`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use loco_sync_locale::Platform;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::plist::{self, BUNDLE_NAME_KEY};
use super::WriteSummary;
use crate::api::LocoApi;
use crate::error::Result;
use crate::fanout::FanOut;
use crate::fs::{require_dir, write_file};

const EXTRACTION_STATE_MANUAL: &str = "manual";

/// A string catalog as exported by the vendor and read by Xcode.
///
/// Fields this tool does not touch are carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringCatalog {
    #[serde(rename = "sourceLanguage")]
    pub source_language: String,
    #[serde(default)]
    pub strings: BTreeMap<String, CatalogEntry>,
    #[serde(default)]
    pub version: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One asset of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "extractionState", default)]
    pub extraction_state: String,
    #[serde(default)]
    pub localizations: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The two catalogs of an iOS app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Strings,
    Plist,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::Strings, CatalogKind::Plist];

    /// Vendor tag filter.
    pub fn filter(self) -> &'static str {
        match self {
            CatalogKind::Strings => "ios-strings,ios-plurals",
            CatalogKind::Plist => "ios-plist",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            CatalogKind::Strings => "Localizable.xcstrings",
            CatalogKind::Plist => "InfoPlist.xcstrings",
        }
    }
}

/// Fetch both catalogs concurrently; fails unless both are written.
pub async fn export(api: &LocoApi, base_dir: &Path) -> Result<WriteSummary> {
    require_dir(base_dir)?;

    let mut tasks = FanOut::new();
    for kind in CatalogKind::ALL {
        let api = api.clone();
        let base_dir = base_dir.to_path_buf();
        tasks.spawn(kind.filter(), async move {
            let query = api.query().filter(kind.filter()).index("id");
            let catalog: StringCatalog = api.export_all("xcstrings", &query).await?;
            write(kind, catalog, &base_dir)
        });
    }
    tasks.join().await
}

/// Rewrite a catalog for this app and write it to `base_dir`.
pub fn write(kind: CatalogKind, catalog: StringCatalog, base_dir: &Path) -> Result<WriteSummary> {
    let catalog = rewrite(catalog, |locale| {
        base_dir.join(format!("{locale}.lproj")).is_dir()
    });

    let mut json = serde_json::to_vec_pretty(&catalog)?;
    json.push(b'\n');

    let path = base_dir.join(kind.file_name());
    write_file(&path, &json)?;

    let mut summary = WriteSummary::default();
    summary.wrote(path);
    Ok(summary)
}

/// Map locales to iOS naming, drop locales the app does not ship, and fan
/// plist assets out to their keys.
///
/// `has_locale` says whether the app has a `.lproj` for an iOS locale name.
pub fn rewrite(mut catalog: StringCatalog, has_locale: impl Fn(&str) -> bool) -> StringCatalog {
    match Platform::Ios.normalize(&catalog.source_language) {
        Ok(source) => catalog.source_language = source,
        Err(e) => tracing::warn!(
            locale = %catalog.source_language,
            error = %e,
            "cannot map source language, keeping it"
        ),
    }

    let mut known: HashMap<String, bool> = HashMap::new();
    let mut strings = BTreeMap::new();

    for (asset, mut entry) in std::mem::take(&mut catalog.strings) {
        entry.extraction_state = EXTRACTION_STATE_MANUAL.to_string();
        entry.localizations = rewrite_localizations(entry.localizations, &has_locale, &mut known);

        match plist::plist_keys(&asset) {
            Some(keys) => {
                for key in keys {
                    if *key == BUNDLE_NAME_KEY {
                        check_bundle_names(&entry);
                    }
                    strings.insert(key.to_string(), entry.clone());
                }
            }
            None => {
                strings.insert(asset, entry);
            }
        }
    }

    catalog.strings = strings;
    catalog
}

fn rewrite_localizations(
    localizations: BTreeMap<String, Value>,
    has_locale: &impl Fn(&str) -> bool,
    known: &mut HashMap<String, bool>,
) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    for (raw, value) in localizations {
        let locale = match Platform::Ios.normalize(&raw) {
            Ok(locale) => locale,
            Err(e) => {
                tracing::error!(locale = %raw, error = %e, "cannot parse locale, skipping");
                continue;
            }
        };

        // checked once per locale, logged once per locale
        let keep = *known.entry(locale.clone()).or_insert_with(|| {
            let exists = has_locale(&locale);
            if !exists {
                tracing::info!(locale = %locale, "skipping");
            }
            exists
        });
        if keep {
            out.insert(locale, value);
        }
    }
    out
}

fn check_bundle_names(entry: &CatalogEntry) {
    for (locale, localization) in &entry.localizations {
        if let Some(unit) = localization.get("stringUnit") {
            let value = unit.get("value").and_then(Value::as_str).unwrap_or_default();
            plist::check_bundle_name(locale, value);
        }
    }
}
