//! Rewrites python `%(key)s` placeholders of one asset to i18next `{{key}}`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::LocoApi;
use crate::error::{ExportError, Result};

static FORMAT_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"%\(([\w-]+)\)s").expect("valid regex"));

/// Placeholder style recorded on the asset after conversion.
pub const I18NEXT_PRINTF: &str = "i18next";

/// Result of converting one asset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Translations written back.
    pub updated: usize,
    /// Translations left alone: untranslated, unchanged, or failed to write.
    pub skipped: usize,
    /// Whether the asset's placeholder style was updated.
    pub asset_updated: bool,
}

/// First `%(key)s` placeholder name in an asset id.
pub fn parse_format_key(asset_id: &str) -> Option<String> {
    FORMAT_KEY
        .captures(asset_id)
        .map(|caps| caps[1].to_string())
}

/// Replace every `%(key)s` with `{{key}}`. Converting twice changes nothing.
pub fn python_to_i18next(translation: &str, format_key: &str) -> String {
    let python = format!("%({format_key})s");
    let i18next = format!("{{{{{format_key}}}}}");
    translation.replace(&python, &i18next)
}

/// Convert every translation of `asset_id` on the vendor side.
///
/// The key is taken from `format_key` or parsed from the asset id; failing
/// both, nothing is fetched. Each changed translation is posted back on its
/// own; if at least one succeeds the asset is marked as i18next formatted.
pub async fn convert_asset(
    api: &LocoApi,
    asset_id: &str,
    format_key: Option<&str>,
) -> Result<ConvertSummary> {
    let format_key = match format_key.filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None => parse_format_key(asset_id)
            .ok_or_else(|| ExportError::FormatKey(asset_id.to_string()))?,
    };

    let translations = api.translations(asset_id).await?;
    let mut summary = ConvertSummary::default();

    for translation in translations {
        if !translation.translated {
            summary.skipped += 1;
            continue;
        }

        let converted = python_to_i18next(&translation.translation, &format_key);
        if converted.is_empty() || converted == translation.translation {
            tracing::warn!(
                locale = %translation.locale.code,
                translation = %converted,
                "could not create translation"
            );
            summary.skipped += 1;
            continue;
        }

        match api
            .post_translation(asset_id, &translation.locale.code, &converted)
            .await
        {
            Ok(()) => summary.updated += 1,
            Err(e) => {
                tracing::error!(locale = %translation.locale.code, error = %e, "failed to write translation");
                summary.skipped += 1;
            }
        }
    }

    if summary.updated > 0 {
        match api.set_asset_printf(asset_id, I18NEXT_PRINTF).await {
            Ok(()) => summary.asset_updated = true,
            Err(e) => tracing::error!(asset = %asset_id, error = %e, "failed to update asset printf"),
        }
    }

    tracing::info!(count = summary.updated, "updated translations");
    Ok(summary)
}
