//! Fallback chains for the project's locales.

use loco_sync_locale::{FallbackResolver, LocaleTag};

use crate::api::LocoApi;
use crate::error::{ExportError, Result};
use crate::models::Locale;

/// Fetch the locale listing and compute one `target: chain` line per
/// non-source locale.
pub async fn fallback(api: &LocoApi) -> Result<Vec<String>> {
    let locales = api.locales().await?;
    fallback_lines(&locales)
}

/// Fallback lines for a locale listing, in listing order.
///
/// The listing must flag a source locale. Codes that do not parse are logged
/// and left out.
pub fn fallback_lines(locales: &[Locale]) -> Result<Vec<String>> {
    let source = locales
        .iter()
        .find(|locale| locale.source)
        .ok_or(ExportError::NoSourceLocale)?;
    let source = LocaleTag::parse(&source.code)?;

    let others: Vec<LocaleTag> = locales
        .iter()
        .filter(|locale| !locale.source)
        .filter_map(|locale| match LocaleTag::parse(&locale.code) {
            Ok(tag) => Some(tag),
            Err(e) => {
                tracing::warn!(locale = %locale.code, error = %e, "cannot parse locale, skipping");
                None
            }
        })
        .collect();

    let resolver = FallbackResolver::new(source, others);
    Ok(resolver
        .chains()
        .into_iter()
        .map(|(target, chain)| format!("{target}: {chain}"))
        .collect())
}
