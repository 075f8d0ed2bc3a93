//! Naming decisions that depend on the whole set of locales in one export.

use std::collections::HashMap;

use crate::{LocaleError, LocaleTag, Platform};

/// The locales present in a single export.
///
/// Used to collapse a tag to its bare base language when no other locale in
/// the same export shares that base (`en-US` → `en` unless `en-GB` is there too).
#[derive(Debug, Clone, Default)]
pub struct LocaleBatch {
    base_counts: HashMap<String, usize>,
}

impl LocaleBatch {
    /// Build a batch from raw vendor codes. Unparseable codes are not counted.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut base_counts = HashMap::new();
        for code in codes {
            match LocaleTag::parse(code.as_ref()) {
                Ok(tag) => *base_counts.entry(tag.language().to_string()).or_insert(0) += 1,
                Err(e) => tracing::debug!(code = code.as_ref(), error = %e, "not counted in batch"),
            }
        }
        Self { base_counts }
    }

    /// Number of locales in the batch with the given base language.
    pub fn base_count(&self, language: &str) -> usize {
        self.base_counts.get(language).copied().unwrap_or(0)
    }

    /// Output file stem for a vendor code.
    ///
    /// Override table first, then the bare base language when unambiguous in
    /// this batch, then the platform rendering.
    pub fn file_stem(&self, raw: &str, platform: Platform) -> Result<String, LocaleError> {
        if let Some(name) = platform.override_for(raw) {
            return Ok(name.to_string());
        }

        let tag = platform.parse(raw)?;
        if self.base_count(tag.language()) == 1 {
            Ok(platform.render_language(&tag))
        } else {
            Ok(platform.render(&tag))
        }
    }
}

/// The canonical BCP-47 name for an output name, when a second copy is needed.
///
/// Downstream consumers may look for either form, so writers emit both. Names
/// differing only in ASCII case return `None`; on a case-insensitive
/// filesystem the second write would clobber the first.
pub fn duplicate_name(name: &str) -> Result<Option<String>, LocaleError> {
    let canonical = LocaleTag::parse(name)?.canonical();
    if canonical.eq_ignore_ascii_case(name) {
        Ok(None)
    } else {
        Ok(Some(canonical))
    }
}
