//! Per-platform locale naming.

use std::fmt;

use crate::tables::{ANDROID_OVERRIDES, IOS_OVERRIDES, VENDOR_DIRECTORIES};
use crate::{LocaleError, LocaleTag};

/// A client platform with its own locale naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// gettext `LC_MESSAGES` directories: `pt_BR`, `sr@latn`.
    Gettext,
    /// Android resource qualifiers: `pt-rBR`, `b+zh+Hant`.
    Android,
    /// iOS `.lproj` directories: `pt-PT`, `zh-Hans`.
    Ios,
    /// i18next JSON file names.
    I18next,
    /// Hugo YAML file names, lowercased.
    Hugo,
}

impl Platform {
    /// Static override for an exact vendor code, if the platform has one.
    pub fn override_for(self, raw: &str) -> Option<&'static str> {
        match self {
            Self::Gettext => VENDOR_DIRECTORIES.get(raw).copied(),
            Self::Android => ANDROID_OVERRIDES.get(raw).copied(),
            Self::Ios => IOS_OVERRIDES
                .get(raw)
                .or_else(|| VENDOR_DIRECTORIES.get(raw))
                .copied(),
            // bare-language entries are left to per-batch collapsing
            Self::I18next => VENDOR_DIRECTORIES
                .get(raw)
                .copied()
                .filter(|name| name.contains('-')),
            Self::Hugo => None,
        }
    }

    /// Parse a code written either in vendor form or in this platform's own form.
    pub fn parse(self, raw: &str) -> Result<LocaleTag, LocaleError> {
        match self {
            Self::Android => parse_android(raw),
            _ => LocaleTag::parse(raw),
        }
    }

    /// Render a parsed tag using this platform's convention.
    pub fn render(self, tag: &LocaleTag) -> String {
        match self {
            Self::Gettext => render_gettext(tag),
            Self::Android => render_android(tag),
            Self::Ios | Self::I18next => tag.canonical(),
            Self::Hugo => tag.canonical().to_lowercase(),
        }
    }

    /// Render only the base language of a tag.
    pub fn render_language(self, tag: &LocaleTag) -> String {
        match self {
            Self::Android if tag.language() == "id" => "in".to_string(),
            _ => tag.language().to_string(),
        }
    }

    /// Map a raw vendor code to the name this platform expects.
    ///
    /// The override table wins; otherwise the code is parsed and re-rendered.
    pub fn normalize(self, raw: &str) -> Result<String, LocaleError> {
        if let Some(name) = self.override_for(raw) {
            return Ok(name.to_string());
        }
        let tag = self.parse(raw)?;
        Ok(self.render(&tag))
    }

    /// Like [`Platform::normalize`] for an already parsed tag, keyed by its canonical form.
    pub fn normalize_tag(self, tag: &LocaleTag) -> String {
        match self.override_for(&tag.canonical()) {
            Some(name) => name.to_string(),
            None => self.render(tag),
        }
    }

    /// Short name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gettext => "gettext",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::I18next => "i18next",
            Self::Hugo => "hugo",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn render_gettext(tag: &LocaleTag) -> String {
    let mut out = tag.language().to_string();
    if let Some(region) = tag.region() {
        out.push('_');
        out.push_str(region);
    }
    let modifier = tag
        .script()
        .map(str::to_lowercase)
        .or_else(|| tag.variants().next().map(str::to_string));
    if let Some(modifier) = modifier {
        out.push('@');
        out.push_str(&modifier);
    }
    out
}

fn render_android(tag: &LocaleTag) -> String {
    let language = if tag.language() == "id" { "in" } else { tag.language() };
    let has_variants = tag.variants().next().is_some();

    if tag.script().is_some() || has_variants {
        // BCP 47 qualifier form, the only one that can carry a script
        let mut parts = vec![language];
        parts.extend(tag.script());
        parts.extend(tag.region());
        parts.extend(tag.variants());
        return format!("b+{}", parts.join("+"));
    }

    match tag.region() {
        Some(region) => format!("{language}-r{region}"),
        None => language.to_string(),
    }
}

fn parse_android(raw: &str) -> Result<LocaleTag, LocaleError> {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix("b+") {
        let tag = LocaleTag::from_bcp47(raw, &rest.replace('+', "-"))?;
        return Ok(unlegacy(tag, raw));
    }

    let parts: Vec<String> = trimmed
        .split('-')
        .map(|part| match part.strip_prefix('r') {
            Some(region)
                if region.len() == 2 && region.chars().all(|c| c.is_ascii_uppercase()) =>
            {
                region.to_string()
            }
            _ => part.to_string(),
        })
        .collect();

    let tag = LocaleTag::parse(&parts.join("-"))?;
    Ok(unlegacy(tag, raw))
}

fn unlegacy(tag: LocaleTag, raw: &str) -> LocaleTag {
    if tag.language() != "in" {
        return tag;
    }
    let canonical = tag.canonical();
    LocaleTag::from_bcp47(raw, &format!("id{}", &canonical[2..])).unwrap_or(tag)
}
