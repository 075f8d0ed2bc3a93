//! Locale handling for Loco exports.
//!
//! Every vendor locale code is parsed once into a [`LocaleTag`] and then
//! rendered into whatever naming convention a client platform expects.

pub mod batch;
pub mod fallback;
pub mod platform;
pub mod tables;

use std::fmt;
use std::str::FromStr;

use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

pub use batch::{duplicate_name, LocaleBatch};
pub use fallback::{FallbackChain, FallbackResolver};
pub use platform::Platform;

/// A parsed locale: language, optional script, optional region and variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag {
    id: LanguageIdentifier,
}

impl LocaleTag {
    /// Parse from any of the vendor forms (e.g. "pt-BR", "pt_BR", "sr@latn", "zh-Hant").
    ///
    /// A gettext modifier after `@` is a script when it has four letters and is
    /// moved directly behind the language subtag; anything else becomes a
    /// variant. Only the first `@` segment is considered.
    pub fn parse(raw: &str) -> Result<Self, LocaleError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LocaleError::Empty);
        }

        let candidate = match trimmed.split_once('@') {
            Some((tag, modifier)) => {
                let modifier = modifier.split('@').next().unwrap_or_default();
                let is_script =
                    modifier.len() == 4 && modifier.chars().all(|c| c.is_ascii_alphabetic());
                match tag.find(['-', '_']) {
                    Some(idx) if is_script => {
                        format!("{}-{}{}", &tag[..idx], modifier, &tag[idx..])
                    }
                    _ => format!("{tag}-{modifier}"),
                }
            }
            None => trimmed.to_string(),
        };

        Self::from_bcp47(raw, &candidate.replace('_', "-"))
    }

    pub(crate) fn from_bcp47(raw: &str, candidate: &str) -> Result<Self, LocaleError> {
        let id = LanguageIdentifier::from_str(candidate).map_err(|source| {
            LocaleError::Unparseable {
                code: raw.to_string(),
                source,
            }
        })?;

        if id.language.is_empty() {
            return Err(LocaleError::Undetermined(raw.to_string()));
        }

        Ok(Self { id })
    }

    /// The base language subtag (e.g. "pt" for "pt-BR").
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    /// The script subtag in title case, if any.
    pub fn script(&self) -> Option<&str> {
        self.id.script.as_ref().map(|s| s.as_str())
    }

    /// The region subtag in upper case, if any.
    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|r| r.as_str())
    }

    /// Variant subtags (e.g. "valencia").
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.id.variants().map(|v| v.as_str())
    }

    /// True when both tags share base language and region; script is ignored.
    pub fn same_base_and_region(&self, other: &LocaleTag) -> bool {
        self.id.language == other.id.language && self.id.region == other.id.region
    }

    /// Canonical BCP-47 rendering.
    pub fn canonical(&self) -> String {
        self.id.to_string()
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id.fmt(f)
    }
}

impl FromStr for LocaleTag {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<LanguageIdentifier> for LocaleTag {
    fn as_ref(&self) -> &LanguageIdentifier {
        &self.id
    }
}

/// Extract the locale from a gettext-style directory path.
///
/// The locale is the second-to-last `/` component, so
/// `/translations/sr@latn/LC_MESSAGES` yields `sr-Latn`. Paths with fewer
/// than two components yield an empty string.
pub fn locale_from_path(dir: &str) -> String {
    let parts: Vec<&str> = dir.split('/').collect();
    if parts.len() < 2 {
        return String::new();
    }

    let locale_part = parts[parts.len() - 2];
    let mut at_split = locale_part.split('@');
    let language = at_split.next().unwrap_or_default();
    match at_split.next() {
        Some(script) => format!("{language}-{}", title_case(script)),
        None => locale_part.to_string(),
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Locale errors.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("empty locale code")]
    Empty,

    #[error("cannot parse locale code {code:?}: {source}")]
    Unparseable {
        code: String,
        #[source]
        source: LanguageIdentifierError,
    },

    #[error("locale code {0:?} has no language")]
    Undetermined(String),
}
