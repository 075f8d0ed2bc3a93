//! Loco API payloads.

use serde::{Deserialize, Serialize};

/// Entry of the `/locales` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Locale {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: bool,
}

/// Entry of the `/assets` listing. The vendor sends much more; only the id is used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub id: String,
}

/// Locale reference embedded in a translation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslationLocale {
    pub code: String,
    #[serde(default)]
    pub name: String,
}

/// One locale's translation of an asset, from `/translations/{asset}.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub translated: bool,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub plurals: Vec<Plural>,
    pub locale: TranslationLocale,
}

/// Plural form of a translation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Plural {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub translated: bool,
    #[serde(default)]
    pub translation: String,
}

/// Body of the asset metadata update.
#[derive(Debug, Clone, Serialize)]
pub struct AssetPrintf<'a> {
    pub printf: &'a str,
}
