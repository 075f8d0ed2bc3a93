//! Fallback chains between supported locales.

use std::fmt;

use fluent_langneg::{negotiate_languages, NegotiationStrategy};

use crate::LocaleTag;

/// Ordered list of locales to try after a target locale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FallbackChain(Vec<LocaleTag>);

impl FallbackChain {
    /// Locales in fallback order.
    pub fn locales(&self) -> &[LocaleTag] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FallbackChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(LocaleTag::canonical).collect();
        f.write_str(&names.join(", "))
    }
}

/// Computes fallback chains over a fixed set of supported locales.
#[derive(Debug, Clone)]
pub struct FallbackResolver {
    supported: Vec<LocaleTag>,
    source: LocaleTag,
}

impl FallbackResolver {
    /// Create a resolver. The source locale is registered first, so it is the
    /// matcher's default when nothing closer exists.
    pub fn new(source: LocaleTag, others: impl IntoIterator<Item = LocaleTag>) -> Self {
        let mut supported = vec![source.clone()];
        for tag in others {
            if !supported.contains(&tag) {
                supported.push(tag);
            }
        }
        Self { supported, source }
    }

    /// The source locale.
    pub fn source(&self) -> &LocaleTag {
        &self.source
    }

    /// All supported locales, source first.
    pub fn supported(&self) -> &[LocaleTag] {
        &self.supported
    }

    /// Fallback chain for one target locale.
    ///
    /// Each step drops every candidate sharing base language and region with
    /// the previous match (initially the target), then asks the matcher for
    /// the closest remaining locale to the target. Stops once the source is
    /// reached or no candidates remain.
    pub fn chain(&self, target: &LocaleTag) -> FallbackChain {
        let mut candidates: Vec<&LocaleTag> = self
            .supported
            .iter()
            .filter(|tag| !tag.same_base_and_region(target))
            .collect();
        let mut chain = Vec::new();

        while let Some(matched) = closest(target, &candidates) {
            let reached_source = matched.same_base_and_region(&self.source);
            candidates.retain(|tag| !tag.same_base_and_region(&matched));
            chain.push(matched);
            if reached_source {
                break;
            }
        }

        FallbackChain(chain)
    }

    /// Chains for every supported locale except those matching the source.
    pub fn chains(&self) -> Vec<(LocaleTag, FallbackChain)> {
        self.supported
            .iter()
            .filter(|tag| !tag.same_base_and_region(&self.source))
            .map(|tag| (tag.clone(), self.chain(tag)))
            .collect()
    }
}

fn closest(target: &LocaleTag, candidates: &[&LocaleTag]) -> Option<LocaleTag> {
    let default = candidates.first()?;
    let requested = std::slice::from_ref(target);
    negotiate_languages(
        requested,
        candidates,
        Some(default),
        NegotiationStrategy::Lookup,
    )
    .first()
    .map(|tag| LocaleTag::clone(tag))
}
