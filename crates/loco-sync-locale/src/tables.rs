//! Static locale override tables.
//!
//! Keys are raw vendor locale codes, matched exactly. Values are returned
//! verbatim without any further parsing.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Android resource qualifiers that differ from the generic rendering.
pub static ANDROID_OVERRIDES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("pl-PL", "pl"),
        ("sv-SE", "sv"),
        ("da-DK", "da"),
        ("lt-LT", "lt"),
        ("ko-KR", "ko"),
        ("cs-CZ", "cs"),
        ("hr-HR", "hr"),
        ("bg-BG", "bg"),
        ("ja-JP", "ja"),
        ("ro-RO", "ro"),
        ("zh-CN", "zh"),
        ("uk-UA", "uk"),
        ("hu-HU", "hu"),
        ("el-GR", "el"),
        ("vi-VN", "vi"),
        ("th-TH", "th"),
        ("fi-FI", "fi"),
        ("gu-IN", "gu"),
        // java still uses the legacy code for indonesian
        ("id-ID", "in"),
        ("tr-TR", "tr"),
        ("zh-Hant", "b+zh+Hant"),
    ])
});

/// iOS `.lproj` names, checked before [`VENDOR_DIRECTORIES`].
pub static IOS_OVERRIDES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("pt-BR", "pt"),
        ("tw", "ak"),
        ("zh-CN", "zh-Hans"),
        ("tl", "fil"),
        ("vec-BR", "vec"),
    ])
});

/// Directory names the product ships for region-qualified vendor codes.
pub static VENDOR_DIRECTORIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("en-US", "en"),
        ("es-ES", "es"),
        ("it-IT", "it"),
        ("nl-NL", "nl"),
        ("de-DE", "de"),
        ("fr-FR", "fr"),
        ("pl-PL", "pl"),
        ("sv-SE", "sv"),
        ("da-DK", "da"),
        ("lt-LT", "lt"),
        ("ko-KR", "ko"),
        ("ru-RU", "ru"),
        ("cs-CZ", "cs"),
        ("hr-HR", "hr"),
        ("ja-JP", "ja"),
        ("bg-BG", "bg"),
        ("ro-RO", "ro"),
        ("hu-HU", "hu"),
        ("uk-UA", "uk"),
        ("el-GR", "el"),
        ("vi-VN", "vi"),
        ("th-TH", "th"),
        ("et-EE", "et"),
        ("fi-FI", "fi"),
        ("id-ID", "id"),
        ("ht-HT", "ht"),
        ("sl-SI", "sl"),
        ("gu-IN", "gu"),
        ("tr-TR", "tr"),
        ("sq-AL", "sq"),
        ("sk-SK", "sk"),
        ("af-ZA", "af"),
        ("ca-ES", "ca"),
        ("gl-ES", "gl"),
        ("si-LK", "si"),
        ("hy-AM", "hy"),
        ("ms-MY", "ms"),
        ("ka-GE", "ka"),
        ("az-AZ", "az"),
        ("ne-NP", "ne"),
        ("zh-CN", "zh-Hans"),
        ("zh-TW", "zh-Hant"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_android_indonesian() {
        assert_eq!(ANDROID_OVERRIDES.get("id-ID"), Some(&"in"));
    }

    #[test]
    fn test_ios_overrides_take_chinese_script() {
        assert_eq!(IOS_OVERRIDES.get("zh-CN"), Some(&"zh-Hans"));
        assert_eq!(VENDOR_DIRECTORIES.get("zh-CN"), Some(&"zh-Hans"));
    }

    #[test]
    fn test_ambiguous_bases_not_collapsed() {
        // both portuguese variants ship, so neither may collapse statically
        assert!(!VENDOR_DIRECTORIES.contains_key("pt-BR"));
        assert!(!VENDOR_DIRECTORIES.contains_key("pt-PT"));
    }
}
