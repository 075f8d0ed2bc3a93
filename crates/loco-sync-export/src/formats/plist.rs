//! Asset ids that feed iOS `Info.plist` keys.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

/// Plist key of the app's display name.
pub const BUNDLE_NAME_KEY: &str = "CFBundleName";

/// Longest bundle name the home screen shows without truncating.
pub const MAX_BUNDLE_NAME_CHARS: usize = 15;

/// Asset id to the plist keys it provides. One asset may fill several keys.
static PLIST_KEYS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let table: [(&'static str, &'static [&'static str]); 6] = [
        ("touchid.authentication-prompt", &["NSFaceIDUsageDescription"]),
        (
            "schedules.territory.current-location-usage",
            &["NSLocationWhenInUseUsageDescription"],
        ),
        (
            "mobile.calendar.usage",
            &["NSCalendarsFullAccessUsageDescription", "NSCalendarsUsageDescription"],
        ),
        ("mobile.camera.usage", &["NSCameraUsageDescription"]),
        ("shortcut.last-month", &["shortcut.last-month"]),
        ("Hourglass", &[BUNDLE_NAME_KEY]),
    ];
    HashMap::from(table)
});

/// Plist keys for an asset id.
pub fn plist_keys(asset: &str) -> Option<&'static [&'static str]> {
    PLIST_KEYS.get(asset).copied()
}

/// Render `InfoPlist.strings` from asset translations.
///
/// Unmapped assets are logged and left out. Lines are sorted by key so
/// repeated exports produce identical files.
pub fn render_strings(locale: &str, translations: &BTreeMap<String, String>) -> String {
    let mut lines = Vec::new();
    for (asset, translation) in translations {
        let Some(keys) = plist_keys(asset) else {
            tracing::error!(asset = %asset, locale = %locale, "asset not found in plist map");
            continue;
        };
        for key in keys {
            if *key == BUNDLE_NAME_KEY {
                check_bundle_name(locale, translation);
            }
            lines.push((*key, translation.as_str()));
        }
    }
    lines.sort();

    let mut out = String::new();
    for (key, value) in lines {
        out.push_str(&format!("\"{}\" = \"{}\";\n", escape(key), escape(value)));
    }
    out
}

/// Warn when a bundle name is empty or too long. Returns whether it is usable.
pub fn check_bundle_name(locale: &str, value: &str) -> bool {
    let length = value.chars().count();
    if length == 0 || length > MAX_BUNDLE_NAME_CHARS {
        tracing::warn!(locale = %locale, length, "{BUNDLE_NAME_KEY} too long or empty");
        false
    } else {
        true
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_out_to_multiple_keys() {
        assert_eq!(
            plist_keys("mobile.calendar.usage").unwrap(),
            &["NSCalendarsFullAccessUsageDescription", "NSCalendarsUsageDescription"]
        );
        assert!(plist_keys("unknown.asset").is_none());
    }

    #[test]
    fn test_render_strings_sorted_and_escaped() {
        let translations = BTreeMap::from([
            ("mobile.calendar.usage".to_string(), "Needs \"calendar\"".to_string()),
            ("Hourglass".to_string(), "Hourglass".to_string()),
            ("not.mapped".to_string(), "dropped".to_string()),
        ]);

        let rendered = render_strings("en", &translations);
        assert_eq!(
            rendered,
            "\"CFBundleName\" = \"Hourglass\";\n\
             \"NSCalendarsFullAccessUsageDescription\" = \"Needs \\\"calendar\\\"\";\n\
             \"NSCalendarsUsageDescription\" = \"Needs \\\"calendar\\\"\";\n"
        );
    }

    #[test]
    fn test_bundle_name_length() {
        assert!(check_bundle_name("en", "Hourglass"));
        assert!(check_bundle_name("en", "123456789012345"));
        assert!(!check_bundle_name("en", "1234567890123456"));
        assert!(!check_bundle_name("en", ""));
        // counted in characters, not bytes
        assert!(check_bundle_name("ja", "アワーグラス"));
    }
}
