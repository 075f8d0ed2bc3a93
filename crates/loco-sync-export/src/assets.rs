//! Source constants generated from asset ids.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::LocoApi;
use crate::error::{ExportError, Result};
use crate::fs::write_file;
use crate::models::Asset;
use crate::template::TemplateRenderer;

static NAMED_PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\((\w+?)\)(\S)?").expect("valid regex"));

/// Built-in template: a Go source file of string constants.
pub const DEFAULT_TEMPLATE: &str = "\
// Code generated by loco-sync assets; DO NOT EDIT.

package locales

// {{count}} asset ids.
const (
{{constants}}
)
";

/// Fetch the asset catalog and write the generated constants file.
pub async fn generate(api: &LocoApi, out: &Path, template: Option<&Path>) -> Result<usize> {
    let template = match template {
        Some(path) => std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let assets = api.assets().await?;
    let (rendered, count) = render(&assets, &template)?;
    write_file(out, rendered.as_bytes())?;
    tracing::info!(file = %out.display(), count, "wrote asset ids");
    Ok(count)
}

/// Render the constants file. Returns the text and the number of constants.
///
/// Constants are sorted by asset id. When two ids produce the same
/// identifier the first one wins and the other is logged.
pub fn render(assets: &[Asset], template: &str) -> Result<(String, usize)> {
    let ids: BTreeMap<&str, String> = assets
        .iter()
        .map(|asset| (asset.id.as_str(), valid_constant(&asset.id)))
        .collect();

    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut lines = Vec::with_capacity(ids.len());
    for (id, identifier) in &ids {
        if identifier.is_empty() {
            tracing::warn!(asset = %id, "asset id has no identifier characters, skipping");
            continue;
        }
        if let Some(first) = seen.get(identifier.as_str()) {
            tracing::warn!(asset = %id, other = %first, identifier = %identifier, "duplicate identifier, skipping");
            continue;
        }
        seen.insert(identifier, id);
        lines.push(format!("\t{identifier} = {}", quote(id)));
    }

    let context = HashMap::from([
        ("constants", lines.join("\n")),
        ("count", lines.len().to_string()),
    ]);
    let rendered = TemplateRenderer::new().render_string(template, &context)?;
    Ok((rendered, lines.len()))
}

/// Identifier-safe name for an asset id.
///
/// Whitespace-separated fields are title-cased per `.`-separated part and
/// joined; a `%(name)s` field becomes `_Name`. Characters that cannot appear
/// in an identifier are dropped and a leading digit gets a `_` prefix.
pub fn valid_constant(asset_id: &str) -> String {
    let mut identifier = String::new();
    for field in asset_id.split_whitespace() {
        if field.starts_with('%') {
            if let Some(caps) = NAMED_PARAMETER.captures(field) {
                identifier.push('_');
                identifier.push_str(&title_case(&caps[1]));
            }
            continue;
        }
        for part in field.split('.') {
            identifier.push_str(&title_case(part));
        }
    }

    let mut identifier: String = identifier
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    identifier
}

/// Upper-case the first letter of every word and lower-case the rest.
/// Words are separated by anything but letters, digits and apostrophes.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = c != '\'';
        }
    }
    out
}

/// Go interpreted string literal.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("touchid.authentication-prompt", "TouchidAuthenticationPrompt" ; "dots and hyphens")]
    #[test_case("import.drop-here %(filename)s", "ImportDropHere_Filename" ; "named parameter")]
    #[test_case("2fa.code", "_2faCode" ; "leading digit")]
    #[test_case("Hourglass", "Hourglass" ; "single word")]
    #[test_case("shortcut.LAST-month", "ShortcutLastMonth" ; "mixed case")]
    #[test_case("reports.total %(amount)d for %(count)s", "ReportsTotal_AmountFor_Count" ; "multiple fields")]
    #[test_case("error.don't", "ErrorDont" ; "apostrophe")]
    fn test_valid_constant(id: &str, expected: &str) {
        assert_eq!(valid_constant(id), expected);
    }

    #[test]
    fn test_valid_constant_is_identifier() {
        for id in ["9.lives", "a-b.c d", "%(x)s", "über.straße"] {
            let ident = valid_constant(id);
            assert!(!ident.contains('-'), "{ident}");
            assert!(!ident.starts_with(|c: char| c.is_ascii_digit()), "{ident}");
        }
    }

    fn asset(id: &str) -> Asset {
        Asset { id: id.to_string() }
    }

    #[test]
    fn test_render_sorted_constants() {
        let assets = vec![asset("shortcut.last-month"), asset("Hourglass"), asset("say \"hi\"")];
        let (rendered, count) = render(&assets, DEFAULT_TEMPLATE).unwrap();

        assert_eq!(count, 3);
        assert!(rendered.contains("package locales"));
        assert!(rendered.contains("// 3 asset ids."));
        let hourglass = rendered.find("\tHourglass = \"Hourglass\"").unwrap();
        let say = rendered.find("\tSayHi = \"say \\\"hi\\\"\"").unwrap();
        let shortcut = rendered.find("\tShortcutLastMonth = \"shortcut.last-month\"").unwrap();
        assert!(hourglass < say && say < shortcut);
    }

    #[test]
    fn test_render_skips_duplicate_identifiers() {
        let assets = vec![asset("home.title"), asset("home-title")];
        let (rendered, count) = render(&assets, "{{constants}}").unwrap();
        assert_eq!(count, 1);
        assert_eq!(rendered, "\tHomeTitle = \"home-title\"");
    }

    #[test]
    fn test_custom_template() {
        let (rendered, _) = render(&[asset("a.b")], "export const enum Ids {\n{{constants}}\n}").unwrap();
        assert_eq!(rendered, "export const enum Ids {\n\tAB = \"a.b\"\n}");
    }
}
