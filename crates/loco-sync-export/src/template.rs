//! `{{variable}}` substitution for generated files.

use std::collections::HashMap;

use regex::Regex;

use crate::error::{ExportError, Result};

/// Template renderer
pub struct TemplateRenderer {
    variable_pattern: Regex,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        // Match {{variable_name}} or {{ variable_name }}
        let variable_pattern = Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("valid regex");

        Self { variable_pattern }
    }

    /// Render a string with variable substitution.
    ///
    /// Every referenced variable must be present in `context`.
    pub fn render_string(&self, template: &str, context: &HashMap<&str, String>) -> Result<String> {
        let mut missing = Vec::new();

        let rendered = self
            .variable_pattern
            .replace_all(template, |caps: &regex::Captures<'_>| {
                match context.get(&caps[1]) {
                    Some(value) => value.clone(),
                    None => {
                        missing.push(caps[1].to_string());
                        String::new()
                    }
                }
            })
            .into_owned();

        if !missing.is_empty() {
            missing.dedup();
            return Err(ExportError::Template(missing.join(", ")));
        }

        Ok(rendered)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
