//! Placeholder substitution.

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

/// Substitutes `{{ dotted.path }}` markers with values from a JSON document.
///
/// Path segments are object keys, or array indices when numeric. Strings are
/// inserted raw, other scalars in their JSON form, arrays and objects as
/// compact JSON. Markers that do not resolve are left exactly as written.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    marker: Regex,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self {
            marker: Regex::new(r"\{\{\s*([A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*)\s*\}\}")
                .expect("marker pattern is a valid regex"),
        }
    }

    /// Render `template` against the JSON document in `source_text`.
    ///
    /// Source text that is not JSON resolves nothing, so every marker stays.
    pub fn render(&self, source_text: &str, template: &str) -> String {
        match serde_json::from_str::<Value>(source_text) {
            Ok(document) => self.render_value(&document, template),
            Err(e) => {
                debug!("Source is not JSON, leaving markers in place: {}", e);
                template.to_string()
            }
        }
    }

    pub fn render_value(&self, document: &Value, template: &str) -> String {
        self.marker
            .replace_all(template, |caps: &Captures| {
                match resolve(document, &caps[1]) {
                    Some(value) => display(value),
                    None => {
                        debug!("Unresolved marker: {}", &caps[1]);
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }

    /// Dotted paths of every marker in `template`, in order of appearance.
    pub fn markers<'t>(&self, template: &'t str) -> Vec<&'t str> {
        self.marker
            .captures_iter(template)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }
}

/// Walk a dotted path through objects and arrays.
pub fn resolve<'v>(document: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(document, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
