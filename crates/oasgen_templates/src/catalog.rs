//! The repository templates oasgen knows about.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

/// Base location of the published repository templates.
pub const REMOTE_TEMPLATES_BASE: &str =
    "https://raw.githubusercontent.com/developer-overheid-nl/repository-template/refs/heads/main/templates";

/// A known repository template, identified by its file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateSlug {
    #[default]
    Security,
    CodeOfConduct,
    Licence,
    Publiccode,
    Readme,
}

impl TemplateSlug {
    /// All slugs, in catalogue order.
    pub fn all() -> [TemplateSlug; 5] {
        [
            TemplateSlug::Security,
            TemplateSlug::CodeOfConduct,
            TemplateSlug::Licence,
            TemplateSlug::Publiccode,
            TemplateSlug::Readme,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateSlug::Security => "SECURITY.md",
            TemplateSlug::CodeOfConduct => "CODE_OF_CONDUCT.md",
            TemplateSlug::Licence => "LICENCE.md",
            TemplateSlug::Publiccode => "publiccode.yml",
            TemplateSlug::Readme => "README.md",
        }
    }

    /// Raw URL of this template in the published template repository.
    pub fn remote_url(&self) -> String {
        format!("{}/{}", REMOTE_TEMPLATES_BASE, self.as_str())
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_slug(self.as_str())
    }
}

impl fmt::Display for TemplateSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateSlug {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim_start_matches('/');
        TemplateSlug::all()
            .into_iter()
            .find(|slug| slug.as_str() == name)
            .ok_or_else(|| TemplateError::UnknownSlug(s.to_string()))
    }
}

impl Serialize for TemplateSlug {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TemplateSlug {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// How rendered template text should be presented.
///
/// Purely a display hint; substitution does not look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// YAML documents such as `publiccode.yml`.
    Structured,
    /// Markdown and everything else.
    Prose,
}

impl OutputFormat {
    pub fn from_slug(slug: &str) -> Self {
        let lower = slug.to_ascii_lowercase();
        if lower.ends_with(".yml") || lower.ends_with(".yaml") {
            OutputFormat::Structured
        } else {
            OutputFormat::Prose
        }
    }
}
