//! Optional `oasgen.toml` configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

use oasgen_lint::LinterKind;

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "oasgen.toml";

/// Serialization of the compiled artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Linters run when the input does not name its own.
    pub linters: Vec<LinterKind>,
    pub templates_dir: PathBuf,
    pub output_format: ArtifactFormat,
    pub watch_interval_ms: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            linters: LinterKind::all(),
            templates_dir: PathBuf::from("templates"),
            output_format: ArtifactFormat::Json,
            watch_interval_ms: 500,
        }
    }
}

impl CliConfig {
    /// Load `explicit` if given, else `oasgen.toml` in the working directory
    /// when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.is_file() {
                    Self::from_path(path)
                } else {
                    debug!("No {} found, using defaults", CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn linter_names(&self) -> Vec<String> {
        self.linters.iter().map(|kind| kind.name().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = CliConfig::from_toml(
            "linters = [\"generator-syntax\"]\noutput_format = \"yaml\"\n",
        )
        .unwrap();
        assert_eq!(config.linters, vec![LinterKind::GeneratorSyntax]);
        assert_eq!(config.output_format, ArtifactFormat::Yaml);
        assert_eq!(config.watch_interval_ms, 500);
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
    }

    #[test]
    fn test_unknown_linter_is_rejected() {
        assert!(CliConfig::from_toml("linters = [\"spectral\"]").is_err());
        assert!(CliConfig::from_toml("colour = true").is_err());
    }

    #[test]
    fn test_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "watch_interval_ms = 50\ntemplates_dir = \"tpl\"\n").unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.watch_interval_ms, 50);
        assert_eq!(config.templates_dir, PathBuf::from("tpl"));
        assert_eq!(config.linter_names(), vec!["generator-syntax", "parameters"]);

        assert!(CliConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
