//! Where template text comes from.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::catalog::TemplateSlug;
use crate::error::{TemplateError, TemplateResult};
use crate::renderer::TemplateRenderer;

/// Supplies raw template text by slug.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource {
    fn fetch(&self, slug: TemplateSlug) -> TemplateResult<String>;

    /// Slugs this source can serve.
    fn available(&self) -> TemplateResult<Vec<TemplateSlug>>;
}

/// Serves templates from a local checkout of the template repository.
pub struct DirectoryTemplateSource {
    root: PathBuf,
}

impl DirectoryTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl TemplateSource for DirectoryTemplateSource {
    fn fetch(&self, slug: TemplateSlug) -> TemplateResult<String> {
        let path = self.root.join(slug.as_str());
        if !path.is_file() {
            return Err(TemplateError::NotFound(format!("{} in {:?}", slug, self.root)));
        }
        debug!("Loading template from {:?}", path);
        Ok(fs::read_to_string(path)?)
    }

    fn available(&self) -> TemplateResult<Vec<TemplateSlug>> {
        if !self.root.exists() {
            return Err(TemplateError::MissingDirectory(self.root.clone()));
        }

        let mut slugs = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            match name.parse::<TemplateSlug>() {
                Ok(slug) => slugs.push(slug),
                Err(_) => warn!("Ignoring unknown template file: {}", name),
            }
        }
        slugs.sort();

        info!("Found {} template(s) in {:?}", slugs.len(), self.root);
        Ok(slugs)
    }
}

/// Templates held in memory, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateSource {
    templates: HashMap<TemplateSlug, String>,
}

impl InMemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, slug: TemplateSlug, text: impl Into<String>) -> Self {
        self.insert(slug, text);
        self
    }

    pub fn insert(&mut self, slug: TemplateSlug, text: impl Into<String>) {
        self.templates.insert(slug, text.into());
    }
}

impl TemplateSource for InMemoryTemplateSource {
    fn fetch(&self, slug: TemplateSlug) -> TemplateResult<String> {
        self.templates
            .get(&slug)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(slug.to_string()))
    }

    fn available(&self) -> TemplateResult<Vec<TemplateSlug>> {
        let mut slugs: Vec<TemplateSlug> = self.templates.keys().copied().collect();
        slugs.sort();
        Ok(slugs)
    }
}

/// Fetch a template and render it against `source_text` in one step.
pub fn render_from(
    source: &dyn TemplateSource,
    slug: TemplateSlug,
    source_text: &str,
) -> TemplateResult<String> {
    let template = source.fetch(slug)?;
    Ok(TemplateRenderer::new().render(source_text, &template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use tempfile::TempDir;

    #[test]
    fn test_directory_source_lists_known_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "# {{title}}").unwrap();
        fs::write(dir.path().join("SECURITY.md"), "security").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("LICENCE.md")).unwrap();

        let source = DirectoryTemplateSource::new(dir.path());
        assert_eq!(
            source.available().unwrap(),
            vec![TemplateSlug::Security, TemplateSlug::Readme]
        );
        assert_eq!(source.fetch(TemplateSlug::Readme).unwrap(), "# {{title}}");
        assert!(matches!(
            source.fetch(TemplateSlug::Licence),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let source = DirectoryTemplateSource::new(dir.path().join("nope"));
        assert!(matches!(
            source.available(),
            Err(TemplateError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemoryTemplateSource::new()
            .with_template(TemplateSlug::Readme, "readme")
            .with_template(TemplateSlug::Security, "security");
        assert_eq!(
            source.available().unwrap(),
            vec![TemplateSlug::Security, TemplateSlug::Readme]
        );
        assert!(source.fetch(TemplateSlug::Publiccode).is_err());
    }

    #[test]
    fn test_render_from_uses_source() {
        let mut source = MockTemplateSource::new();
        source
            .expect_fetch()
            .with(eq(TemplateSlug::Publiccode))
            .times(1)
            .returning(|_| Ok("name: {{ title }}\n".to_string()));

        let rendered =
            render_from(&source, TemplateSlug::Publiccode, r#"{"title": "Orders"}"#).unwrap();
        assert_eq!(rendered, "name: Orders\n");
    }

    #[test]
    fn test_render_from_propagates_fetch_error() {
        let mut source = MockTemplateSource::new();
        source
            .expect_fetch()
            .returning(|slug| Err(TemplateError::NotFound(slug.to_string())));

        assert!(render_from(&source, TemplateSlug::Readme, "{}").is_err());
    }
}
