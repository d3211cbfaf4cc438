//! Rendering catalogue templates from a directory checkout.

use std::fs;

use oasgen_templates::{
    render_from, DirectoryTemplateSource, OutputFormat, TemplateRenderer, TemplateSlug,
    TemplateSource,
};
use tempfile::TempDir;

const DOCUMENT: &str = r#"{
  "title": "Bibliotheek API",
  "description": "Boeken en auteurs",
  "contact": {"name": "Team Bibliotheek", "email": "bieb@example.nl", "url": "https://example.nl"},
  "resources": [{"name": "book", "plural": "books"}]
}"#;

fn checkout() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("SECURITY.md"),
        "# Security\n\nReport issues to {{ contact.email }}.\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("publiccode.yml"),
        "publiccodeYmlVersion: \"0.4\"\nname: {{title}}\nurl: {{ contact.url }}\nlegal:\n  repoOwner: {{ organisation.name }}\n",
    )
    .unwrap();
    dir
}

#[test]
fn test_renders_default_template() {
    let dir = checkout();
    let source = DirectoryTemplateSource::new(dir.path());

    let rendered = render_from(&source, TemplateSlug::default(), DOCUMENT).unwrap();
    assert_eq!(rendered, "# Security\n\nReport issues to bieb@example.nl.\n");
}

#[test]
fn test_structured_template_keeps_unresolved_markers() {
    let dir = checkout();
    let source = DirectoryTemplateSource::new(dir.path());

    let slug: TemplateSlug = "publiccode.yml".parse().unwrap();
    assert_eq!(slug.output_format(), OutputFormat::Structured);

    let rendered = render_from(&source, slug, DOCUMENT).unwrap();
    assert_eq!(
        rendered,
        "publiccodeYmlVersion: \"0.4\"\nname: Bibliotheek API\nurl: https://example.nl\nlegal:\n  repoOwner: {{ organisation.name }}\n"
    );
}

#[test]
fn test_rendering_is_stable() {
    let dir = checkout();
    let source = DirectoryTemplateSource::new(dir.path());
    let renderer = TemplateRenderer::new();

    for slug in source.available().unwrap() {
        let template = source.fetch(slug).unwrap();
        let first = renderer.render(DOCUMENT, &template);
        let second = renderer.render(DOCUMENT, &template);
        assert_eq!(first, second, "{}", slug);
    }
}

#[test]
fn test_invalid_source_returns_template_verbatim() {
    let dir = checkout();
    let source = DirectoryTemplateSource::new(dir.path());

    let template = source.fetch(TemplateSlug::Security).unwrap();
    let rendered = render_from(&source, TemplateSlug::Security, "{ \"title\": ").unwrap();
    assert_eq!(rendered, template);
}
