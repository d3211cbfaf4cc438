//! Drives the `oasgen` binary end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const ORDERS: &str = r#"{
  "title": "Orders API",
  "description": "Manage orders",
  "contact": {"name": "Team", "email": "team@example.nl", "url": "https://example.nl"},
  "resources": [{"name": "order", "plural": "orders"}]
}"#;

const MISSING_EMAIL: &str = r#"{
  "title": "Orders API",
  "description": "Manage orders",
  "contact": {"name": "Team", "url": "https://example.nl"},
  "resources": [{"name": "order", "plural": "orders"}]
}"#;

fn oasgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oasgen"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("OASGEN_CONFIG")
        .args(args)
        .output()
        .expect("failed to run oasgen")
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("orders.json"), ORDERS).unwrap();
    fs::write(dir.path().join("missing-email.json"), MISSING_EMAIL).unwrap();
    dir
}

#[test]
fn test_compile_prints_openapi_document() {
    let dir = workspace();
    let output = oasgen(dir.path(), &["compile", "orders.json"]);
    assert!(output.status.success());

    let document: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["openapi"], "3.0.2");
    let paths: Vec<&String> = document["paths"].as_object().unwrap().keys().collect();
    assert_eq!(paths, vec!["/orders", "/orders/{id}"]);
}

#[test]
fn test_compile_missing_field_is_validation_failure() {
    let dir = workspace();
    fs::write(dir.path().join("bad.json"), r#"{"title": "x"}"#).unwrap();
    let output = oasgen(dir.path(), &["compile", "bad.json"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_lint_reports_positions_and_fails() {
    let dir = workspace();
    let output = oasgen(
        dir.path(),
        &["lint", "missing-email.json", "--linter", "generator-syntax"],
    );
    assert_eq!(output.status.code(), Some(3));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("generator-syntax (1)"));
    assert!(stdout.contains("4:14 error   [contact-email-required] Contact email is required"));
}

#[test]
fn test_lint_clean_document() {
    let dir = workspace();
    let output = oasgen(dir.path(), &["lint", "orders.json"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No problems found"));
}

#[test]
fn test_unknown_linter_is_invalid_args() {
    let dir = workspace();
    let output = oasgen(dir.path(), &["lint", "orders.json", "--linter", "spectral"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown linter 'spectral'"));
}

#[test]
fn test_check_writes_yaml_from_config() {
    let dir = workspace();
    fs::write(dir.path().join("oasgen.toml"), "output_format = \"yaml\"\n").unwrap();

    let output = oasgen(dir.path(), &["check", "orders.json", "-o", "out/openapi.yaml"]);
    assert!(output.status.success());

    let written = fs::read_to_string(dir.path().join("out/openapi.yaml")).unwrap();
    assert!(written.contains("/orders/{id}"));
}

#[test]
fn test_check_withholds_document_on_errors() {
    let dir = workspace();
    let output = oasgen(dir.path(), &["check", "missing-email.json", "-o", "openapi.json"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(!dir.path().join("openapi.json").exists());
}

#[test]
fn test_render_template_from_directory() {
    let dir = workspace();
    fs::create_dir(dir.path().join("templates")).unwrap();
    fs::write(
        dir.path().join("templates/README.md"),
        "# {{ title }}\n\nContact: {{ contact.email }} {{ missing }}\n",
    )
    .unwrap();

    let output = oasgen(dir.path(), &["render", "orders.json", "--template", "README.md"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "# Orders API\n\nContact: team@example.nl {{ missing }}\n"
    );
}

#[test]
fn test_render_missing_template_is_template_error() {
    let dir = workspace();
    let output = oasgen(dir.path(), &["render", "orders.json"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_example_compiles() {
    let dir = workspace();
    let output = oasgen(dir.path(), &["example", "-o", "example.json"]);
    assert!(output.status.success());

    let output = oasgen(dir.path(), &["check", "example.json"]);
    assert!(output.status.success());
    let document: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(document["paths"]["/loan-requests/{id}"]["put"].is_object());
    assert!(document["paths"]["/authors"]["post"].is_null());
}
