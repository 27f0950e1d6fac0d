#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const DOCUMENT: &str = "1 Intro\nThe door must be opened by the user.\n2 Safety\nThe system shall respond.\n";

/// `reqlint` running in `dir` with no credentials or overrides leaking in
/// from the caller's environment.
fn reqlint(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reqlint").expect("reqlint binary");
    cmd.current_dir(dir)
        .env_remove("REQLINT_PROVIDER")
        .env_remove("REQLINT_MODEL")
        .env_remove("REQLINT_MAX_TOKENS")
        .env_remove("REQLINT_PARALLEL")
        .env_remove("AZURE_OPENAI_API_KEY")
        .env_remove("AZURE_OPENAI_ENDPOINT")
        .env_remove("AZURE_OPENAI_VERSION")
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .env("REQLINT_NETWORK_POLICY", "deny");
    cmd
}

fn write_doc(dir: &Path, name: &str) {
    fs::write(dir.join(name), DOCUMENT).unwrap();
}

#[test]
fn rules_lists_the_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    reqlint(tmp.path())
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("conciseness"))
        .stdout(predicate::str::contains("dependency-ambiguity"));
}

#[test]
fn rules_json_is_machine_readable() {
    let tmp = tempfile::tempdir().unwrap();
    let out = reqlint(tmp.path())
        .args(["rules", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let keys: Vec<_> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["key"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        keys,
        vec![
            "conciseness",
            "missing-elements",
            "ambiguity",
            "typos",
            "dependency-ambiguity"
        ]
    );
}

#[test]
fn review_without_rules_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "spec.txt");
    reqlint(tmp.path())
        .args(["review", "spec.txt", "--provider", "fake"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("select at least one evaluation rule"));
    assert!(!tmp.path().join("evaluation_result.md").exists());
}

#[test]
fn review_with_fake_provider_writes_markdown() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "spec.txt");
    reqlint(tmp.path())
        .args(["review", "spec.txt", "--rule", "ambiguity", "--provider", "fake"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let report = fs::read_to_string(tmp.path().join("evaluation_result.md")).unwrap();
    assert!(report.starts_with("# Expression Quality Review"));
    assert!(report.contains("No issues found."));
    assert!(report.contains("- Rules: Ambiguous wording"));
    assert!(report.contains("- Chapters evaluated: 2 (skipped: 0)"));
}

#[test]
fn review_json_to_stdout() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "spec.md");
    let out = reqlint(tmp.path())
        .args([
            "review",
            "spec.md",
            "--rule",
            "typos,conciseness",
            "--provider",
            "fake",
            "--format",
            "json",
            "--stdout",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["document"], "spec.md");
    assert_eq!(v["rules"], serde_json::json!(["conciseness", "typos"]));
    assert_eq!(v["summary"]["issues"], 0);
    assert_eq!(v["chapters"][1]["label"], "2 Safety");
    assert!(!tmp.path().join("evaluation_result.json").exists());
}

#[test]
fn config_file_supplies_provider_and_rules() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "spec.txt");
    fs::write(
        tmp.path().join("reqlint.yaml"),
        "provider: fake\nrules: [missing-elements, typos]\noutput: review.md\n",
    )
    .unwrap();
    reqlint(tmp.path())
        .args(["review", "spec.txt"])
        .assert()
        .success();

    let report = fs::read_to_string(tmp.path().join("review.md")).unwrap();
    assert!(report.contains("No issues found."));
}

#[test]
fn invalid_config_is_a_config_error() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "spec.txt");
    fs::write(tmp.path().join("reqlint.yaml"), "provider: fake\nparallel: 0\n").unwrap();
    reqlint(tmp.path())
        .args(["review", "spec.txt", "--all-rules"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("parallel must be at least 1"));
}

#[test]
fn missing_document_is_a_config_error() {
    let tmp = tempfile::tempdir().unwrap();
    reqlint(tmp.path())
        .args(["review", "nope.txt", "--all-rules", "--provider", "fake"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn unsupported_format_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("spec.odt"), "binary").unwrap();
    reqlint(tmp.path())
        .args(["review", "spec.odt", "--all-rules", "--provider", "fake"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported document format"));
}

#[test]
fn azure_without_credentials_names_the_variable() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "spec.txt");
    reqlint(tmp.path())
        .args(["review", "spec.txt", "--all-rules"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("AZURE_OPENAI_API_KEY"));
}

#[test]
fn deny_policy_refuses_azure_even_with_credentials() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "spec.txt");
    reqlint(tmp.path())
        .args(["review", "spec.txt", "--all-rules", "--provider", "azure"])
        .env("AZURE_OPENAI_API_KEY", "test-key")
        .env("AZURE_OPENAI_ENDPOINT", "https://contoso.openai.azure.com")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("network policy 'deny' blocks provider 'azure'"))
        .stderr(predicate::str::contains("contoso.openai.azure.com"));
    assert!(!tmp.path().join("evaluation_result.md").exists());
}

#[test]
fn unknown_rule_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "spec.txt");
    reqlint(tmp.path())
        .args(["review", "spec.txt", "--rule", "grammar", "--provider", "fake"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("grammar"));
}

#[test]
fn segment_previews_chapters() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(tmp.path(), "spec.txt");
    reqlint(tmp.path())
        .args(["segment", "spec.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] 1 Intro (2 lines)"))
        .stdout(predicate::str::contains("[1] 2 Safety (3 lines)"));
}

#[test]
fn version_prints_package_version() {
    let tmp = tempfile::tempdir().unwrap();
    reqlint(tmp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
