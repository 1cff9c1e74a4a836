//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("mdcanon")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("canonical form"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("mdcanon")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("mdcanon")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("mdcanon")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_format_help() {
    cargo_bin_cmd!("mdcanon")
        .args(["format", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Format a Markdown document"));
}

#[test]
fn test_parse_help() {
    cargo_bin_cmd!("mdcanon")
        .args(["parse", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parse"));
}

#[test]
fn test_missing_file() {
    cargo_bin_cmd!("mdcanon")
        .args(["format", "does-not-exist.md"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_config_is_reported() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = temp_dir.path().join("bad.toml");
    std::fs::write(&config, "paragraphs = \"sideways\"\n").unwrap();

    cargo_bin_cmd!("mdcanon")
        .args(["format", "--config", config.to_str().unwrap()])
        .write_stdin("text\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.toml"));
}
