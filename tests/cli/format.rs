//! Format subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_format_stdin_to_stdout() {
    cargo_bin_cmd!("mdcanon")
        .arg("format")
        .write_stdin("# Heading\n\nParagraph\ntext.")
        .assert()
        .success()
        .stdout("Heading\n=======\n\nParagraph text.\n");
}

#[test]
fn test_format_file_to_stdout_leaves_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(&test_file, "_a_\n").unwrap();

    cargo_bin_cmd!("mdcanon")
        .args(["format", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("*a*\n");

    assert_eq!(fs::read_to_string(&test_file).unwrap(), "_a_\n");
}

#[test]
fn test_format_write_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(&test_file, "    code\n").unwrap();

    cargo_bin_cmd!("mdcanon")
        .args(["format", "--write", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Formatted"));

    assert_eq!(
        fs::read_to_string(&test_file).unwrap(),
        "```\ncode\n```\n"
    );
}

#[test]
fn test_format_write_requires_file() {
    cargo_bin_cmd!("mdcanon")
        .args(["format", "--write"])
        .write_stdin("text\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--write requires an input file"));
}

#[test]
fn test_format_check_formatted() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(&test_file, "Heading\n=======\n\nParagraph.\n").unwrap();

    cargo_bin_cmd!("mdcanon")
        .args(["format", "--check", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("correctly formatted"));
}

#[test]
fn test_format_check_unformatted() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(&test_file, "# Heading\n").unwrap();

    cargo_bin_cmd!("mdcanon")
        .args(["format", "--check", test_file.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("-# Heading"))
        .stdout(predicate::str::contains("+Heading"));

    assert_eq!(fs::read_to_string(&test_file).unwrap(), "# Heading\n");
}

#[test]
fn test_format_check_and_write_conflict() {
    cargo_bin_cmd!("mdcanon")
        .args(["format", "--check", "--write", "x.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_format_uses_discovered_config() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(&test_file, "a\\\nb\n").unwrap();
    fs::write(
        temp_dir.path().join(".mdcanon.toml"),
        "hard-break = \"spaces\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("mdcanon")
        .args(["format", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("a  \nb\n");
}

#[test]
fn test_format_explicit_config_raw_paragraphs() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("raw.toml");
    fs::write(&config, "paragraphs = \"raw\"\n").unwrap();

    cargo_bin_cmd!("mdcanon")
        .args(["format", "--config", config.to_str().unwrap()])
        .write_stdin("  # kept  \n- as is\n\n\n")
        .assert()
        .success()
        .stdout("  # kept  \n- as is\n");
}

#[test]
fn test_format_preserves_crlf() {
    cargo_bin_cmd!("mdcanon")
        .arg("format")
        .write_stdin("a\r\nb\r\n")
        .assert()
        .success()
        .stdout("a b\r\n");
}
