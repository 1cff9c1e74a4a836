//! Parse subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_stdin() {
    cargo_bin_cmd!("mdcanon")
        .arg("parse")
        .write_stdin("# Heading\n\nParagraph.")
        .assert()
        .success()
        .stdout(predicate::str::contains("DOCUMENT"))
        .stdout(predicate::str::contains("HEADING"));
}

#[test]
fn test_parse_simple_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(&test_file, "> Paragraph with *emphasis*.\n").unwrap();

    cargo_bin_cmd!("mdcanon")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("BLOCKQUOTE"))
        .stdout(predicate::str::contains("PARAGRAPH"))
        .stdout(predicate::str::contains("EMPHASIS"));
}

#[test]
fn test_parse_with_raw_config() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(&test_file, "# not a heading\n").unwrap();
    fs::write(
        temp_dir.path().join("mdcanon.toml"),
        "paragraphs = \"raw\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("mdcanon")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("PARAGRAPH"))
        .stdout(predicate::str::contains("HEADING").not());
}
