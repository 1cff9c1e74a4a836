//! Golden test cases for the mdcanon serializer.
//!
//! Each test case is a directory under `tests/cases/` containing:
//! - `input.md` - Source document
//! - `expected.md` - Expected canonical output
//! - `mdcanon.toml` - (Optional) Config for the case
//!
//! Every case checks that the tree is lossless, that the output matches
//! `expected.md`, and that formatting the output again changes nothing.
//!
//! Run with `UPDATE_EXPECTED=1 cargo test` to regenerate expected outputs.

use mdcanon::{Config, format, parse};
use std::{fs, path::Path};

/// Load config from test case directory if it exists.
fn load_test_config(dir: &Path) -> Option<Config> {
    let config_path = dir.join("mdcanon.toml");
    if config_path.exists() {
        let content = fs::read_to_string(config_path).ok()?;
        toml::from_str(&content).ok()
    } else {
        None
    }
}

/// Run a single golden test case.
fn run_golden_case(case_name: &str) {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("cases")
        .join(case_name);

    let update_expected = std::env::var_os("UPDATE_EXPECTED").is_some();

    let input_path = dir.join("input.md");
    let expected_path = dir.join("expected.md");
    let config = load_test_config(&dir);

    // Read input file - preserve line endings exactly
    let input = fs::read_to_string(&input_path)
        .unwrap_or_else(|_| panic!("No input file found in {}", case_name));

    let tree_text = parse(&input, config.clone()).text().to_string();
    similar_asserts::assert_eq!(
        input,
        tree_text,
        "losslessness check failed for {} (diff: {:+} bytes)",
        case_name,
        tree_text.len() as i64 - input.len() as i64
    );

    let output = format(&input, config.clone()).unwrap();

    let output_twice = format(&output, config.clone()).unwrap();
    similar_asserts::assert_eq!(output, output_twice, "idempotency: {}", case_name);

    if update_expected {
        fs::write(&expected_path, &output).unwrap();
        return;
    }

    let expected = fs::read_to_string(&expected_path)
        .unwrap_or_else(|_| panic!("Failed to read expected.md in {}", case_name));

    similar_asserts::assert_eq!(expected, output, "case: {}", case_name);

    // An expected output is itself canonical.
    let rerendered = format(&expected, config).unwrap();
    similar_asserts::assert_eq!(expected, rerendered, "re-render: {}", case_name);
}

/// Generates one test function per case directory.
macro_rules! golden_test_cases {
    ($($case:ident),+ $(,)?) => {
        $(
            #[test]
            fn $case() {
                run_golden_case(stringify!($case));
            }
        )+
    };
}

// To add a new test case:
// 1. Create a new directory under tests/cases/
// 2. Add the directory name to this list
golden_test_cases!(
    blockquotes,
    code_blocks,
    code_spans,
    crlf_basic,
    emphasis,
    headings,
    html_blocks,
    links,
    lists_loose,
    lists_nested,
    lists_ordered,
    paragraphs,
    raw_paragraphs,
    thematic_breaks,
);
