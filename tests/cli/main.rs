//! CLI integration tests for mdcanon.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Subcommand behavior (format, parse)
//! - Stdin/stdout handling
//! - Exit codes
//! - File I/O operations and config discovery

mod common;
mod format;
mod parse;
