use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdcanon")]
#[command(author, version)]
#[command(about = "A canonicalizing Markdown serializer")]
#[command(
    long_about = "mdcanon parses Markdown into a lossless syntax tree and writes it back in a \
    single canonical form: setext headings for levels 1 and 2, fenced code blocks, one blank \
    line between blocks, aligned list continuation lines and normalized emphasis markers. \
    Formatting the output again yields the same output."
)]
#[command(after_help = "\
EXAMPLES:

    # Format a file to stdout
    mdcanon format README.md

    # Format from stdin
    cat README.md | mdcanon format

    # Check if a file is canonical
    mdcanon format --check README.md

    # Format in place
    mdcanon format --write README.md

    # Inspect the syntax tree
    mdcanon parse README.md

CONFIGURATION:

mdcanon looks for configuration files in this order:
  1. Explicit --config path
  2. .mdcanon.toml or mdcanon.toml in the input's directory and its parents
  3. ~/.config/mdcanon/config.toml (XDG)
  4. Built-in defaults

Example .mdcanon.toml:

    paragraphs = \"standard\"
    hard-break = \"backslash\"
    soft-break = \"space\"
    line-ending = \"auto\"
")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, mdcanon will \
        search for .mdcanon.toml or mdcanon.toml in the input's directory and its parents, \
        then fall back to ~/.config/mdcanon/config.toml."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format a Markdown document into canonical form
    #[command(
        long_about = "Format a Markdown document into mdcanon's canonical form. By default, \
        writes the result to stdout. Use --write to format in place or --check to verify \
        that the document is already canonical."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Format to stdout
    mdcanon format notes.md

    # Format from stdin
    echo '# Heading' | mdcanon format

    # Check formatting (exit code 1 if not canonical)
    mdcanon format --check notes.md

    # Format in place
    mdcanon format --write notes.md

CANONICAL FORM:

  - Levels 1 and 2 headings use setext underlines, deeper levels use #
  - Indented and fenced code blocks are written as backtick fences
  - Paragraph lines are joined; hard breaks use a trailing backslash
  - Emphasis uses * and strong emphasis uses **
  - Exactly one blank line between blocks
  - Formatting is idempotent (format twice = format once)")]
    Format {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        #[arg(
            long_help = "Path to the input file to format. If not provided, reads from stdin."
        )]
        file: Option<PathBuf>,

        /// Check if the file is canonical without making changes
        #[arg(long, conflicts_with = "write")]
        #[arg(help = "Check if file is canonical (exit code 1 if not)")]
        #[arg(
            long_help = "Check whether the file is already in canonical form without changing \
            it. If it is not, prints a diff and exits with code 1."
        )]
        check: bool,

        /// Format the file in place
        #[arg(long)]
        #[arg(help = "Format the file in place")]
        #[arg(
            long_help = "Write the formatted output back to the input file. Cannot be used \
            with stdin input."
        )]
        write: bool,
    },
    /// Parse and display the syntax tree for debugging
    #[command(
        long_about = "Parse a document and print its lossless syntax tree, showing every \
        block, inline element and token, including container prefixes and blank lines."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Show the tree of a file
    mdcanon parse notes.md

    # Parse from stdin
    echo '> *quoted*' | mdcanon parse

    # Parse in raw paragraph mode
    mdcanon parse --config raw.toml notes.md")]
    Parse {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        #[arg(
            long_help = "Path to the input file to parse. If not provided, reads from stdin. \
            The paragraph mode from the configuration file is respected."
        )]
        file: Option<PathBuf>,
    },
}
