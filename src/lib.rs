pub mod block_parser;
pub mod config;
pub mod inline_parser;
pub mod renderer;
pub mod syntax;

pub use config::Config;
pub use config::ConfigBuilder;
pub use config::LineEnding;
pub use renderer::{RenderError, RenderOptions, render, render_to_string};
pub use syntax::SyntaxNode;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn detect_line_ending(input: &str) -> &str {
    // The first line ending decides.
    match input.find('\n') {
        Some(n) if n > 0 && input.as_bytes()[n - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}

/// Formats a Markdown document into its canonical form.
///
/// # Examples
///
/// ```no_run
/// let formatted = mdcanon::format("Title\n=====\n", None).unwrap();
/// assert_eq!(formatted, "Title\n=====\n\n");
/// ```
pub fn format(input: &str, config: Option<Config>) -> Result<String, RenderError> {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let config = config.unwrap_or_default();
    let tree = parse(input, Some(config.clone()));
    let out = render_to_string(&tree, &RenderOptions::from_config(&config))?;

    let line_ending = match config.line_ending {
        LineEnding::Auto => detect_line_ending(input),
        LineEnding::Lf => "\n",
        LineEnding::Crlf => "\r\n",
    };
    if line_ending == "\r\n" {
        Ok(out.replace('\n', "\r\n"))
    } else {
        Ok(out)
    }
}

/// Parses a Markdown document into a lossless syntax tree.
///
/// The block pass runs first; in standard paragraph mode the inline pass
/// then rebuilds paragraph and heading content. `parse(s).text() == s` for
/// every input, line endings included.
///
/// # Examples
///
/// ```rust
/// let tree = mdcanon::parse("# Heading\n\nParagraph text.", None);
/// println!("{:#?}", tree);
/// ```
pub fn parse(input: &str, config: Option<Config>) -> SyntaxNode {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let config = config.unwrap_or_default();
    let block_tree = block_parser::BlockParser::new(input, &config).parse();
    inline_parser::InlineParser::new(block_tree, &config).parse()
}
