use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// How paragraphs are recognized.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ParagraphMode {
    /// CommonMark block structure with inline parsing.
    #[default]
    Standard,
    /// Every run of non-blank lines is one paragraph, kept byte-for-byte.
    Raw,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HardBreakStyle {
    /// `\` followed by a line ending.
    #[default]
    Backslash,
    /// Two trailing spaces followed by a line ending.
    Spaces,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SoftBreakStyle {
    /// Join the lines of a paragraph with a single space.
    #[default]
    Space,
    /// Keep each source line on its own line.
    Newline,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LineEnding {
    /// Follow the first line ending of the input.
    #[default]
    Auto,
    Lf,
    Crlf,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub paragraphs: ParagraphMode,
    pub hard_break: HardBreakStyle,
    /// Defaults to [`SoftBreakStyle::Space`] in standard mode and
    /// [`SoftBreakStyle::Newline`] in raw mode.
    pub soft_break: Option<SoftBreakStyle>,
    pub line_ending: LineEnding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paragraphs: ParagraphMode::Standard,
            hard_break: HardBreakStyle::Backslash,
            soft_break: None,
            line_ending: LineEnding::Auto,
        }
    }
}

impl Config {
    /// The soft break style after applying the per-mode default.
    pub fn effective_soft_break(&self) -> SoftBreakStyle {
        self.soft_break.unwrap_or(match self.paragraphs {
            ParagraphMode::Standard => SoftBreakStyle::Space,
            ParagraphMode::Raw => SoftBreakStyle::Newline,
        })
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn paragraphs(mut self, mode: ParagraphMode) -> Self {
        self.config.paragraphs = mode;
        self
    }

    pub fn hard_break(mut self, style: HardBreakStyle) -> Self {
        self.config.hard_break = style;
        self
    }

    pub fn soft_break(mut self, style: SoftBreakStyle) -> Self {
        self.config.soft_break = Some(style);
        self
    }

    pub fn line_ending(mut self, ending: LineEnding) -> Self {
        self.config.line_ending = ending;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".mdcanon.toml", "mdcanon.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn user_config_path() -> Option<PathBuf> {
    let p = dirs::config_dir()?.join("mdcanon").join("config.toml");
    p.is_file().then_some(p)
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .mdcanon.toml, mdcanon.toml
/// 3) user config dir: <config dir>/mdcanon/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        let cfg = read_config(&p)?;
        return Ok((cfg, Some(p)));
    }

    if let Some(p) = user_config_path()
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}
