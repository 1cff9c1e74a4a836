use crate::config::{Config, HardBreakStyle, SoftBreakStyle};

/// Target styles for line breaks inside paragraphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub hard_break: HardBreakStyle,
    pub soft_break: SoftBreakStyle,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            hard_break: config.hard_break,
            soft_break: config.effective_soft_break(),
        }
    }
}
