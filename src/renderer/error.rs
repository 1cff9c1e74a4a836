use std::fmt;
use std::io;

use crate::syntax::SyntaxKind;

/// Errors that abort a render. No partial output is valid after one.
#[derive(Debug)]
pub enum RenderError {
    /// The output sink failed.
    Io(io::Error),
    /// A formatting sink failed.
    Fmt(fmt::Error),
    /// The tree does not have the shape its kind promises.
    MalformedNode {
        kind: SyntaxKind,
        reason: &'static str,
    },
}

impl RenderError {
    pub(crate) fn malformed(kind: SyntaxKind, reason: &'static str) -> Self {
        RenderError::MalformedNode { kind, reason }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(e) => write!(f, "failed to write output: {e}"),
            RenderError::Fmt(e) => write!(f, "failed to format output: {e}"),
            RenderError::MalformedNode { kind, reason } => {
                write!(f, "malformed {kind:?} node: {reason}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            RenderError::Fmt(e) => Some(e),
            RenderError::MalformedNode { .. } => None,
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl From<fmt::Error> for RenderError {
    fn from(e: fmt::Error) -> Self {
        RenderError::Fmt(e)
    }
}
