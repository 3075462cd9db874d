//! Diagnostic severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic, ordered from least to most severe.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something suspicious; output is still produced.
    Warning,
    /// A problem that stops the run before any output is written.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// ANSI color escape used by the terminal renderer.
    pub(crate) fn ansi_color(self) -> &'static str {
        match self {
            Severity::Warning => "\x1b[1;33m",
            Severity::Error => "\x1b[1;31m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
