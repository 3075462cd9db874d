//! Line/column locations for user-facing messages.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A [`Span`](crate::Span) resolved to 1-indexed line/column coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Path of the file (or the synthetic name of an in-memory source).
    pub file_path: PathBuf,
    /// Starting line.
    pub line: u32,
    /// Starting column.
    pub col: u32,
    /// Line of the last byte of the span.
    pub end_line: u32,
    /// Column of the last byte of the span.
    pub end_col: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path.display(), self.line, self.col)
    }
}
