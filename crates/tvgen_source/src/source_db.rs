//! Ownership of loaded source text and span resolution.

use crate::location::Location;
use crate::span::{FileId, Span};
use std::io;
use std::path::{Path, PathBuf};

/// A source file with precomputed line starts.
pub struct SourceFile {
    /// Identifier of this file in its [`SourceDb`].
    pub id: FileId,
    /// Filesystem path, or a synthetic name for in-memory sources.
    pub path: PathBuf,
    /// Full text.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let mut line_starts = vec![0u32];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset into 1-indexed `(line, column)`.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        (idx as u32 + 1, offset - self.line_starts[idx] + 1)
    }

    /// Returns the full text of the line containing `offset`, without the newline.
    pub fn line_text(&self, offset: u32) -> &str {
        let offset = (offset as usize).min(self.content.len());
        let start = self.content[..offset].rfind('\n').map_or(0, |p| p + 1);
        let end = self.content[offset..]
            .find('\n')
            .map_or(self.content.len(), |p| offset + p);
        &self.content[start..end]
    }
}

/// Owns every source file of a run.
///
/// A run analyzes a single HDL file, but tests and diagnostics rendering
/// treat the database uniformly, so it stays a list.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Reads `path` from disk and returns its [`FileId`].
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Adds in-memory source text under the display name `name`.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the file for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Resolves `span` to line/column coordinates.
    pub fn location(&self, span: Span) -> Location {
        let file = self.get_file(span.file);
        let (line, col) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.saturating_sub(1).max(span.start));
        Location {
            file_path: file.path.clone(),
            line,
            col,
            end_line,
            end_col,
        }
    }

    /// Returns the text covered by `span`. Dummy spans yield `""`.
    pub fn snippet(&self, span: Span) -> &str {
        if span.is_dummy() {
            return "";
        }
        let file = self.get_file(span.file);
        &file.content[span.start as usize..span.end as usize]
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_resolution() {
        let mut db = SourceDb::new();
        let id = db.add_source("t.v", "abc\ndef\nghi".to_string());
        let f = db.get_file(id);
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line_col(4), (2, 1));
        assert_eq!(f.line_col(5), (2, 2));
        assert_eq!(f.line_col(8), (3, 1));
    }

    #[test]
    fn location_of_span() {
        let mut db = SourceDb::new();
        let id = db.add_source("t.v", "module m;\n  input a;\nendmodule".to_string());
        let loc = db.location(Span::new(id, 12, 20));
        assert_eq!(loc.file_path, PathBuf::from("t.v"));
        assert_eq!((loc.line, loc.col), (2, 3));
        assert_eq!((loc.end_line, loc.end_col), (2, 10));
    }

    #[test]
    fn snippet_and_line_text() {
        let mut db = SourceDb::new();
        let id = db.add_source("t.v", "input [3:0] a;\noutput y;".to_string());
        assert_eq!(db.snippet(Span::new(id, 6, 11)), "[3:0]");
        assert_eq!(db.snippet(Span::DUMMY), "");
        assert_eq!(db.get_file(id).line_text(17), "output y;");
    }

    #[test]
    fn empty_file() {
        let mut db = SourceDb::new();
        let id = db.add_source("empty.v", String::new());
        assert_eq!(db.get_file(id).line_col(0), (1, 1));
        assert_eq!(db.get_file(id).line_text(0), "");
    }

    #[test]
    fn load_file_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("top.sv");
        std::fs::write(&path, "module top; endmodule").unwrap();
        let mut db = SourceDb::new();
        let id = db.load_file(&path).unwrap();
        assert_eq!(db.get_file(id).content, "module top; endmodule");
        assert_eq!(db.get_file(id).path, path);
    }

    #[test]
    fn load_missing_file_errors() {
        let mut db = SourceDb::new();
        assert!(db.load_file(Path::new("/nonexistent/top.v")).is_err());
    }
}
