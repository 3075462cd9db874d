//! File identifiers and byte-offset ranges.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a file loaded into a [`SourceDb`](crate::SourceDb).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// File ID of synthetic spans that have no source text.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from its raw value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// A half-open byte range `[start, end)` within one source file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The file this span points into.
    pub file: FileId,
    /// Inclusive start offset.
    pub start: u32,
    /// Exclusive end offset.
    pub end: u32,
}

impl Span {
    /// Span used when no source location is available.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a span over `start..end` in `file`.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Returns the smallest span covering both `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if the spans belong to different files.
    pub fn merge(self, other: Span) -> Span {
        assert_eq!(
            self.file, other.file,
            "cannot merge spans from different files"
        );
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for zero-length spans.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this is [`Span::DUMMY`] or another synthetic span.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_covers_both() {
        let f = FileId::from_raw(0);
        let a = Span::new(f, 5, 15);
        let b = Span::new(f, 10, 25);
        assert_eq!(a.merge(b), Span::new(f, 5, 25));
        assert_eq!(a.merge(b), b.merge(a));
    }

    #[test]
    fn len_and_empty() {
        let f = FileId::from_raw(0);
        assert_eq!(Span::new(f, 3, 9).len(), 6);
        assert!(Span::new(f, 4, 4).is_empty());
    }

    #[test]
    fn dummy() {
        assert!(Span::DUMMY.is_dummy());
        assert!(!Span::new(FileId::from_raw(0), 0, 0).is_dummy());
        assert_eq!(FileId::DUMMY.as_raw(), u32::MAX);
    }

    #[test]
    fn serde_roundtrip() {
        let s = Span::new(FileId::from_raw(1), 10, 20);
        let json = serde_json::to_string(&s).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
