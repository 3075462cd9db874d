//! Source text ownership and source locations.
//!
//! The [`SourceDb`] owns the HDL text being analyzed. Front-end nodes point
//! back into it through [`Span`]s, which diagnostics and the bus-range
//! heuristic turn into [`Location`]s and declaration snippets.

#![warn(missing_docs)]

pub mod location;
pub mod source_db;
pub mod span;

pub use location::Location;
pub use source_db::{SourceDb, SourceFile};
pub use span::{FileId, Span};
