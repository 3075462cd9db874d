//! Diagnostic codes.
//!
//! Numbers are grouped by stage: `1xx` lexing/parsing, `2xx` port
//! extraction, `3xx` hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a diagnostic code, which fixes its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Prefixed with `E`.
    Error,
    /// Prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the prefix letter.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A category prefix plus a three-digit number, displayed as e.g. `E201`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Category of the code.
    pub category: Category,
    /// Number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Malformed token in the source text.
    pub const LEX_ERROR: Self = Self::new(Category::Error, 101);
    /// Token sequence the front-end cannot parse.
    pub const SYNTAX_ERROR: Self = Self::new(Category::Error, 102);
    /// A port-list entry that is neither an ANSI declaration nor a plain
    /// identifier reference.
    pub const UNSUPPORTED_PORT: Self = Self::new(Category::Error, 201);
    /// No module qualifies as the root of the hierarchy.
    pub const NO_TOP_MODULE: Self = Self::new(Category::Error, 301);
    /// The requested top module is not declared in the file.
    pub const UNKNOWN_TOP_MODULE: Self = Self::new(Category::Error, 302);

    /// Compiler directive skipped by the lexer.
    pub const DIRECTIVE_SKIPPED: Self = Self::new(Category::Warning, 101);
    /// Design unit the front-end does not model (interface, package, ...).
    pub const UNIT_SKIPPED: Self = Self::new(Category::Warning, 102);
    /// Port name listed in the header but never declared in the body.
    pub const UNDECLARED_PORT: Self = Self::new(Category::Warning, 201);
    /// Bracketed bus annotation that does not resolve to integer bounds.
    pub const UNRESOLVED_BUS_RANGE: Self = Self::new(Category::Warning, 202);
    /// Port whose direction is not input, output or inout.
    pub const UNKNOWN_DIRECTION: Self = Self::new(Category::Warning, 203);
    /// Bus range wider than the column expansion allows.
    pub const BUS_TOO_WIDE: Self = Self::new(Category::Warning, 204);

    /// Creates a code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
