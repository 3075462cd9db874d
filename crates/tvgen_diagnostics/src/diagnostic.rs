//! Structured diagnostic messages.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use tvgen_source::Span;

/// A message about the HDL input, tied to a source span.
///
/// Structural problems with no single source location (such as a design
/// with no top module) use [`Span::DUMMY`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Stable code identifying the kind of problem.
    pub code: DiagnosticCode,
    /// Main message.
    pub message: String,
    /// Where the problem was detected.
    pub primary_span: Span,
    /// Text printed under the source excerpt's caret line.
    pub label: Option<String>,
    /// Explanatory footnotes.
    pub notes: Vec<String>,
    /// Suggestions.
    pub help: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, code: DiagnosticCode, message: String, span: Span) -> Self {
        Self {
            severity,
            code,
            message,
            primary_span: span,
            label: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, code, message.into(), span)
    }

    /// Creates a warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, code, message.into(), span)
    }

    /// Sets the caret label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}
