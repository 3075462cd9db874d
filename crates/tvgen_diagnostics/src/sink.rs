//! Diagnostic accumulator.

use crate::diagnostic::Diagnostic;
use std::cell::{Cell, RefCell};

/// Collects diagnostics emitted by the front-end and the port extractor.
///
/// A run is single-threaded, so the sink is shared by `&` reference and
/// uses interior mutability without locking.
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
    error_count: Cell<usize>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity.is_error() {
            self.error_count.set(self.error_count.get() + 1);
        }
        self.diagnostics.borrow_mut().push(diag);
    }

    /// Returns `true` if any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count.get() > 0
    }

    /// Number of errors emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.get()
    }

    /// Number of diagnostics currently held.
    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Returns `true` if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// Drains every held diagnostic. The error count is not reset.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }

    /// Returns a copy of every held diagnostic.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}
