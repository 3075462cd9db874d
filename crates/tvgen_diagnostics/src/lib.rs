//! Diagnostics for source problems found while generating test vectors.
//!
//! Front-end and extraction stages never print directly. They emit
//! [`Diagnostic`]s into a [`DiagnosticSink`], and the CLI renders the
//! accumulated list with a [`DiagnosticRenderer`] once the stage finishes.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
