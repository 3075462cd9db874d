//! Rendering of diagnostics for terminals and machines.

use crate::diagnostic::Diagnostic;
use serde::Serialize;
use tvgen_source::{Location, SourceDb};

/// Formats one diagnostic into a printable string.
pub trait DiagnosticRenderer {
    /// Renders `diag`, resolving its span through `source_db`.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// rustc-style terminal output:
///
/// ```text
/// error[E201]: unknown port found
///   --> rtl/top.v:1:18
///   |
/// 1 | module top(a, .b(c));
///   |               ^^^^^ port expression
///   = note: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to emit ANSI color escapes.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();

        if self.color {
            out.push_str(&format!(
                "{}{}[{}]\x1b[0m\x1b[1m: {}\x1b[0m\n",
                diag.severity.ansi_color(),
                diag.severity,
                diag.code,
                diag.message
            ));
        } else {
            out.push_str(&format!(
                "{}[{}]: {}\n",
                diag.severity, diag.code, diag.message
            ));
        }

        if !diag.primary_span.is_dummy() {
            let loc = source_db.location(diag.primary_span);
            out.push_str(&format!("  --> {loc}\n"));

            let file = source_db.get_file(diag.primary_span.file);
            let line_num = loc.line.to_string();
            let gutter = " ".repeat(line_num.len());
            let line_text = file.line_text(diag.primary_span.start);

            // Multi-line spans are underlined to the end of their first line.
            let caret_len = if loc.end_line == loc.line {
                (loc.end_col + 1).saturating_sub(loc.col).max(1)
            } else {
                (line_text.len() as u32 + 1).saturating_sub(loc.col).max(1)
            };
            let label = diag
                .label
                .as_ref()
                .map(|l| format!(" {l}"))
                .unwrap_or_default();

            out.push_str(&format!("{gutter} |\n"));
            out.push_str(&format!("{line_num} | {line_text}\n"));
            out.push_str(&format!(
                "{gutter} | {}{}{label}\n",
                " ".repeat(loc.col.saturating_sub(1) as usize),
                "^".repeat(caret_len as usize)
            ));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

/// One JSON object per diagnostic, with the span already resolved.
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    severity: crate::Severity,
    code: String,
    message: &'a str,
    location: Option<Location>,
    label: Option<&'a str>,
    notes: &'a [String],
    help: &'a [String],
}

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let record = JsonDiagnostic {
            severity: diag.severity,
            code: diag.code.to_string(),
            message: &diag.message,
            location: (!diag.primary_span.is_dummy())
                .then(|| source_db.location(diag.primary_span)),
            label: diag.label.as_deref(),
            notes: &diag.notes,
            help: &diag.help,
        };
        serde_json::to_string(&record).unwrap_or_else(|_| "{}".to_string())
    }
}
