//! Hand-rolled HDL front-end for module interfaces.
//!
//! Reads Verilog-2005 / SystemVerilog source far enough to answer two
//! questions: which modules are the roots of the instantiation hierarchy,
//! and what ports each module declares. The main entry point is
//! [`parse_file`], which returns a [`SourceUnit`]; [`top_modules`] then
//! selects the hierarchy roots.
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): source text to tokens. Comments and attributes
//!   are skipped; compiler directives are skipped with a warning.
//! - **Parser** ([`parser`]): module headers and port lists in full, module
//!   bodies as a declaration / instantiation scan.
//! - **AST** ([`ast`]): modules, port-list entries and body symbol tables.
//! - **Hierarchy** ([`hierarchy`]): top-module selection.
//!
//! Any error diagnostic emitted while lexing or parsing means the file
//! could not be read reliably; callers treat it as a parse failure.

#![warn(missing_docs)]

pub mod ast;
pub mod hierarchy;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{
    AnsiPort, AnsiPortDecl, DataType, Declaration, Instantiation, ModuleDecl, PortConnect,
    PortDirection, SourceUnit,
};
pub use hierarchy::{find_module, top_modules};
pub use token::{HdlToken, Token};

use tvgen_common::Interner;
use tvgen_diagnostics::DiagnosticSink;
use tvgen_source::{FileId, SourceDb};

/// Parses a file from the source database.
pub fn parse_file(
    file_id: FileId,
    source_db: &SourceDb,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> SourceUnit {
    let file = source_db.get_file(file_id);
    parse_str(&file.content, file_id, interner, sink)
}

/// Parses `source` as the contents of `file_id`.
pub fn parse_str(
    source: &str,
    file_id: FileId,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> SourceUnit {
    let tokens = lexer::lex(source, file_id, sink);
    let mut parser = parser::Parser::new(tokens, source, interner, sink);
    parser.parse_source_unit()
}
