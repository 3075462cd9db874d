//! AST for the module-interface view of an HDL file.
//!
//! Only what port extraction and top-module selection need is modelled: the
//! header port list of each module, a symbol table of the declarations in its
//! body, and the module instantiations it contains. Every node carries a
//! `Span`.

use crate::token::HdlToken;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tvgen_common::Ident;
use tvgen_source::Span;

// ============================================================================
// Top-level
// ============================================================================

/// All modules declared in one source file, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Module and macromodule declarations.
    pub modules: Vec<ModuleDecl>,
    /// The span covering the whole file.
    pub span: Span,
}

/// A `module` or `macromodule` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDecl {
    /// Module name.
    pub name: Ident,
    /// Span of the module name.
    pub name_span: Span,
    /// Header port list entries, in order.
    pub ports: Vec<PortConnect>,
    /// Declarations found in the module body, keyed by name.
    pub declarations: HashMap<Ident, Declaration>,
    /// Module instantiations found in the body.
    pub instantiations: Vec<Instantiation>,
    /// Span from `module` to `endmodule`.
    pub span: Span,
}

// ============================================================================
// Ports
// ============================================================================

/// One entry of a module header's port list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PortConnect {
    /// A run of ANSI port declarations sharing direction and type:
    /// `input logic [3:0] a, b`.
    Ansi(AnsiPortDecl),
    /// A plain name in a non-ANSI list, declared in the body.
    IdRef {
        /// The referenced name.
        name: Ident,
        /// Source span.
        span: Span,
    },
    /// An empty slot in a non-ANSI list: `module m(a, , b);`
    Empty {
        /// Position of the empty slot.
        span: Span,
    },
    /// Any other port expression, e.g. `.a(x)`, `{a, b}` or `a[3:0]`.
    Unsupported {
        /// Source span of the whole expression.
        span: Span,
    },
}

/// An ANSI port declaration group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsiPortDecl {
    /// Direction written on the group, if any.
    pub direction: Option<PortDirection>,
    /// Data type written on the group (may be implicit).
    pub data_type: DataType,
    /// The ports declared by the group.
    pub ports: Vec<AnsiPort>,
    /// Span of the whole group.
    pub span: Span,
}

/// A single port name inside an [`AnsiPortDecl`].
///
/// `direction` and `data_type` are set when the port inherits them from a
/// preceding group rather than from its own group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsiPort {
    /// Port name.
    pub name: Ident,
    /// Inherited direction.
    pub direction: Option<PortDirection>,
    /// Inherited data type.
    pub data_type: Option<DataType>,
    /// Span of the port name.
    pub span: Span,
    /// The group's direction, type and packed dimensions, shared by every
    /// port of the group. Empty if the group wrote none of them.
    pub head: Span,
}

/// Port direction keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
    /// `ref`
    Ref,
}

impl PortDirection {
    /// Maps a direction keyword token.
    pub fn from_token(token: HdlToken) -> Option<Self> {
        match token {
            HdlToken::Input => Some(PortDirection::Input),
            HdlToken::Output => Some(PortDirection::Output),
            HdlToken::Inout => Some(PortDirection::Inout),
            HdlToken::Ref => Some(PortDirection::Ref),
            _ => None,
        }
    }
}

/// The declared type of a port or signal.
///
/// `keyword` is the governing type keyword (`wire` for `wire logic`,
/// `logic` for `var logic`). `name` is the type's own name: the keyword text,
/// or a user-defined / interface type name. Both are `None` for an implicit
/// type such as `input [3:0] a`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataType {
    /// Type keyword, if the type was spelled with one.
    pub keyword: Option<HdlToken>,
    /// Type name as written.
    pub name: Option<Ident>,
    /// `signed` was given.
    pub signed: bool,
    /// Span of the packed dimensions, if any.
    pub packed: Option<Span>,
}

impl DataType {
    /// Returns `true` if neither a keyword nor a type name was written.
    pub fn is_untyped(&self) -> bool {
        self.keyword.is_none() && self.name.is_none()
    }
}

// ============================================================================
// Module body
// ============================================================================

/// What the body says about one name.
///
/// `input a; wire [3:0] a;` merges into one entry: the direction declaration
/// owns `span` and `head`, the net declaration supplies the type and
/// `net_head`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    /// Direction, if declared as a port.
    pub direction: Option<PortDirection>,
    /// Declared type.
    pub data_type: DataType,
    /// Span of the declared name.
    pub span: Span,
    /// Direction, type and packed dimensions of the declaration, without
    /// the declared names.
    pub head: Span,
    /// Same as `head`, for the separate net/variable declaration.
    pub net_head: Option<Span>,
}

/// An instantiation `child #(...) u_child (...);`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instantiation {
    /// Instantiated module (or interface / primitive) name.
    pub module: Ident,
    /// Span of the module name.
    pub span: Span,
}
