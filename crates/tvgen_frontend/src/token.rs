//! Token types for the HDL module-interface lexer.
//!
//! Covers the Verilog-2005 and SystemVerilog keywords the front-end has to
//! tell apart from identifiers: design-unit brackets, port directions, every
//! net and variable type keyword, block delimiters and the keywords that can
//! open a module item. Operators the parser never inspects collapse into
//! [`HdlToken::Operator`].

use serde::{Deserialize, Serialize};
use tvgen_source::Span;

/// An HDL token kind.
///
/// Keywords are case-sensitive. Literal and identifier text is not stored in
/// the token; it is sliced from the source using the token's span.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum HdlToken {
    // === Design units ===
    /// `module`
    Module,
    /// `macromodule`
    Macromodule,
    /// `endmodule`
    Endmodule,
    /// `interface`
    Interface,
    /// `endinterface`
    Endinterface,
    /// `package`
    Package,
    /// `endpackage`
    Endpackage,
    /// `primitive`
    Primitive,
    /// `endprimitive`
    Endprimitive,
    /// `program`
    Program,
    /// `endprogram`
    Endprogram,
    /// `class`
    Class,
    /// `endclass`
    Endclass,
    /// `config`
    Config,
    /// `endconfig`
    Endconfig,

    // === Bodies skipped inside a module ===
    /// `function`
    Function,
    /// `endfunction`
    Endfunction,
    /// `task`
    Task,
    /// `endtask`
    Endtask,
    /// `specify`
    Specify,
    /// `endspecify`
    Endspecify,
    /// `clocking`
    Clocking,
    /// `endclocking`
    Endclocking,
    /// `property`
    Property,
    /// `endproperty`
    Endproperty,
    /// `sequence`
    Sequence,
    /// `endsequence`
    Endsequence,
    /// `covergroup`
    Covergroup,
    /// `endgroup`
    Endgroup,

    // === Block delimiters ===
    /// `begin`
    Begin,
    /// `end`
    End,
    /// `fork`
    Fork,
    /// `join`
    Join,
    /// `join_any`
    JoinAny,
    /// `join_none`
    JoinNone,
    /// `case`
    Case,
    /// `casex`
    Casex,
    /// `casez`
    Casez,
    /// `endcase`
    Endcase,
    /// `generate`
    Generate,
    /// `endgenerate`
    Endgenerate,
    /// `else`
    Else,

    // === Port directions ===
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
    /// `ref`
    Ref,

    // === Net and variable kinds ===
    /// `real`
    Real,
    /// `wire`
    Wire,
    /// `logic`
    Logic,
    /// `reg`
    Reg,
    /// `tri`
    Tri,
    /// `wand`
    Wand,
    /// `triand`
    Triand,
    /// `wor`
    Wor,
    /// `trior`
    Trior,
    /// `trireg`
    Trireg,
    /// `tri0`
    Tri0,
    /// `tri1`
    Tri1,
    /// `uwire`
    Uwire,
    /// `supply0`
    Supply0,
    /// `supply1`
    Supply1,
    /// `integer`
    Integer,
    /// `int`
    Int,
    /// `byte`
    Byte,
    /// `shortint`
    Shortint,
    /// `longint`
    Longint,
    /// `bit`
    Bit,
    /// `shortreal`
    Shortreal,
    /// `time`
    Time,
    /// `realtime`
    Realtime,
    /// `string`
    String,
    /// `event`
    Event,
    /// `chandle`
    Chandle,
    /// `var`
    Var,
    /// `signed`
    Signed,
    /// `unsigned`
    Unsigned,

    // === Item and statement keywords ===
    /// `assign`
    Assign,
    /// `always`
    Always,
    /// `always_comb`
    AlwaysComb,
    /// `always_ff`
    AlwaysFf,
    /// `always_latch`
    AlwaysLatch,
    /// `initial`
    Initial,
    /// `final`
    Final,
    /// `parameter`
    Parameter,
    /// `localparam`
    Localparam,
    /// `defparam`
    Defparam,
    /// `genvar`
    Genvar,
    /// `typedef`
    Typedef,
    /// `import`
    Import,
    /// `export`
    Export,
    /// `modport`
    Modport,
    /// `if`
    If,
    /// `for`
    For,
    /// `default`
    Default,
    /// `automatic`
    Automatic,
    /// `static`
    Static,
    /// `const`
    Const,
    /// `enum`
    Enum,
    /// `struct`
    Struct,
    /// `union`
    Union,
    /// `packed`
    Packed,
    /// `posedge`
    Posedge,
    /// `negedge`
    Negedge,
    /// `assert`
    Assert,
    /// `wait`
    Wait,
    /// `force`
    Force,
    /// `release`
    Release,
    /// `return`
    Return,

    // === Gate primitives ===
    /// `and`
    And,
    /// `nand`
    Nand,
    /// `or`
    Or,
    /// `nor`
    Nor,
    /// `xor`
    Xor,
    /// `xnor`
    Xnor,
    /// `not`
    Not,
    /// `buf`
    Buf,
    /// `bufif0`
    Bufif0,
    /// `bufif1`
    Bufif1,
    /// `notif0`
    Notif0,
    /// `notif1`
    Notif1,
    /// `pullup`
    Pullup,
    /// `pulldown`
    Pulldown,

    // === Punctuation ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `#`
    Hash,
    /// `@`
    At,
    /// `:`
    Colon,
    /// `::`
    ColonColon,
    /// `=`
    Equals,
    /// `'`
    Tick,
    /// Any other operator, e.g. `+`, `<=`, `===`, `->`.
    Operator,

    // === Literals and names ===
    /// Plain identifier.
    Identifier,
    /// `\escaped.name `
    EscapedIdentifier,
    /// `$display`
    SystemIdentifier,
    /// `` `WIDTH `` (macro use, never expanded).
    MacroUsage,
    /// Unsized decimal integer.
    IntLiteral,
    /// `4'b1010`, `'hFF`
    SizedLiteral,
    /// `1.5`, `1e3`
    RealLiteral,
    /// `"text"`
    StringLiteral,

    // === Special ===
    /// A malformed token; a diagnostic has already been emitted.
    Error,
    /// End of input.
    Eof,
}

impl HdlToken {
    /// Returns `true` for `input`, `output`, `inout` and `ref`.
    pub fn is_direction(self) -> bool {
        matches!(
            self,
            HdlToken::Input | HdlToken::Output | HdlToken::Inout | HdlToken::Ref
        )
    }

    /// Returns `true` for net type keywords (`wire`, `tri`, `supply0`, ...).
    pub fn is_net_type(self) -> bool {
        matches!(
            self,
            HdlToken::Wire
                | HdlToken::Tri
                | HdlToken::Wand
                | HdlToken::Triand
                | HdlToken::Wor
                | HdlToken::Trior
                | HdlToken::Trireg
                | HdlToken::Tri0
                | HdlToken::Tri1
                | HdlToken::Uwire
                | HdlToken::Supply0
                | HdlToken::Supply1
        )
    }

    /// Returns `true` for keywords that can begin a port or net/variable
    /// data type, including `var`.
    pub fn is_data_type(self) -> bool {
        self.is_net_type()
            || matches!(
                self,
                HdlToken::Real
                    | HdlToken::Logic
                    | HdlToken::Reg
                    | HdlToken::Integer
                    | HdlToken::Int
                    | HdlToken::Byte
                    | HdlToken::Shortint
                    | HdlToken::Longint
                    | HdlToken::Bit
                    | HdlToken::Shortreal
                    | HdlToken::Time
                    | HdlToken::Realtime
                    | HdlToken::String
                    | HdlToken::Event
                    | HdlToken::Chandle
                    | HdlToken::Var
            )
    }

    /// Returns `true` for identifier tokens, plain or escaped.
    pub fn is_identifier(self) -> bool {
        matches!(self, HdlToken::Identifier | HdlToken::EscapedIdentifier)
    }

    /// Returns the keyword that closes a body opened by `self`, for bodies
    /// the front-end skips without modelling.
    pub fn closing_keyword(self) -> Option<HdlToken> {
        match self {
            HdlToken::Module | HdlToken::Macromodule => Some(HdlToken::Endmodule),
            HdlToken::Interface => Some(HdlToken::Endinterface),
            HdlToken::Package => Some(HdlToken::Endpackage),
            HdlToken::Primitive => Some(HdlToken::Endprimitive),
            HdlToken::Program => Some(HdlToken::Endprogram),
            HdlToken::Class => Some(HdlToken::Endclass),
            HdlToken::Config => Some(HdlToken::Endconfig),
            HdlToken::Function => Some(HdlToken::Endfunction),
            HdlToken::Task => Some(HdlToken::Endtask),
            HdlToken::Specify => Some(HdlToken::Endspecify),
            HdlToken::Clocking => Some(HdlToken::Endclocking),
            HdlToken::Property => Some(HdlToken::Endproperty),
            HdlToken::Sequence => Some(HdlToken::Endsequence),
            HdlToken::Covergroup => Some(HdlToken::Endgroup),
            _ => None,
        }
    }

    /// Returns `true` for tokens that stand alone as a module item: block
    /// delimiters such as `begin`, `end` and `endcase`.
    pub fn is_block_delimiter(self) -> bool {
        matches!(
            self,
            HdlToken::Begin
                | HdlToken::End
                | HdlToken::Fork
                | HdlToken::Join
                | HdlToken::JoinAny
                | HdlToken::JoinNone
                | HdlToken::Endcase
                | HdlToken::Generate
                | HdlToken::Endgenerate
                | HdlToken::Else
        )
    }
}

/// A token with its source location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token.
    pub kind: HdlToken,
    /// The source span of this token.
    pub span: Span,
}

/// Looks up a keyword by its exact text.
pub fn lookup_keyword(s: &str) -> Option<HdlToken> {
    let kw = match s {
        "module" => HdlToken::Module,
        "macromodule" => HdlToken::Macromodule,
        "endmodule" => HdlToken::Endmodule,
        "interface" => HdlToken::Interface,
        "endinterface" => HdlToken::Endinterface,
        "package" => HdlToken::Package,
        "endpackage" => HdlToken::Endpackage,
        "primitive" => HdlToken::Primitive,
        "endprimitive" => HdlToken::Endprimitive,
        "program" => HdlToken::Program,
        "endprogram" => HdlToken::Endprogram,
        "class" => HdlToken::Class,
        "endclass" => HdlToken::Endclass,
        "config" => HdlToken::Config,
        "endconfig" => HdlToken::Endconfig,

        "function" => HdlToken::Function,
        "endfunction" => HdlToken::Endfunction,
        "task" => HdlToken::Task,
        "endtask" => HdlToken::Endtask,
        "specify" => HdlToken::Specify,
        "endspecify" => HdlToken::Endspecify,
        "clocking" => HdlToken::Clocking,
        "endclocking" => HdlToken::Endclocking,
        "property" => HdlToken::Property,
        "endproperty" => HdlToken::Endproperty,
        "sequence" => HdlToken::Sequence,
        "endsequence" => HdlToken::Endsequence,
        "covergroup" => HdlToken::Covergroup,
        "endgroup" => HdlToken::Endgroup,

        "begin" => HdlToken::Begin,
        "end" => HdlToken::End,
        "fork" => HdlToken::Fork,
        "join" => HdlToken::Join,
        "join_any" => HdlToken::JoinAny,
        "join_none" => HdlToken::JoinNone,
        "case" => HdlToken::Case,
        "casex" => HdlToken::Casex,
        "casez" => HdlToken::Casez,
        "endcase" => HdlToken::Endcase,
        "generate" => HdlToken::Generate,
        "endgenerate" => HdlToken::Endgenerate,
        "else" => HdlToken::Else,

        "input" => HdlToken::Input,
        "output" => HdlToken::Output,
        "inout" => HdlToken::Inout,
        "ref" => HdlToken::Ref,

        "real" => HdlToken::Real,
        "wire" => HdlToken::Wire,
        "logic" => HdlToken::Logic,
        "reg" => HdlToken::Reg,
        "tri" => HdlToken::Tri,
        "wand" => HdlToken::Wand,
        "triand" => HdlToken::Triand,
        "wor" => HdlToken::Wor,
        "trior" => HdlToken::Trior,
        "trireg" => HdlToken::Trireg,
        "tri0" => HdlToken::Tri0,
        "tri1" => HdlToken::Tri1,
        "uwire" => HdlToken::Uwire,
        "supply0" => HdlToken::Supply0,
        "supply1" => HdlToken::Supply1,
        "integer" => HdlToken::Integer,
        "int" => HdlToken::Int,
        "byte" => HdlToken::Byte,
        "shortint" => HdlToken::Shortint,
        "longint" => HdlToken::Longint,
        "bit" => HdlToken::Bit,
        "shortreal" => HdlToken::Shortreal,
        "time" => HdlToken::Time,
        "realtime" => HdlToken::Realtime,
        "string" => HdlToken::String,
        "event" => HdlToken::Event,
        "chandle" => HdlToken::Chandle,
        "var" => HdlToken::Var,
        "signed" => HdlToken::Signed,
        "unsigned" => HdlToken::Unsigned,

        "assign" => HdlToken::Assign,
        "always" => HdlToken::Always,
        "always_comb" => HdlToken::AlwaysComb,
        "always_ff" => HdlToken::AlwaysFf,
        "always_latch" => HdlToken::AlwaysLatch,
        "initial" => HdlToken::Initial,
        "final" => HdlToken::Final,
        "parameter" => HdlToken::Parameter,
        "localparam" => HdlToken::Localparam,
        "defparam" => HdlToken::Defparam,
        "genvar" => HdlToken::Genvar,
        "typedef" => HdlToken::Typedef,
        "import" => HdlToken::Import,
        "export" => HdlToken::Export,
        "modport" => HdlToken::Modport,
        "if" => HdlToken::If,
        "for" => HdlToken::For,
        "default" => HdlToken::Default,
        "automatic" => HdlToken::Automatic,
        "static" => HdlToken::Static,
        "const" => HdlToken::Const,
        "enum" => HdlToken::Enum,
        "struct" => HdlToken::Struct,
        "union" => HdlToken::Union,
        "packed" => HdlToken::Packed,
        "posedge" => HdlToken::Posedge,
        "negedge" => HdlToken::Negedge,
        "assert" => HdlToken::Assert,
        "wait" => HdlToken::Wait,
        "force" => HdlToken::Force,
        "release" => HdlToken::Release,
        "return" => HdlToken::Return,

        "and" => HdlToken::And,
        "nand" => HdlToken::Nand,
        "or" => HdlToken::Or,
        "nor" => HdlToken::Nor,
        "xor" => HdlToken::Xor,
        "xnor" => HdlToken::Xnor,
        "not" => HdlToken::Not,
        "buf" => HdlToken::Buf,
        "bufif0" => HdlToken::Bufif0,
        "bufif1" => HdlToken::Bufif1,
        "notif0" => HdlToken::Notif0,
        "notif1" => HdlToken::Notif1,
        "pullup" => HdlToken::Pullup,
        "pulldown" => HdlToken::Pulldown,
        _ => return None,
    };
    Some(kw)
}
