//! Recursive descent parser for module interfaces.
//!
//! The `Parser` struct provides the primitive operations (advance, expect,
//! eat, token lookahead) and error recovery. Top-level methods parse module
//! headers and port lists in full; module bodies are scanned item by item,
//! recording declarations and instantiations and skipping everything else
//! statement-wise.

use crate::ast::*;
use crate::token::{HdlToken, Token};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tvgen_common::{Ident, Interner};
use tvgen_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tvgen_source::Span;

/// A recursive descent parser over a token stream produced by the lexer.
pub struct Parser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
    interner: &'src Interner,
    sink: &'src DiagnosticSink,
}

#[derive(Default)]
struct ModuleBody {
    declarations: HashMap<Ident, Declaration>,
    instantiations: Vec<Instantiation>,
}

impl<'src> Parser<'src> {
    /// Creates a parser. `tokens` must have been lexed from `source` and end
    /// with an `Eof` token.
    pub fn new(
        tokens: Vec<Token>,
        source: &'src str,
        interner: &'src Interner,
        sink: &'src DiagnosticSink,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            interner,
            sink,
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    fn current(&self) -> HdlToken {
        self.tokens[self.pos].kind
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn current_text(&self) -> &'src str {
        let span = self.current_span();
        &self.source[span.start as usize..span.end as usize]
    }

    fn at(&self, kind: HdlToken) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.current() == HdlToken::Eof
    }

    fn prev_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            self.current_span()
        }
    }

    /// Span of the tokens consumed since token index `start`, or an empty
    /// span at the current token if nothing was consumed.
    fn span_since(&self, start: usize) -> Span {
        if self.pos > start {
            self.tokens[start].span.merge(self.prev_span())
        } else {
            let at = self.current_span();
            Span::new(at.file, at.start, at.start)
        }
    }

    fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: HdlToken) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: HdlToken, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.expected(what);
            false
        }
    }

    /// Consumes an identifier, or reports an error and returns a placeholder.
    fn expect_ident(&mut self) -> Ident {
        if self.current().is_identifier() {
            let ident = self.interner.get_or_intern(self.current_text());
            self.advance();
            ident
        } else {
            self.expected("identifier");
            self.interner.get_or_intern("<missing>")
        }
    }

    /// Returns the kind of the token at `pos + offset`, or `Eof` past the end.
    fn peek_kind(&self, offset: usize) -> HdlToken {
        self.tokens
            .get(self.pos + offset)
            .map_or(HdlToken::Eof, |t| t.kind)
    }

    // ========================================================================
    // Lookahead helpers (offsets relative to `pos`, nothing consumed)
    // ========================================================================

    /// Given an opening delimiter at `offset`, returns the offset just past
    /// its matching closer.
    fn skip_group_ahead(&self, mut offset: usize) -> usize {
        let mut depth = 0usize;
        loop {
            match self.peek_kind(offset) {
                HdlToken::LeftParen | HdlToken::LeftBracket | HdlToken::LeftBrace => depth += 1,
                HdlToken::RightParen | HdlToken::RightBracket | HdlToken::RightBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return offset + 1;
                    }
                }
                HdlToken::Eof => return offset,
                _ => {}
            }
            offset += 1;
        }
    }

    fn skip_dims_ahead(&self, mut offset: usize) -> usize {
        while self.peek_kind(offset) == HdlToken::LeftBracket {
            offset = self.skip_group_ahead(offset);
        }
        offset
    }

    /// Matches `T name`, `T [dims] name` or `pkg::T name` at `offset` and
    /// returns the offset of `name`.
    fn user_type_ahead(&self, offset: usize) -> Option<usize> {
        if !self.peek_kind(offset).is_identifier() {
            return None;
        }
        let mut i = offset + 1;
        if self.peek_kind(i) == HdlToken::ColonColon {
            if !self.peek_kind(i + 1).is_identifier() {
                return None;
            }
            i += 2;
        }
        i = self.skip_dims_ahead(i);
        self.peek_kind(i).is_identifier().then_some(i)
    }

    /// Matches an interface port `intf.modport name` at `offset`.
    fn interface_port_ahead(&self, offset: usize) -> bool {
        self.peek_kind(offset).is_identifier()
            && self.peek_kind(offset + 1) == HdlToken::Dot
            && self.peek_kind(offset + 2).is_identifier()
            && self.peek_kind(offset + 3).is_identifier()
    }

    /// Returns `true` if a new ANSI port group begins at `offset`.
    fn ansi_group_ahead(&self, offset: usize) -> bool {
        let kind = self.peek_kind(offset);
        kind.is_direction()
            || kind.is_data_type()
            || matches!(
                kind,
                HdlToken::Signed | HdlToken::Unsigned | HdlToken::LeftBracket
            )
            || self.interface_port_ahead(offset)
            || self.user_type_ahead(offset).is_some()
    }

    // ========================================================================
    // Error handling and recovery
    // ========================================================================

    fn error(&self, msg: &str) {
        self.sink.emit(Diagnostic::error(
            DiagnosticCode::SYNTAX_ERROR,
            msg,
            self.current_span(),
        ));
    }

    fn expected(&self, what: &str) {
        let found = if self.at_eof() {
            "end of file".to_string()
        } else {
            format!("'{}'", self.current_text())
        };
        self.error(&format!("expected {what}, found {found}"));
    }

    /// Consumes an opening delimiter and everything up to and including its
    /// matching closer.
    fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current() {
                HdlToken::LeftParen | HdlToken::LeftBracket | HdlToken::LeftBrace => depth += 1,
                HdlToken::RightParen | HdlToken::RightBracket | HdlToken::RightBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                HdlToken::Eof => {
                    self.expected("closing delimiter");
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skips one list element: stops before a `,`, `)` or `;` at nesting
    /// depth zero.
    fn skip_list_element(&mut self) {
        loop {
            match self.current() {
                HdlToken::Comma
                | HdlToken::RightParen
                | HdlToken::Semicolon
                | HdlToken::Endmodule
                | HdlToken::Eof => return,
                HdlToken::LeftParen | HdlToken::LeftBracket | HdlToken::LeftBrace => {
                    self.skip_balanced()
                }
                _ => self.advance(),
            }
        }
    }

    /// Skips a module item up to and including its `;`. Stops before block
    /// delimiters so that `begin`/`end` pairs stay visible to the item loop.
    fn skip_statement(&mut self) {
        loop {
            let kind = self.current();
            match kind {
                HdlToken::Semicolon => {
                    self.advance();
                    return;
                }
                HdlToken::Endmodule | HdlToken::Eof => return,
                _ if kind.is_block_delimiter() => return,
                HdlToken::LeftParen | HdlToken::LeftBracket | HdlToken::LeftBrace => {
                    self.skip_balanced()
                }
                _ => self.advance(),
            }
        }
    }

    fn recover_to_semicolon(&mut self) {
        while !self.at_eof() && !self.at(HdlToken::Semicolon) {
            self.advance();
        }
        self.eat(HdlToken::Semicolon);
    }

    fn recover_to_design_unit(&mut self) {
        while !self.at_eof()
            && !matches!(
                self.current(),
                HdlToken::Module
                    | HdlToken::Macromodule
                    | HdlToken::Interface
                    | HdlToken::Package
                    | HdlToken::Primitive
                    | HdlToken::Program
                    | HdlToken::Class
                    | HdlToken::Config
            )
        {
            self.advance();
        }
    }

    /// Consumes an optional `: label` after `end`, `endmodule`, `begin`, ...
    fn eat_end_label(&mut self) {
        if self.at(HdlToken::Colon) && self.peek_kind(1).is_identifier() {
            self.advance();
            self.advance();
        }
    }

    /// Skips an optional `= value` initializer or default.
    fn skip_initializer(&mut self) {
        let assigns = self.at(HdlToken::Equals)
            || (self.at(HdlToken::Operator) && self.current_text().starts_with('='));
        if assigns {
            self.advance();
            self.skip_list_element();
        }
    }

    // ========================================================================
    // Top-level parsing
    // ========================================================================

    /// Parses a complete source file.
    pub fn parse_source_unit(&mut self) -> SourceUnit {
        let start = self.current_span();
        let mut modules = Vec::new();

        while !self.at_eof() {
            match self.current() {
                HdlToken::Module | HdlToken::Macromodule => modules.push(self.parse_module()),
                kind @ (HdlToken::Interface
                | HdlToken::Package
                | HdlToken::Primitive
                | HdlToken::Program
                | HdlToken::Class
                | HdlToken::Config) => self.skip_design_unit(kind),
                // Compilation-unit scope items.
                HdlToken::Import
                | HdlToken::Export
                | HdlToken::Typedef
                | HdlToken::Parameter
                | HdlToken::Localparam => self.recover_to_semicolon(),
                HdlToken::Semicolon => self.advance(),
                _ => {
                    self.expected("'module'");
                    self.advance();
                    self.recover_to_design_unit();
                }
            }
        }

        SourceUnit {
            modules,
            span: start.merge(self.prev_span()),
        }
    }

    fn skip_design_unit(&mut self, kind: HdlToken) {
        let start = self.current_span();
        let Some(closing) = kind.closing_keyword() else {
            self.advance();
            return;
        };
        let keyword = self.current_text();
        self.advance();
        let name = if self.current().is_identifier() {
            self.current_text()
        } else {
            ""
        };

        while !self.at_eof() && !self.at(closing) {
            self.advance();
        }
        if self.at_eof() {
            self.expected(&format!("'{}'", format!("{closing:?}").to_lowercase()));
        } else {
            self.advance();
            self.eat_end_label();
        }

        self.sink.emit(
            Diagnostic::warning(
                DiagnosticCode::UNIT_SKIPPED,
                format!("{keyword} '{name}' is skipped"),
                start.merge(self.prev_span()),
            )
            .with_note("only modules are considered for vector generation"),
        );
    }

    fn parse_module(&mut self) -> ModuleDecl {
        let start = self.current_span();
        self.advance(); // module / macromodule
        if matches!(self.current(), HdlToken::Automatic | HdlToken::Static) {
            self.advance();
        }

        let name_span = self.current_span();
        let name = self.expect_ident();

        while self.at(HdlToken::Import) {
            self.recover_to_semicolon();
        }
        if self.eat(HdlToken::Hash) {
            if self.at(HdlToken::LeftParen) {
                self.skip_balanced();
            } else {
                self.expected("'('");
            }
        }

        let ports = if self.at(HdlToken::LeftParen) {
            self.parse_port_list()
        } else {
            Vec::new()
        };
        if !self.expect(HdlToken::Semicolon, "';'") {
            self.recover_to_semicolon();
        }

        let mut body = ModuleBody::default();
        self.parse_module_items(&mut body);
        self.expect(HdlToken::Endmodule, "'endmodule'");
        self.eat_end_label();

        ModuleDecl {
            name,
            name_span,
            ports,
            declarations: body.declarations,
            instantiations: body.instantiations,
            span: start.merge(self.prev_span()),
        }
    }

    // ========================================================================
    // Port lists
    // ========================================================================

    fn parse_port_list(&mut self) -> Vec<PortConnect> {
        self.advance(); // (
        if self.eat(HdlToken::RightParen) {
            return Vec::new();
        }

        let ports = if self.ansi_group_ahead(0) {
            self.parse_ansi_port_list()
        } else {
            self.parse_non_ansi_port_list()
        };

        if !self.expect(HdlToken::RightParen, "')'") {
            while !self.at_eof() && !self.at(HdlToken::Semicolon) && !self.eat(HdlToken::RightParen)
            {
                self.advance();
            }
        }
        ports
    }

    /// Parses ANSI port declarations. A group ends at a comma followed by a
    /// new direction, type or range. Inheritance follows IEEE 1800
    /// §23.2.2.3: a group without a direction inherits the previous one
    /// (the first port defaults to `inout`), and a group with neither a
    /// direction nor a type keyword also inherits the previous type while
    /// keeping its own range.
    fn parse_ansi_port_list(&mut self) -> Vec<PortConnect> {
        let mut groups = Vec::new();
        let mut prev_direction = PortDirection::Inout;
        let mut prev_type = DataType::default();

        loop {
            let start = self.current_span();
            let start_pos = self.pos;
            let interface_port = self.interface_port_ahead(0);
            let direction = PortDirection::from_token(self.current());
            if direction.is_some() {
                self.advance();
            }
            let data_type = self.parse_data_type();
            let head = self.span_since(start_pos);

            let (inherited_direction, inherited_type) = if interface_port || direction.is_some() {
                (None, None)
            } else if data_type.is_untyped() {
                let inherited = DataType {
                    keyword: prev_type.keyword,
                    name: prev_type.name,
                    ..data_type.clone()
                };
                (Some(prev_direction), Some(inherited))
            } else {
                (Some(prev_direction), None)
            };
            if !interface_port {
                prev_direction = direction.unwrap_or(prev_direction);
                prev_type = inherited_type.clone().unwrap_or_else(|| data_type.clone());
            }

            let mut ports = Vec::new();
            loop {
                if !self.current().is_identifier() {
                    self.expected("port name");
                    self.skip_list_element();
                    break;
                }
                let name_span = self.current_span();
                let name = self.interner.get_or_intern(self.current_text());
                self.advance();
                while self.at(HdlToken::LeftBracket) {
                    self.skip_balanced();
                }
                self.skip_initializer();

                ports.push(AnsiPort {
                    name,
                    direction: inherited_direction,
                    data_type: inherited_type.clone(),
                    span: name_span,
                    head,
                });

                if self.at(HdlToken::Comma) && !self.ansi_group_ahead(1) {
                    self.advance();
                    continue;
                }
                break;
            }

            groups.push(PortConnect::Ansi(AnsiPortDecl {
                direction,
                data_type,
                ports,
                span: start.merge(self.prev_span()),
            }));

            if !self.eat(HdlToken::Comma) {
                break;
            }
        }

        groups
    }

    /// Parses a non-ANSI port list: each entry is empty, a plain name, or an
    /// arbitrary port expression.
    fn parse_non_ansi_port_list(&mut self) -> Vec<PortConnect> {
        let mut ports = Vec::new();
        loop {
            let span = self.current_span();
            if self.at(HdlToken::Comma) || self.at(HdlToken::RightParen) {
                ports.push(PortConnect::Empty { span });
            } else if self.current().is_identifier()
                && matches!(
                    self.peek_kind(1),
                    HdlToken::Comma | HdlToken::RightParen
                )
            {
                let name = self.interner.get_or_intern(self.current_text());
                self.advance();
                ports.push(PortConnect::IdRef { name, span });
            } else if self.at(HdlToken::Semicolon) || self.at_eof() {
                break;
            } else {
                self.skip_list_element();
                ports.push(PortConnect::Unsupported {
                    span: span.merge(self.prev_span()),
                });
            }

            if !self.eat(HdlToken::Comma) {
                break;
            }
        }
        ports
    }

    /// Parses an optional data type: keyword (`wire`, `var logic`,
    /// `tri logic`), user type (`my_t`, `pkg::my_t`) or interface port type
    /// (`bus_if.master`), then `signed`/`unsigned` and packed dimensions.
    fn parse_data_type(&mut self) -> DataType {
        let mut ty = DataType::default();

        if self.current().is_data_type() {
            let mut keyword = self.current();
            let mut text = self.current_text();
            self.advance();
            if keyword == HdlToken::Var {
                if self.current().is_data_type() {
                    keyword = self.current();
                    text = self.current_text();
                    self.advance();
                } else {
                    keyword = HdlToken::Logic;
                    text = "logic";
                }
            } else if keyword.is_net_type()
                && self.current().is_data_type()
                && !self.current().is_net_type()
            {
                self.advance();
            }
            ty.keyword = Some(keyword);
            ty.name = Some(self.interner.get_or_intern(text));
        } else if self.interface_port_ahead(0) {
            ty.name = Some(self.interner.get_or_intern(self.current_text()));
            self.advance(); // interface
            self.advance(); // .
            self.advance(); // modport
        } else if self.user_type_ahead(0).is_some() {
            let mut text = self.current_text().to_string();
            self.advance();
            if self.eat(HdlToken::ColonColon) {
                text.push_str("::");
                text.push_str(self.current_text());
                self.advance();
            }
            ty.name = Some(self.interner.get_or_intern(&text));
        }

        if matches!(self.current(), HdlToken::Signed | HdlToken::Unsigned) {
            ty.signed = self.at(HdlToken::Signed);
            self.advance();
        }
        if self.at(HdlToken::LeftBracket) {
            let start = self.current_span();
            while self.at(HdlToken::LeftBracket) {
                self.skip_balanced();
            }
            ty.packed = Some(start.merge(self.prev_span()));
        }
        ty
    }

    // ========================================================================
    // Module body
    // ========================================================================

    fn parse_module_items(&mut self, body: &mut ModuleBody) {
        loop {
            let kind = self.current();
            match kind {
                HdlToken::Endmodule | HdlToken::Eof => return,
                HdlToken::Semicolon => self.advance(),
                _ if kind.is_direction() || kind.is_data_type() => {
                    self.parse_body_declaration(body)
                }
                _ if kind.is_block_delimiter() => {
                    self.advance();
                    self.eat_end_label();
                }
                _ if kind.closing_keyword().is_some() => self.skip_nested_body(kind),
                HdlToken::Identifier | HdlToken::EscapedIdentifier => {
                    self.parse_identifier_item(body)
                }
                _ => self.skip_statement(),
            }
        }
    }

    /// Skips a function, task, specify block or nested design unit.
    fn skip_nested_body(&mut self, kind: HdlToken) {
        let Some(closing) = kind.closing_keyword() else {
            self.skip_statement();
            return;
        };
        self.advance();
        while !self.at_eof()
            && !self.at(closing)
            && !(closing != HdlToken::Endmodule && self.at(HdlToken::Endmodule))
        {
            self.advance();
        }
        if self.at(closing) {
            self.advance();
            self.eat_end_label();
        } else {
            self.expected(&format!("'{}'", format!("{closing:?}").to_lowercase()));
        }
    }

    /// Parses `input [3:0] a, b;`, `wire logic [7:0] w = x;`, `my_t s;` and
    /// records each name in the module's symbol table.
    fn parse_body_declaration(&mut self, body: &mut ModuleBody) {
        let start_pos = self.pos;
        let direction = PortDirection::from_token(self.current());
        if direction.is_some() {
            self.advance();
        }
        let data_type = self.parse_data_type();
        let head = self.span_since(start_pos);

        // Drive strength, charge strength and delays: wire (weak0, weak1) #2 w;
        if self.at(HdlToken::LeftParen) {
            self.skip_balanced();
        }
        if self.eat(HdlToken::Hash) {
            if self.at(HdlToken::LeftParen) {
                self.skip_balanced();
            } else {
                self.advance();
            }
        }

        loop {
            if !self.current().is_identifier() {
                self.expected("identifier");
                self.skip_statement();
                return;
            }
            let name_span = self.current_span();
            let name = self.interner.get_or_intern(self.current_text());
            self.advance();
            while self.at(HdlToken::LeftBracket) {
                self.skip_balanced();
            }
            self.skip_initializer();
            declare(body, name, direction, &data_type, name_span, head);

            if !self.eat(HdlToken::Comma) {
                break;
            }
        }

        if !self.expect(HdlToken::Semicolon, "';'") {
            self.skip_statement();
        }
    }

    /// Handles an item that starts with an identifier: a module
    /// instantiation, a declaration with a user-defined type, or a statement.
    fn parse_identifier_item(&mut self, body: &mut ModuleBody) {
        let module_span = self.current_span();

        let instance_at = if self.peek_kind(1) == HdlToken::Hash {
            let after_params = if self.peek_kind(2) == HdlToken::LeftParen {
                self.skip_group_ahead(2)
            } else {
                3
            };
            Some(after_params)
        } else {
            match self.user_type_ahead(0) {
                Some(name_at) => {
                    let after = self.skip_dims_ahead(name_at + 1);
                    if self.peek_kind(after) == HdlToken::LeftParen {
                        Some(name_at)
                    } else {
                        self.parse_body_declaration(body);
                        return;
                    }
                }
                None => None,
            }
        };

        if let Some(name_at) = instance_at {
            if self.peek_kind(name_at).is_identifier() {
                body.instantiations.push(Instantiation {
                    module: self.interner.get_or_intern(self.current_text()),
                    span: module_span,
                });
            }
        }
        self.skip_statement();
    }
}

/// Merges a declaration into the symbol table. A direction declaration owns
/// the entry's span; a net/variable declaration fills in an untyped entry.
fn declare(
    body: &mut ModuleBody,
    name: Ident,
    direction: Option<PortDirection>,
    data_type: &DataType,
    span: Span,
    head: Span,
) {
    match body.declarations.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(Declaration {
                direction,
                data_type: data_type.clone(),
                span,
                head,
                net_head: direction.is_none().then_some(head),
            });
        }
        Entry::Occupied(slot) => {
            let decl = slot.into_mut();
            if direction.is_some() {
                decl.direction = direction;
                decl.span = span;
                decl.head = head;
                if !data_type.is_untyped() {
                    decl.data_type = data_type.clone();
                }
            } else {
                if decl.data_type.is_untyped() {
                    decl.data_type = data_type.clone();
                }
                decl.net_head = Some(head);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use tvgen_source::FileId;

    struct Parsed {
        unit: SourceUnit,
        diagnostics: Vec<Diagnostic>,
        interner: Interner,
    }

    impl Parsed {
        fn name(&self, ident: Ident) -> String {
            self.interner.resolve(ident)
        }

        fn ident(&self, name: &str) -> Ident {
            self.interner.get(name).unwrap()
        }

        fn errors(&self) -> Vec<&str> {
            self.diagnostics
                .iter()
                .filter(|d| d.severity.is_error())
                .map(|d| d.message.as_str())
                .collect()
        }
    }

    fn parse(source: &str) -> Parsed {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let tokens = lexer::lex(source, FileId::from_raw(0), &sink);
        let unit = Parser::new(tokens, source, &interner, &sink).parse_source_unit();
        Parsed {
            unit,
            diagnostics: sink.take_all(),
            interner,
        }
    }

    fn parse_ok(source: &str) -> Parsed {
        let parsed = parse(source);
        assert!(
            parsed.errors().is_empty(),
            "unexpected errors: {:?}",
            parsed.errors()
        );
        parsed
    }

    fn ansi_groups(module: &ModuleDecl) -> Vec<&AnsiPortDecl> {
        module
            .ports
            .iter()
            .filter_map(|p| match p {
                PortConnect::Ansi(group) => Some(group),
                _ => None,
            })
            .collect()
    }

    fn snippet<'a>(source: &'a str, span: Span) -> &'a str {
        &source[span.start as usize..span.end as usize]
    }

    #[test]
    fn minimal_module() {
        let p = parse_ok("module top; endmodule");
        assert_eq!(p.unit.modules.len(), 1);
        assert_eq!(p.name(p.unit.modules[0].name), "top");
        assert!(p.unit.modules[0].ports.is_empty());
    }

    #[test]
    fn empty_port_list() {
        let p = parse_ok("module top(); endmodule : top");
        assert!(p.unit.modules[0].ports.is_empty());
    }

    #[test]
    fn port_head_excludes_sibling_dimensions() {
        let source = "module m(input logic a [3:0], b);\n\
                      wire w [1:0], q;\n\
                      endmodule";
        let p = parse_ok(source);
        let module = &p.unit.modules[0];
        let groups = ansi_groups(module);
        assert_eq!(snippet(source, groups[0].ports[1].span), "b");
        assert_eq!(snippet(source, groups[0].ports[1].head), "input logic");
        let q = &module.declarations[&p.ident("q")];
        assert_eq!(snippet(source, q.head), "wire");
    }

    #[test]
    fn ansi_groups_split_on_direction() {
        let source = "module adder(input [3:0] a, b, output [4:0] sum); endmodule";
        let p = parse_ok(source);
        let module = &p.unit.modules[0];
        assert!(module.ports.iter().all(|p| matches!(p, PortConnect::Ansi(_))));
        let groups = ansi_groups(module);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].direction, Some(PortDirection::Input));
        assert_eq!(groups[0].ports.len(), 2);
        assert_eq!(p.name(groups[0].ports[1].name), "b");
        assert_eq!(snippet(source, groups[0].ports[1].span), "b");
        assert_eq!(snippet(source, groups[0].ports[1].head), "input [3:0]");
        assert_eq!(groups[1].direction, Some(PortDirection::Output));
        assert_eq!(snippet(source, groups[1].ports[0].head), "output [4:0]");
    }

    #[test]
    fn ansi_data_types() {
        let p = parse_ok(
            "module m(input wire logic clk, output var [7:0] q, inout tri1 t, input my_t s); endmodule",
        );
        let groups = ansi_groups(&p.unit.modules[0]);
        assert_eq!(groups[0].data_type.keyword, Some(HdlToken::Wire));
        assert_eq!(groups[1].data_type.keyword, Some(HdlToken::Logic));
        assert!(groups[1].data_type.packed.is_some());
        assert_eq!(groups[2].data_type.keyword, Some(HdlToken::Tri1));
        assert_eq!(groups[3].data_type.keyword, None);
        assert_eq!(p.name(groups[3].data_type.name.unwrap()), "my_t");
    }

    #[test]
    fn ansi_direction_inheritance() {
        let p = parse_ok("module m(input logic a, [7:0] b, logic c); endmodule");
        let groups = ansi_groups(&p.unit.modules[0]);
        assert_eq!(groups.len(), 3);
        // `[7:0] b` keeps its own range but inherits direction and type.
        assert_eq!(groups[1].direction, None);
        let b = &groups[1].ports[0];
        assert_eq!(b.direction, Some(PortDirection::Input));
        let b_type = b.data_type.as_ref().unwrap();
        assert_eq!(b_type.keyword, Some(HdlToken::Logic));
        assert!(b_type.packed.is_some());
        // `logic c` names its own type.
        assert_eq!(groups[2].ports[0].direction, Some(PortDirection::Input));
        assert!(groups[2].ports[0].data_type.is_none());
    }

    #[test]
    fn ansi_type_inheritance_without_direction_or_type() {
        let p = parse_ok("module m(output reg [3:0] q, input d, e); endmodule");
        let groups = ansi_groups(&p.unit.modules[0]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].ports.len(), 2);
        assert_eq!(groups[1].data_type, DataType::default());
    }

    #[test]
    fn first_ansi_port_without_direction_is_inout() {
        let p = parse_ok("module m(logic a); endmodule");
        let groups = ansi_groups(&p.unit.modules[0]);
        assert_eq!(groups[0].direction, None);
        assert_eq!(groups[0].ports[0].direction, Some(PortDirection::Inout));
    }

    #[test]
    fn ansi_interface_port() {
        let p = parse_ok("module m(bus_if.master bus, input clk); endmodule");
        let groups = ansi_groups(&p.unit.modules[0]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].direction, None);
        assert_eq!(groups[0].ports[0].direction, None);
        assert_eq!(p.name(groups[0].data_type.name.unwrap()), "bus_if");
    }

    #[test]
    fn ansi_port_defaults_and_unpacked_dims() {
        let p = parse_ok("module m(input int mem [4], output logic q = 1'b0); endmodule");
        let groups = ansi_groups(&p.unit.modules[0]);
        assert_eq!(groups.len(), 2);
        assert_eq!(p.name(groups[1].ports[0].name), "q");
    }

    #[test]
    fn parameter_port_list_is_skipped() {
        let p = parse_ok(
            "module m #(parameter W = 8, parameter [1:0] M = 2'b01) (input [W-1:0] d); endmodule",
        );
        assert_eq!(ansi_groups(&p.unit.modules[0]).len(), 1);
    }

    #[test]
    fn non_ansi_entries() {
        let source = "module m(a, , .b(c), {d, e}, f[3:0], g); endmodule";
        let p = parse_ok(source);
        let ports = &p.unit.modules[0].ports;
        assert_eq!(ports.len(), 6);
        assert!(matches!(ports[0], PortConnect::IdRef { .. }));
        assert!(matches!(ports[1], PortConnect::Empty { .. }));
        match &ports[2] {
            PortConnect::Unsupported { span } => assert_eq!(snippet(source, *span), ".b(c)"),
            other => panic!("expected unsupported port, got {other:?}"),
        }
        assert!(matches!(ports[3], PortConnect::Unsupported { .. }));
        assert!(matches!(ports[4], PortConnect::Unsupported { .. }));
        assert!(matches!(ports[5], PortConnect::IdRef { .. }));
    }

    #[test]
    fn body_declarations_merge() {
        let source = "module m(a, q, r);\n\
                      input [3:0] a;\n\
                      output q;\n\
                      reg [7:0] q;\n\
                      reg r;\n\
                      output r;\n\
                      wire w = a[0];\n\
                      endmodule";
        let p = parse_ok(source);
        let decls = &p.unit.modules[0].declarations;

        let a = &decls[&p.ident("a")];
        assert_eq!(a.direction, Some(PortDirection::Input));
        assert!(a.data_type.is_untyped());
        assert_eq!(snippet(source, a.span), "a");
        assert_eq!(snippet(source, a.head), "input [3:0]");

        let q = &decls[&p.ident("q")];
        assert_eq!(q.direction, Some(PortDirection::Output));
        assert_eq!(q.data_type.keyword, Some(HdlToken::Reg));
        assert_eq!(snippet(source, q.head), "output");
        assert_eq!(snippet(source, q.net_head.unwrap()), "reg [7:0]");

        let r = &decls[&p.ident("r")];
        assert_eq!(r.direction, Some(PortDirection::Output));
        assert_eq!(r.data_type.keyword, Some(HdlToken::Reg));

        assert_eq!(decls[&p.ident("w")].direction, None);
    }

    #[test]
    fn instantiations_are_recorded() {
        let p = parse_ok(
            "module top(input clk);\n\
               counter #(.W(4)) u_cnt (.clk(clk));\n\
               fifo u_fifo[1:0] (clk);\n\
               my_t state;\n\
               and g1 (y, a, b);\n\
             endmodule",
        );
        let module = &p.unit.modules[0];
        let names: Vec<String> = module
            .instantiations
            .iter()
            .map(|i| p.name(i.module))
            .collect();
        assert_eq!(names, vec!["counter", "fifo"]);
        assert!(module.declarations.contains_key(&p.ident("state")));
    }

    #[test]
    fn procedural_code_is_skipped() {
        let p = parse_ok(
            "module m(input clk, output reg q);\n\
               always @(posedge clk) begin : blk\n\
                 if (q) q <= 1'b0; else q <= 1'b1;\n\
                 case (q) 1'b0: q <= 1; default: begin q <= 0; end endcase\n\
               end\n\
               function automatic int f(input int x); return x; endfunction\n\
               task t; input a; begin end endtask\n\
               wire late;\n\
             endmodule",
        );
        let decls = &p.unit.modules[0].declarations;
        assert!(decls.contains_key(&p.ident("late")));
        // `input a` inside the task is not a module port.
        assert!(p.interner.get("a").map_or(true, |a| !decls.contains_key(&a)));
    }

    #[test]
    fn other_design_units_are_skipped_with_warning() {
        let p = parse_ok(
            "package pkg; typedef logic [3:0] nib_t; endpackage\n\
             interface bus_if; logic a; endinterface : bus_if\n\
             module m; endmodule",
        );
        assert_eq!(p.unit.modules.len(), 1);
        let skipped = p
            .diagnostics
            .iter()
            .filter(|d| d.code == DiagnosticCode::UNIT_SKIPPED)
            .count();
        assert_eq!(skipped, 2);
    }

    #[test]
    fn macromodule_and_header_import() {
        let p = parse_ok("macromodule m import pkg::*; (input a); endmodule");
        assert_eq!(p.unit.modules.len(), 1);
        assert_eq!(ansi_groups(&p.unit.modules[0]).len(), 1);
    }

    #[test]
    fn missing_endmodule_is_error() {
        let p = parse("module m(input a);\nwire b;\n");
        assert!(p
            .errors()
            .iter()
            .any(|e| e.contains("expected 'endmodule'")));
    }

    #[test]
    fn garbage_at_top_level_is_error() {
        let p = parse("wire x; module m; endmodule");
        assert_eq!(p.errors().len(), 1);
        assert_eq!(p.unit.modules.len(), 1);
    }

    #[test]
    fn missing_port_name_is_error() {
        let p = parse("module m(input [3:0]); endmodule");
        assert!(p.errors().iter().any(|e| e.contains("expected port name")));
    }
}
