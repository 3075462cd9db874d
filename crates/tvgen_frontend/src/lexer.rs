//! Lexical analyzer for Verilog / SystemVerilog source text.
//!
//! Converts source text into [`Token`]s. Whitespace, line and block comments
//! and `(* attribute *)` instances are skipped. Compiler directives such as
//! `` `timescale`` are skipped to the end of their line with a warning; any
//! other backtick name is a macro use and becomes a single
//! [`HdlToken::MacroUsage`] token, since the front-end does not preprocess.
//! Malformed input is reported to the [`DiagnosticSink`] and produces
//! [`HdlToken::Error`] tokens.

use crate::token::{lookup_keyword, HdlToken, Token};
use tvgen_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use tvgen_source::{FileId, Span};

/// Compiler directives that occupy the rest of their line.
const LINE_DIRECTIVES: &[&str] = &[
    "begin_keywords",
    "celldefine",
    "default_nettype",
    "define",
    "else",
    "elsif",
    "end_keywords",
    "endcelldefine",
    "endif",
    "ifdef",
    "ifndef",
    "include",
    "line",
    "nounconnected_drive",
    "pragma",
    "resetall",
    "timescale",
    "unconnected_drive",
    "undef",
    "undefineall",
];

/// Lexes `source` into a token vector that always ends with
/// [`HdlToken::Eof`].
pub fn lex(source: &str, file: FileId, sink: &DiagnosticSink) -> Vec<Token> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        pos: 0,
        file,
        sink,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    file: FileId,
    sink: &'a DiagnosticSink,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            if self.pos >= self.source.len() {
                tokens.push(Token {
                    kind: HdlToken::Eof,
                    span: Span::new(self.file, self.pos as u32, self.pos as u32),
                });
                break;
            }
            tokens.push(self.next_token());
        }
        tokens
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.file, start as u32, self.pos as u32)
    }

    fn token(&self, kind: HdlToken, start: usize) -> Token {
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    fn error(&self, msg: &str, span: Span) {
        self.sink
            .emit(Diagnostic::error(DiagnosticCode::LEX_ERROR, msg, span));
    }

    fn skip_to_line_end(&mut self) {
        while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            while self.pos < self.source.len() && self.source[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos >= self.source.len() {
                return;
            }
            match (self.peek(), self.peek_at(1)) {
                (b'/', b'/') => self.skip_to_line_end(),
                (b'/', b'*') => self.skip_delimited(b"*/", "unterminated block comment"),
                // `(*)` is an event control wildcard, not an attribute.
                (b'(', b'*') if self.peek_at(2) != b')' => {
                    self.skip_delimited(b"*)", "unterminated attribute instance")
                }
                (b'`', _) if self.at_line_directive() => self.skip_directive(),
                _ => return,
            }
        }
    }

    fn skip_delimited(&mut self, close: &[u8; 2], unterminated: &str) {
        let start = self.pos;
        self.pos += 2;
        loop {
            if self.pos >= self.source.len() {
                self.error(unterminated, self.span_from(start));
                return;
            }
            if self.source[self.pos] == close[0] && self.peek_at(1) == close[1] {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
    }

    fn directive_name(&self) -> &str {
        let start = self.pos + 1;
        let mut end = start;
        while end < self.source.len() && is_ident_char(self.source[end]) {
            end += 1;
        }
        std::str::from_utf8(&self.source[start..end]).unwrap_or("")
    }

    fn at_line_directive(&self) -> bool {
        LINE_DIRECTIVES.contains(&self.directive_name())
    }

    /// Skips a directive line. A trailing backslash continues a `` `define``
    /// body onto the next line.
    fn skip_directive(&mut self) {
        let start = self.pos;
        let name = self.directive_name().to_string();
        loop {
            self.skip_to_line_end();
            let continued = self.pos > 0
                && self.source[..self.pos]
                    .trim_ascii_end()
                    .last()
                    .is_some_and(|&b| b == b'\\');
            if !continued || self.pos >= self.source.len() {
                break;
            }
            self.pos += 1;
        }
        self.sink.emit(
            Diagnostic::warning(
                DiagnosticCode::DIRECTIVE_SKIPPED,
                format!("compiler directive `{name}` is ignored"),
                self.span_from(start),
            )
            .with_note("tvgen does not run a preprocessor"),
        );
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let b = self.peek();

        if is_ident_start(b) {
            return self.lex_identifier_or_keyword(start);
        }
        if b == b'\\' {
            return self.lex_escaped_identifier(start);
        }
        if b == b'$' {
            return self.lex_prefixed_name(start, HdlToken::SystemIdentifier, "'$'");
        }
        if b == b'`' {
            return self.lex_prefixed_name(start, HdlToken::MacroUsage, "'`'");
        }
        if b.is_ascii_digit() {
            return self.lex_number(start);
        }
        if b == b'\'' && matches!(self.peek_at(1).to_ascii_lowercase(), b'b' | b'o' | b'd' | b'h' | b's')
        {
            return self.lex_unsized_based_literal(start);
        }
        if b == b'"' {
            return self.lex_string(start);
        }
        self.lex_operator(start)
    }

    fn lex_identifier_or_keyword(&mut self, start: usize) -> Token {
        while self.pos < self.source.len() && is_ident_char(self.source[self.pos]) {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("");
        let kind = lookup_keyword(text).unwrap_or(HdlToken::Identifier);
        self.token(kind, start)
    }

    fn lex_escaped_identifier(&mut self, start: usize) -> Token {
        self.pos += 1;
        while self.pos < self.source.len() && !self.source[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos == start + 1 {
            self.error("empty escaped identifier", self.span_from(start));
            return self.token(HdlToken::Error, start);
        }
        self.token(HdlToken::EscapedIdentifier, start)
    }

    /// Lexes `$name` or `` `name``.
    fn lex_prefixed_name(&mut self, start: usize, kind: HdlToken, prefix: &str) -> Token {
        self.pos += 1;
        if self.pos < self.source.len() && is_ident_start(self.source[self.pos]) {
            while self.pos < self.source.len() && is_ident_char(self.source[self.pos]) {
                self.pos += 1;
            }
            self.token(kind, start)
        } else {
            self.error(
                &format!("expected identifier after {prefix}"),
                self.span_from(start),
            );
            self.token(HdlToken::Error, start)
        }
    }

    fn lex_number(&mut self, start: usize) -> Token {
        self.eat_decimal_digits();

        // Sized literal: 4'b1010, 8'sh7f
        if self.peek() == b'\'' {
            let mut base_at = 1;
            if self.peek_at(1).to_ascii_lowercase() == b's' {
                base_at = 2;
            }
            let base = self.peek_at(base_at).to_ascii_lowercase();
            if matches!(base, b'b' | b'o' | b'd' | b'h') {
                self.pos += base_at + 1;
                self.eat_based_digits(base);
                return self.token(HdlToken::SizedLiteral, start);
            }
        }

        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            self.pos += 1;
            self.eat_decimal_digits();
            self.eat_exponent();
            return self.token(HdlToken::RealLiteral, start);
        }

        if matches!(self.peek(), b'e' | b'E') {
            self.eat_exponent();
            return self.token(HdlToken::RealLiteral, start);
        }

        self.token(HdlToken::IntLiteral, start)
    }

    fn lex_unsized_based_literal(&mut self, start: usize) -> Token {
        self.pos += 1;
        if self.peek().to_ascii_lowercase() == b's' {
            self.pos += 1;
        }
        let base = self.peek().to_ascii_lowercase();
        if matches!(base, b'b' | b'o' | b'd' | b'h') {
            self.pos += 1;
            self.eat_based_digits(base);
        } else {
            self.error("expected base after signed tick", self.span_from(start));
            return self.token(HdlToken::Error, start);
        }
        self.token(HdlToken::SizedLiteral, start)
    }

    fn eat_decimal_digits(&mut self) {
        while self.peek().is_ascii_digit() || self.peek() == b'_' {
            self.pos += 1;
        }
    }

    fn eat_based_digits(&mut self, base: u8) {
        // Whitespace between the base and the digits is legal: 4'b 1010
        while matches!(self.peek(), b' ' | b'\t') {
            self.pos += 1;
        }
        loop {
            let ch = self.peek().to_ascii_lowercase();
            let valid = match base {
                b'b' => matches!(ch, b'0' | b'1' | b'x' | b'z' | b'?' | b'_'),
                b'o' => matches!(ch, b'0'..=b'7' | b'x' | b'z' | b'?' | b'_'),
                b'd' => ch.is_ascii_digit() || matches!(ch, b'x' | b'z' | b'?' | b'_'),
                b'h' => ch.is_ascii_hexdigit() || matches!(ch, b'x' | b'z' | b'?' | b'_'),
                _ => false,
            };
            if !valid {
                break;
            }
            self.pos += 1;
        }
    }

    fn eat_exponent(&mut self) {
        if matches!(self.peek(), b'e' | b'E') {
            self.pos += 1;
            if matches!(self.peek(), b'+' | b'-') {
                self.pos += 1;
            }
            self.eat_decimal_digits();
        }
    }

    fn lex_string(&mut self, start: usize) -> Token {
        self.pos += 1;
        loop {
            if self.pos >= self.source.len() || self.source[self.pos] == b'\n' {
                self.error("unterminated string literal", self.span_from(start));
                return self.token(HdlToken::Error, start);
            }
            match self.source[self.pos] {
                b'\\' => self.pos = (self.pos + 2).min(self.source.len()),
                b'"' => {
                    self.pos += 1;
                    return self.token(HdlToken::StringLiteral, start);
                }
                _ => self.pos += 1,
            }
        }
    }

    fn lex_operator(&mut self, start: usize) -> Token {
        let b = self.peek();
        self.pos += 1;
        let kind = match b {
            b'(' => HdlToken::LeftParen,
            b')' => HdlToken::RightParen,
            b'[' => HdlToken::LeftBracket,
            b']' => HdlToken::RightBracket,
            b'{' => HdlToken::LeftBrace,
            b'}' => HdlToken::RightBrace,
            b',' => HdlToken::Comma,
            b';' => HdlToken::Semicolon,
            b'.' => HdlToken::Dot,
            b'#' => HdlToken::Hash,
            b'@' => HdlToken::At,
            b'\'' => HdlToken::Tick,
            b':' => {
                if self.peek() == b':' {
                    self.pos += 1;
                    HdlToken::ColonColon
                } else {
                    // `+:` / `-:` part-selects and `:=` / `:/` dist weights
                    // keep the colon as its own token.
                    HdlToken::Colon
                }
            }
            b'=' if !is_operator_char(self.peek()) => HdlToken::Equals,
            _ if is_operator_char(b) => {
                while is_operator_char(self.peek()) {
                    self.pos += 1;
                }
                HdlToken::Operator
            }
            _ => {
                // Keep spans on char boundaries for multi-byte input.
                while self.pos < self.source.len() && (self.source[self.pos] & 0xC0) == 0x80 {
                    self.pos += 1;
                }
                let span = self.span_from(start);
                let shown = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("?");
                self.error(&format!("unrecognized character '{shown}'"), span);
                HdlToken::Error
            }
        };
        self.token(kind, start)
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_operator_char(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'|' | b'^' | b'~' | b'!' | b'<' | b'>' | b'='
            | b'?'
    )
}
