//! Parser for tree and pattern notation.
//!
//! The parser converts a stream of tokens into an abstract syntax tree.

use assay_foundation::{Error, ErrorKind, Result};

use crate::ast::Ast;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parser for notation source.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for error messages).
    source: &'src str,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
        }
    }

    /// Parses a single form from the source.
    ///
    /// # Errors
    /// Returns an error if the source cannot be parsed.
    pub fn parse(&mut self) -> Result<Ast> {
        self.skip_trivia();
        self.parse_form()
    }

    /// Parses all forms from the source.
    ///
    /// # Errors
    /// Returns an error if the source cannot be parsed.
    pub fn parse_all(&mut self) -> Result<Vec<Ast>> {
        let mut forms = Vec::new();
        self.skip_trivia();

        while self.current.kind != TokenKind::Eof {
            forms.push(self.parse_form()?);
            self.skip_trivia();
        }

        Ok(forms)
    }

    /// Returns true if only trivia remains.
    #[must_use]
    pub fn at_end(&mut self) -> bool {
        self.skip_trivia();
        self.current.kind == TokenKind::Eof
    }

    fn parse_form(&mut self) -> Result<Ast> {
        self.skip_trivia();

        let span = self.current.span;
        let ast = match &self.current.kind {
            TokenKind::LParen => return self.parse_seq(&TokenKind::RParen, "list", Ast::List),
            TokenKind::LBracket => {
                return self.parse_seq(&TokenKind::RBracket, "vector", Ast::Vector);
            }
            TokenKind::Nil => Ast::Nil(span),
            TokenKind::True => Ast::Bool(true, span),
            TokenKind::False => Ast::Bool(false, span),
            TokenKind::Int(n) => Ast::Int(*n, span),
            TokenKind::Float(n) => Ast::Float(*n, span),
            TokenKind::String(s) => Ast::String(s.clone(), span),
            TokenKind::Symbol(name) => Ast::Symbol(name.clone(), span),
            TokenKind::Keyword(name) => Ast::Keyword(name.clone(), span),
            TokenKind::Eof => return Err(self.error("unexpected end of input")),
            TokenKind::Error(msg) => return Err(self.error(msg)),
            TokenKind::RParen | TokenKind::RBracket => {
                return Err(self.error(&format!("unexpected {}", self.current.kind.name())));
            }
            TokenKind::Comment(_) => {
                self.advance();
                return self.parse_form();
            }
        };
        self.advance();
        Ok(ast)
    }

    /// Parses the elements of a list or vector up to `close`.
    fn parse_seq(
        &mut self,
        close: &TokenKind,
        what: &str,
        build: fn(Vec<Ast>, Span) -> Ast,
    ) -> Result<Ast> {
        let start_span = self.current.span;
        self.advance(); // consume the opening delimiter

        let mut elements = Vec::new();
        self.skip_trivia();

        while self.current.kind != *close {
            if self.current.kind == TokenKind::Eof {
                return Err(self.error_at(start_span, &format!("unterminated {what}")));
            }
            elements.push(self.parse_form()?);
            self.skip_trivia();
        }

        let end_span = self.current.span;
        self.expect(close)?;

        Ok(build(elements, start_span.to(end_span)))
    }

    fn skip_trivia(&mut self) {
        while self.current.kind.is_trivia() {
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        let matches =
            std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected);

        if matches {
            self.advance();
            Ok(())
        } else {
            let expected_name = expected.name();
            Err(self.error(&format!(
                "expected {expected_name}, found {}",
                self.current.kind.name()
            )))
        }
    }

    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    fn error_at(&self, span: Span, message: &str) -> Error {
        syntax_error(self.source, span, message)
    }
}

/// Builds a parse error pointing at `span` in `source`.
#[must_use]
pub fn syntax_error(source: &str, span: Span, message: &str) -> Error {
    Error::new(ErrorKind::ParseError {
        message: message.to_string(),
        line: span.line,
        column: span.column,
        context: span.line_text(source).to_string(),
    })
}

/// Parses source into AST forms.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<Vec<Ast>> {
    Parser::new(source).parse_all()
}

/// Parses exactly one form from source.
///
/// # Errors
/// Returns an error if the source cannot be parsed or holds more than one
/// form.
pub fn parse_one(source: &str) -> Result<Ast> {
    let mut parser = Parser::new(source);
    let form = parser.parse()?;
    if parser.at_end() {
        Ok(form)
    } else {
        Err(parser.error("expected a single form"))
    }
}
