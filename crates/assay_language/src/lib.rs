//! Lexer, parser, and tree reader for Assay's s-expression notation.
//!
//! Both expression trees and rule patterns are written as s-expressions:
//!
//! ```text
//! (call nil assert_equal (lit 0) (call (call nil obj) length))
//! (call nil assert_equal (lit 0) (call ? [m length size count]))
//! ```
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of notation source
//! - [`Parser`] - Parsing tokens into a spanned [`Ast`]
//! - [`reader`] - Converting lists into [`assay_foundation::Expr`] trees
//!
//! Pattern directives (`[...]` vectors) survive parsing as [`Ast::Vector`];
//! the engine turns them into pattern specs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod reader;
pub mod span;
pub mod token;

pub use ast::Ast;
pub use lexer::Lexer;
pub use parser::{Parser, parse, parse_one};
pub use reader::{read_all, read_expr, read_one};
pub use span::Span;
pub use token::{Token, TokenKind};
