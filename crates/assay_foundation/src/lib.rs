//! Expression trees, source printing, and errors for Assay.
//!
//! This crate provides:
//! - [`Expr`] - Immutable labeled tree nodes that every other layer operates on
//! - [`Node`] and [`Atom`] - Children of an expression
//! - [`Symbol`] - Cheaply cloneable names for kinds and method atoms
//! - [`printer`] - Ruby-flavored source rendering of expression trees
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod expr;
pub mod printer;
pub mod symbol;

pub use error::{Error, ErrorContext, ErrorKind, Result, SemanticLimit};
pub use expr::{Atom, Expr, Node};
pub use printer::{PrintConfig, Printer};
pub use symbol::Symbol;
