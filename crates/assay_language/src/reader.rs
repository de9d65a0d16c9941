//! Converts parsed tree notation into expression trees.
//!
//! A list's head names the node kind and the remaining elements are its
//! children. `nil`, booleans, numbers, and strings become atoms; symbols and
//! keywords both become name atoms, so `include?` and `:include?` read the
//! same. A bare `(true)` reads as a childless node of kind `true`.

use assay_foundation::{Atom, Expr, Node, Result};

use crate::ast::Ast;
use crate::parser::{Parser, parse, syntax_error};

/// Reads one expression from a parsed list.
///
/// `source` is the text `ast` was parsed from; it is used for error context.
///
/// # Errors
/// Returns a parse error if `ast` is not a non-empty list with a name head,
/// or if it contains a vector.
pub fn read_expr(ast: &Ast, source: &str) -> Result<Expr> {
    let Ast::List(elements, span) = ast else {
        return Err(syntax_error(
            source,
            ast.span(),
            &format!("expected a list, found {}", ast.type_name()),
        ));
    };

    let Some((head, rest)) = elements.split_first() else {
        return Err(syntax_error(source, *span, "empty list has no kind"));
    };

    let kind = match head {
        Ast::Symbol(name, _) | Ast::Keyword(name, _) => name.as_str(),
        Ast::Nil(_) => "nil",
        Ast::Bool(true, _) => "true",
        Ast::Bool(false, _) => "false",
        other => {
            return Err(syntax_error(
                source,
                other.span(),
                &format!("node kind must be a name, found {}", other.type_name()),
            ));
        }
    };

    let children = rest
        .iter()
        .map(|child| read_node(child, source))
        .collect::<Result<Vec<Node>>>()?;

    Ok(Expr::new(kind, children))
}

/// Reads one child: a nested list or an atom.
///
/// # Errors
/// Returns a parse error for vectors or malformed nested lists.
pub fn read_node(ast: &Ast, source: &str) -> Result<Node> {
    let atom = match ast {
        Ast::List(..) => return read_expr(ast, source).map(Node::Expr),
        Ast::Vector(_, span) => {
            return Err(syntax_error(
                source,
                *span,
                "vectors are pattern directives and cannot appear in a tree",
            ));
        }
        Ast::Nil(_) => Atom::Nil,
        Ast::Bool(b, _) => Atom::Bool(*b),
        Ast::Int(n, _) => Atom::Int(*n),
        Ast::Float(n, _) => Atom::Float(*n),
        Ast::String(s, _) => Atom::str(s),
        Ast::Symbol(name, _) | Ast::Keyword(name, _) => Atom::name(name.as_str()),
    };
    Ok(Node::Atom(atom))
}

/// Reads every top-level expression in `source`.
///
/// # Errors
/// Returns the first parse or read error.
pub fn read_all(source: &str) -> Result<Vec<Expr>> {
    parse(source)?
        .iter()
        .map(|ast| read_expr(ast, source))
        .collect()
}

/// Reads exactly one expression from `source`.
///
/// # Errors
/// Returns a parse error if the source is empty, malformed, or holds more
/// than one form.
pub fn read_one(source: &str) -> Result<Expr> {
    let mut parser = Parser::new(source);
    let ast = parser.parse()?;
    if !parser.at_end() {
        return Err(syntax_error(source, ast.span(), "expected a single expression"));
    }
    read_expr(&ast, source)
}
