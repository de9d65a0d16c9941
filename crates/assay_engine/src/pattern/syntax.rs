//! Pattern notation.
//!
//! Patterns are written in the same s-expression notation as trees, with a
//! few reserved symbols and vector directives:
//!
//! | notation          | meaning                                   |
//! |-------------------|-------------------------------------------|
//! | `_`               | any single child                          |
//! | `___`             | any remaining children                    |
//! | `?`               | capture any single child                  |
//! | `[? P]`           | capture what `P` matched                  |
//! | `[any P Q ...]`   | first alternative that matches            |
//! | `[m a b ...]`     | name in the whitelist                     |
//! | `[prefix p]`      | name starting with `p`                    |
//! | `[- P]`           | negation                                  |
//! | `[atom]`          | any atom; `[atom float]` restricts class  |
//! | `:name`           | the literal name, even `:_` or `:?`       |

use assay_foundation::{Atom, Error, Result, Symbol};
use assay_language::{Ast, parse_one};

use super::{AtomClass, PatternSpec};

/// Parses pattern notation into a spec.
///
/// The spec is not validated; compile it with
/// [`PatternCompiler`](super::PatternCompiler).
///
/// # Errors
/// Returns a parse error for malformed notation, or an invalid pattern error
/// for unknown or malformed directives.
pub fn parse_pattern(source: &str) -> Result<PatternSpec> {
    let ast = parse_one(source)?;
    spec_from_ast(&ast, source)
}

/// Converts one parsed form into a spec.
///
/// # Errors
/// Returns an invalid pattern error for unknown or malformed directives.
pub fn spec_from_ast(ast: &Ast, source: &str) -> Result<PatternSpec> {
    Ok(match ast {
        Ast::Symbol(name, _) => match name.as_str() {
            "_" => PatternSpec::Any,
            "___" => PatternSpec::Rest,
            "?" => PatternSpec::capture_any(),
            _ => PatternSpec::name(name.as_str()),
        },
        Ast::Keyword(name, _) => PatternSpec::name(name.as_str()),
        Ast::Nil(_) => PatternSpec::nil(),
        Ast::Bool(b, _) => PatternSpec::Literal(Atom::Bool(*b)),
        Ast::Int(n, _) => PatternSpec::Literal(Atom::Int(*n)),
        Ast::Float(n, _) => PatternSpec::Literal(Atom::Float(*n)),
        Ast::String(s, _) => PatternSpec::Literal(Atom::str(s)),
        Ast::List(elements, _) => {
            let Some((head, rest)) = elements.split_first() else {
                return Err(invalid(ast, source, "empty list has no kind"));
            };
            PatternSpec::Node {
                kind: Box::new(spec_from_ast(head, source)?),
                children: specs(rest, source)?,
            }
        }
        Ast::Vector(elements, _) => directive(ast, elements, source)?,
    })
}

fn specs(asts: &[Ast], source: &str) -> Result<Vec<PatternSpec>> {
    asts.iter().map(|a| spec_from_ast(a, source)).collect()
}

fn directive(ast: &Ast, elements: &[Ast], source: &str) -> Result<PatternSpec> {
    let Some((head, args)) = elements.split_first() else {
        return Err(invalid(ast, source, "empty directive"));
    };
    let Some(name) = head.as_symbol() else {
        return Err(invalid(ast, source, "directive must start with a symbol"));
    };

    match (name, args) {
        ("?", [inner]) => Ok(PatternSpec::capture(spec_from_ast(inner, source)?)),
        ("-", [inner]) => Ok(PatternSpec::not(spec_from_ast(inner, source)?)),
        ("any", alts) => Ok(PatternSpec::Either(specs(alts, source)?)),
        ("m", names) => Ok(PatternSpec::OneOf(
            names
                .iter()
                .map(|n| name_arg(n, ast, source))
                .collect::<Result<_>>()?,
        )),
        ("prefix", [prefix]) => Ok(PatternSpec::Prefix(name_arg(prefix, ast, source)?)),
        ("atom", []) => Ok(PatternSpec::Atom(None)),
        ("atom", [class]) => {
            let class = class
                .as_symbol()
                .and_then(AtomClass::from_name)
                .ok_or_else(|| invalid(ast, source, "atom class must be int, float, str, or name"))?;
            Ok(PatternSpec::Atom(Some(class)))
        }
        ("?" | "-" | "prefix" | "atom", _) => Err(invalid(
            ast,
            source,
            &format!("wrong number of arguments to [{name}]"),
        )),
        _ => Err(invalid(ast, source, &format!("unknown directive [{name}]"))),
    }
}

fn name_arg(ast: &Ast, directive: &Ast, source: &str) -> Result<Symbol> {
    ast.as_name()
        .map(Symbol::new)
        .ok_or_else(|| invalid(directive, source, "expected a name"))
}

fn invalid(ast: &Ast, source: &str, message: &str) -> Error {
    Error::invalid_pattern(ast.span().text(source), message)
}
