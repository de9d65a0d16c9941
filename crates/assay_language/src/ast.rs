//! Spanned syntax tree for parsed notation.
//!
//! The AST is shared by tree notation and pattern notation. Lists become
//! expression nodes or node patterns; vectors only appear in patterns,
//! where they hold directives such as `[any ...]` and `[- P]`.

use crate::span::Span;

/// An AST node.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    /// `nil`
    Nil(Span),
    /// `true` or `false`
    Bool(bool, Span),
    /// Integer literal like `42`
    Int(i64, Span),
    /// Float literal like `2.5`
    Float(f64, Span),
    /// String literal like `"hello"`
    String(String, Span),
    /// Symbol like `call` or `include?`
    Symbol(String, Span),
    /// Keyword like `:_` or `:[]`
    Keyword(String, Span),
    /// List form like `(lit 1)`
    List(Vec<Ast>, Span),
    /// Vector form like `[m length size]`
    Vector(Vec<Ast>, Span),
}

impl Ast {
    /// Returns the source span of this AST node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Nil(s)
            | Self::Bool(_, s)
            | Self::Int(_, s)
            | Self::Float(_, s)
            | Self::String(_, s)
            | Self::Symbol(_, s)
            | Self::Keyword(_, s)
            | Self::List(_, s)
            | Self::Vector(_, s) => *s,
        }
    }

    /// Returns true if this is a nil literal.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil(_))
    }

    /// Returns true if this is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_, _))
    }

    /// Returns the elements of a list, or None if not a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Ast]> {
        match self {
            Self::List(elements, _) => Some(elements),
            _ => None,
        }
    }

    /// Returns the elements of a vector, or None if not a vector.
    #[must_use]
    pub fn as_vector(&self) -> Option<&[Ast]> {
        match self {
            Self::Vector(elements, _) => Some(elements),
            _ => None,
        }
    }

    /// Returns the symbol name, or None if not a symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name, _) => Some(name),
            _ => None,
        }
    }

    /// Returns the keyword name, or None if not a keyword.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(name, _) => Some(name),
            _ => None,
        }
    }

    /// Returns the name of a symbol or keyword.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Symbol(name, _) | Self::Keyword(name, _) => Some(name),
            _ => None,
        }
    }

    /// Returns the integer value, or None if not an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n, _) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string value, or None if not a string.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s, _) => Some(s),
            _ => None,
        }
    }

    /// A human-readable type name for this AST node.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil(_) => "nil",
            Self::Bool(_, _) => "bool",
            Self::Int(_, _) => "int",
            Self::Float(_, _) => "float",
            Self::String(_, _) => "string",
            Self::Symbol(_, _) => "symbol",
            Self::Keyword(_, _) => "keyword",
            Self::List(_, _) => "list",
            Self::Vector(_, _) => "vector",
        }
    }
}

/// Helper constructors for AST nodes (for testing).
#[cfg(test)]
impl Ast {
    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into(), Span::default())
    }

    pub fn keyword(s: impl Into<String>) -> Self {
        Self::Keyword(s.into(), Span::default())
    }

    pub fn list(elements: Vec<Ast>) -> Self {
        Self::List(elements, Span::default())
    }

    pub fn vector(elements: Vec<Ast>) -> Self {
        Self::Vector(elements, Span::default())
    }
}
