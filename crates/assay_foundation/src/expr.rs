//! Immutable labeled expression trees.
//!
//! An [`Expr`] is a kind label plus an ordered list of children. Each child
//! is either a nested expression or an [`Atom`]. Trees follow the shape of
//! Ruby s-expressions:
//!
//! ```text
//! (call nil assert_equal (lit 0) (call (call nil obj) length))
//! ```
//!
//! Children are stored in a persistent vector, so cloning a tree and
//! building a rewritten copy share structure with the original.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;

// =============================================================================
// Atom
// =============================================================================

/// A leaf value inside an expression.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Atom {
    /// The nil marker (for example, an absent call receiver).
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String contents.
    Str(Arc<str>),
    /// Method or identifier name.
    Name(Symbol),
}

impl Atom {
    /// Creates a name atom.
    #[must_use]
    pub fn name(name: impl Into<Symbol>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a string atom.
    #[must_use]
    pub fn str(s: impl AsRef<str>) -> Self {
        Self::Str(Arc::from(s.as_ref()))
    }

    /// Returns true if this atom is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Attempts to extract a name.
    #[must_use]
    pub const fn as_name(&self) -> Option<&Symbol> {
        match self {
            Self::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract string contents.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }
}

// Floats compare by bit pattern so atoms can key hash sets
impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Name(a), Self::Name(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(n) => n.to_bits().hash(state),
            Self::Str(s) => s.hash(state),
            Self::Name(s) => s.hash(state),
        }
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Tree notation: the form the reader accepts back.
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::Str(s) => write!(f, "{:?}", &**s),
            Self::Name(s) if is_bare_name(s.as_str()) => write!(f, "{s}"),
            Self::Name(s) => write!(f, ":{s}"),
        }
    }
}

/// Returns true if `name` reads back as a name when written without a colon.
fn is_bare_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let starts = first.is_alphabetic() || "_+-*/!?<>=&%$^@~|".contains(first);
    let numeric = (first == '-' || first == '+')
        && name[1..].chars().next().is_some_and(|c| c.is_ascii_digit());
    starts
        && !numeric
        && !matches!(name, "nil" | "true" | "false")
        && chars.all(|c| c.is_alphanumeric() || "_+-*/!?<>=&%$^@~|.:".contains(c))
}

impl From<bool> for Atom {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Atom {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Atom {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<Symbol> for Atom {
    fn from(s: Symbol) -> Self {
        Self::Name(s)
    }
}

// =============================================================================
// Node
// =============================================================================

/// A child of an expression: either a nested expression or an atom.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// A nested expression.
    Expr(Expr),
    /// A leaf value.
    Atom(Atom),
}

impl Node {
    /// The nil atom.
    #[must_use]
    pub const fn nil() -> Self {
        Self::Atom(Atom::Nil)
    }

    /// A name atom.
    #[must_use]
    pub fn name(name: impl Into<Symbol>) -> Self {
        Self::Atom(Atom::name(name))
    }

    /// Returns the nested expression, if this is one.
    #[must_use]
    pub const fn as_expr(&self) -> Option<&Expr> {
        match self {
            Self::Expr(e) => Some(e),
            Self::Atom(_) => None,
        }
    }

    /// Returns the atom, if this is one.
    #[must_use]
    pub const fn as_atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(a) => Some(a),
            Self::Expr(_) => None,
        }
    }

    /// Returns the name, if this is a name atom.
    #[must_use]
    pub const fn as_name(&self) -> Option<&Symbol> {
        match self {
            Self::Atom(a) => a.as_name(),
            Self::Expr(_) => None,
        }
    }

    /// Returns true if this is the nil atom.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Atom(Atom::Nil))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(e) => fmt::Display::fmt(e, f),
            Self::Atom(a) => fmt::Display::fmt(a, f),
        }
    }
}

impl From<Expr> for Node {
    fn from(e: Expr) -> Self {
        Self::Expr(e)
    }
}

impl From<Atom> for Node {
    fn from(a: Atom) -> Self {
        Self::Atom(a)
    }
}

impl From<Symbol> for Node {
    fn from(s: Symbol) -> Self {
        Self::Atom(Atom::Name(s))
    }
}

// =============================================================================
// Expr
// =============================================================================

/// An immutable labeled tree node.
///
/// Equality is deep structural equality, and hashing agrees with it, so
/// expressions can be used as map keys when recording rewrite traces.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Expr {
    kind: Symbol,
    children: im::Vector<Node>,
}

impl Expr {
    /// Creates an expression from a kind and children.
    #[must_use]
    pub fn new(kind: impl Into<Symbol>, children: impl IntoIterator<Item = Node>) -> Self {
        Self {
            kind: kind.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Creates a childless expression such as `(true)` or `(array)`.
    #[must_use]
    pub fn leaf(kind: impl Into<Symbol>) -> Self {
        Self {
            kind: kind.into(),
            children: im::Vector::new(),
        }
    }

    /// Creates a method call: `(call RECV NAME ARGS...)`.
    #[must_use]
    pub fn call(
        receiver: impl Into<Node>,
        name: impl Into<Symbol>,
        args: impl IntoIterator<Item = Node>,
    ) -> Self {
        let mut children = im::Vector::new();
        children.push_back(receiver.into());
        children.push_back(Node::name(name));
        children.extend(args);
        Self {
            kind: Symbol::new("call"),
            children,
        }
    }

    /// Creates a receiverless call: `(call nil NAME ARGS...)`.
    #[must_use]
    pub fn send(name: impl Into<Symbol>, args: impl IntoIterator<Item = Node>) -> Self {
        Self::call(Node::nil(), name, args)
    }

    /// Creates a literal: `(lit VALUE)`.
    #[must_use]
    pub fn lit(value: impl Into<Atom>) -> Self {
        Self::new("lit", [Node::Atom(value.into())])
    }

    /// Creates a symbol literal: `(lit name)`.
    #[must_use]
    pub fn sym(name: impl Into<Symbol>) -> Self {
        Self::lit(Atom::name(name))
    }

    /// Creates a string literal: `(str "text")`.
    #[must_use]
    pub fn str(text: impl AsRef<str>) -> Self {
        Self::new("str", [Node::Atom(Atom::str(text))])
    }

    /// Returns the kind label.
    #[must_use]
    pub const fn kind(&self) -> &Symbol {
        &self.kind
    }

    /// Returns true if the kind label equals `kind`.
    #[must_use]
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Returns the children in order.
    #[must_use]
    pub const fn children(&self) -> &im::Vector<Node> {
        &self.children
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the receiver of a `call` node.
    #[must_use]
    pub fn receiver(&self) -> Option<&Node> {
        if self.is("call") { self.child(0) } else { None }
    }

    /// Returns the method name of a `call` node.
    #[must_use]
    pub fn method(&self) -> Option<&Symbol> {
        if self.is("call") {
            self.child(1).and_then(Node::as_name)
        } else {
            None
        }
    }

    /// Returns the arguments of a `call` node (everything after the name).
    pub fn args(&self) -> impl Iterator<Item = &Node> {
        let skip = if self.is("call") { 2 } else { self.len() };
        self.children.iter().skip(skip)
    }

    /// Returns the children from `start` onward.
    pub fn children_from(&self, start: usize) -> impl Iterator<Item = &Node> {
        self.children.iter().skip(start)
    }

    /// Returns a copy with a different kind and the same children.
    #[must_use]
    pub fn with_kind(&self, kind: impl Into<Symbol>) -> Self {
        Self {
            kind: kind.into(),
            children: self.children.clone(),
        }
    }

    /// Returns a copy with the child at `index` replaced.
    ///
    /// Returns an unchanged copy if `index` is out of bounds.
    #[must_use]
    pub fn with_child(&self, index: usize, child: impl Into<Node>) -> Self {
        let mut children = self.children.clone();
        if index < children.len() {
            children.set(index, child.into());
        }
        Self {
            kind: self.kind.clone(),
            children,
        }
    }

    /// Returns a copy keeping only the first `len` children.
    #[must_use]
    pub fn truncated(&self, len: usize) -> Self {
        let mut children = self.children.clone();
        if len < children.len() {
            children.truncate(len);
        }
        Self {
            kind: self.kind.clone(),
            children,
        }
    }

    /// Counts expression nodes in the tree, including this one.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|c| c.as_expr().map_or(0, Expr::size))
            .sum::<usize>()
    }

    /// Returns the nesting depth of the tree (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .filter_map(Node::as_expr)
            .map(Expr::depth)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Tree notation: `(kind child child ...)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.kind)?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        write!(f, ")")
    }
}
