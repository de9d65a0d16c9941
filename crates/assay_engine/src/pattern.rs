//! Structural pattern matching over expression trees.
//!
//! Patterns start life as plain data ([`PatternSpec`]), usually read from
//! pattern notation by [`syntax::parse_pattern`]:
//!
//! ```text
//! (call nil assert_equal (lit 0) (call ? [m length size count]))
//! ```
//!
//! [`PatternCompiler`] validates a spec once and produces an immutable
//! [`Pattern`]; [`PatternMatcher`] runs it against trees and collects
//! [`Captures`] for rule handlers.

pub mod syntax;

pub use syntax::parse_pattern;

use std::fmt;

use assay_foundation::{Atom, Error, Expr, Node, Result, Symbol};

// =============================================================================
// Pattern Spec
// =============================================================================

/// Class of atom accepted by an `[atom CLASS]` directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AtomClass {
    /// Integers.
    Int,
    /// Floats.
    Float,
    /// Strings.
    Str,
    /// Names.
    Name,
}

impl AtomClass {
    /// Parses a class from its notation name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "str" => Some(Self::Str),
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    /// Returns the notation name of this class.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Name => "name",
        }
    }

    /// Returns true if `atom` belongs to this class.
    #[must_use]
    pub const fn accepts(self, atom: &Atom) -> bool {
        matches!(
            (self, atom),
            (Self::Int, Atom::Int(_))
                | (Self::Float, Atom::Float(_))
                | (Self::Str, Atom::Str(_))
                | (Self::Name, Atom::Name(_))
        )
    }
}

/// Declarative, uncompiled pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternSpec {
    /// Any single child.
    Any,
    /// Any remaining children. Only valid last in a children list.
    Rest,
    /// Binds whatever the inner pattern matched.
    Capture(Box<PatternSpec>),
    /// The first alternative that matches.
    Either(Vec<PatternSpec>),
    /// A name in the whitelist.
    OneOf(Vec<Symbol>),
    /// A name starting with the prefix.
    Prefix(Symbol),
    /// Succeeds when the inner pattern fails.
    Not(Box<PatternSpec>),
    /// Any atom, or any atom of a class.
    Atom(Option<AtomClass>),
    /// Exactly this atom.
    Literal(Atom),
    /// A node whose kind and children match positionally.
    Node {
        /// Pattern for the kind label.
        kind: Box<PatternSpec>,
        /// Patterns for the children.
        children: Vec<PatternSpec>,
    },
}

impl PatternSpec {
    /// A node pattern.
    #[must_use]
    pub fn node(kind: impl Into<Self>, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Node {
            kind: Box::new(kind.into()),
            children: children.into_iter().collect(),
        }
    }

    /// A call pattern: `(call RECV NAME ARGS...)`.
    #[must_use]
    pub fn call(
        receiver: impl Into<Self>,
        name: impl Into<Self>,
        args: impl IntoIterator<Item = Self>,
    ) -> Self {
        let children = [receiver.into(), name.into()].into_iter().chain(args);
        Self::node("call", children)
    }

    /// A literal name.
    #[must_use]
    pub fn name(name: impl Into<Symbol>) -> Self {
        Self::Literal(Atom::Name(name.into()))
    }

    /// The nil atom.
    #[must_use]
    pub const fn nil() -> Self {
        Self::Literal(Atom::Nil)
    }

    /// Captures `inner`.
    #[must_use]
    pub fn capture(inner: Self) -> Self {
        Self::Capture(Box::new(inner))
    }

    /// Captures any child (`?`).
    #[must_use]
    pub fn capture_any() -> Self {
        Self::capture(Self::Any)
    }

    /// Negates `inner`.
    #[must_use]
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Alternation over `alternatives`.
    #[must_use]
    pub fn either(alternatives: impl IntoIterator<Item = Self>) -> Self {
        Self::Either(alternatives.into_iter().collect())
    }

    /// Name whitelist.
    #[must_use]
    pub fn one_of<S: Into<Symbol>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::OneOf(names.into_iter().map(Into::into).collect())
    }

    /// Name prefix.
    #[must_use]
    pub fn prefix(prefix: impl Into<Symbol>) -> Self {
        Self::Prefix(prefix.into())
    }
}

/// String slices convert to literal names.
impl From<&str> for PatternSpec {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("_"),
            Self::Rest => f.write_str("___"),
            Self::Capture(inner) if **inner == Self::Any => f.write_str("?"),
            Self::Capture(inner) => write!(f, "[? {inner}]"),
            Self::Either(alts) => {
                f.write_str("[any")?;
                for alt in alts {
                    write!(f, " {alt}")?;
                }
                f.write_str("]")
            }
            Self::OneOf(names) => {
                f.write_str("[m")?;
                for name in names {
                    write!(f, " {}", NameLiteral(name))?;
                }
                f.write_str("]")
            }
            Self::Prefix(prefix) => write!(f, "[prefix {}]", NameLiteral(prefix)),
            Self::Not(inner) => write!(f, "[- {inner}]"),
            Self::Atom(None) => f.write_str("[atom]"),
            Self::Atom(Some(class)) => write!(f, "[atom {}]", class.name()),
            Self::Literal(Atom::Name(name)) => write!(f, "{}", NameLiteral(name)),
            Self::Literal(atom) => write!(f, "{atom}"),
            Self::Node { kind, children } => {
                write!(f, "({kind}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A name as written in pattern notation, quoting names that would read back
/// as wildcards.
struct NameLiteral<'a>(&'a Symbol);

impl fmt::Display for NameLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_str() {
            "_" | "___" | "?" => write!(f, ":{}", self.0),
            _ => write!(f, "{}", Atom::Name(self.0.clone())),
        }
    }
}

// =============================================================================
// Compiled Pattern
// =============================================================================

/// Compiled matcher for a node's kind label.
#[derive(Clone, Debug, PartialEq)]
pub enum KindPattern {
    /// Any kind.
    Any,
    /// Exactly this kind.
    Exact(Symbol),
    /// A kind in the whitelist.
    OneOf(Vec<Symbol>),
    /// A kind starting with the prefix.
    Prefix(Symbol),
    /// The first alternative that matches.
    Either(Vec<KindPattern>),
    /// Succeeds when the inner pattern fails.
    Not(Box<KindPattern>),
}

impl KindPattern {
    /// Returns true if `kind` satisfies this pattern.
    #[must_use]
    pub fn accepts(&self, kind: &Symbol) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == kind,
            Self::OneOf(names) => names.contains(kind),
            Self::Prefix(prefix) => kind.starts_with(prefix.as_str()),
            Self::Either(alts) => alts.iter().any(|alt| alt.accepts(kind)),
            Self::Not(inner) => !inner.accepts(kind),
        }
    }

    fn to_spec(&self) -> PatternSpec {
        match self {
            Self::Any => PatternSpec::Any,
            Self::Exact(name) => PatternSpec::name(name.clone()),
            Self::OneOf(names) => PatternSpec::OneOf(names.clone()),
            Self::Prefix(prefix) => PatternSpec::Prefix(prefix.clone()),
            Self::Either(alts) => PatternSpec::Either(alts.iter().map(Self::to_spec).collect()),
            Self::Not(inner) => PatternSpec::not(inner.to_spec()),
        }
    }
}

/// A compiled, immutable pattern.
///
/// Compiled patterns compare structurally, so compiling the same spec twice
/// yields equal patterns.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Any single child.
    Any,
    /// Binds whatever the inner pattern matched.
    Capture(Box<Pattern>),
    /// The first alternative that matches.
    Either(Vec<Pattern>),
    /// A name atom in the whitelist.
    OneOf(Vec<Symbol>),
    /// A name atom starting with the prefix.
    Prefix(Symbol),
    /// Succeeds when the inner pattern fails.
    Not(Box<Pattern>),
    /// Any atom, or any atom of a class.
    Atom(Option<AtomClass>),
    /// Exactly this atom.
    Literal(Atom),
    /// A node.
    Node {
        /// Kind label matcher.
        kind: KindPattern,
        /// Positional child matchers.
        children: Vec<Pattern>,
        /// Whether extra trailing children are allowed.
        rest: bool,
    },
}

impl Pattern {
    /// Reads and compiles a pattern from notation.
    ///
    /// # Errors
    /// Returns a parse error for malformed notation or an invalid pattern
    /// error for a spec that fails validation.
    pub fn parse(source: &str) -> Result<Self> {
        PatternCompiler::compile(&parse_pattern(source)?)
    }

    /// Converts back to a declarative spec.
    #[must_use]
    pub fn to_spec(&self) -> PatternSpec {
        match self {
            Self::Any => PatternSpec::Any,
            Self::Capture(inner) => PatternSpec::capture(inner.to_spec()),
            Self::Either(alts) => PatternSpec::Either(alts.iter().map(Self::to_spec).collect()),
            Self::OneOf(names) => PatternSpec::OneOf(names.clone()),
            Self::Prefix(prefix) => PatternSpec::Prefix(prefix.clone()),
            Self::Not(inner) => PatternSpec::not(inner.to_spec()),
            Self::Atom(class) => PatternSpec::Atom(*class),
            Self::Literal(atom) => PatternSpec::Literal(atom.clone()),
            Self::Node {
                kind,
                children,
                rest,
            } => {
                let mut specs: Vec<PatternSpec> = children.iter().map(Self::to_spec).collect();
                if *rest {
                    specs.push(PatternSpec::Rest);
                }
                PatternSpec::Node {
                    kind: Box::new(kind.to_spec()),
                    children: specs,
                }
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_spec(), f)
    }
}

// =============================================================================
// Pattern Compiler
// =============================================================================

/// Validates pattern specs and compiles them into [`Pattern`]s.
pub struct PatternCompiler;

impl PatternCompiler {
    /// Compiles a top-level spec, which must be a node pattern.
    ///
    /// # Errors
    /// Returns an invalid pattern error if the spec is not a node, or if any
    /// part of it fails validation.
    pub fn compile(spec: &PatternSpec) -> Result<Pattern> {
        if !matches!(spec, PatternSpec::Node { .. }) {
            return Err(Self::invalid(spec, "top-level pattern must be a node"));
        }
        Self::compile_child(spec, spec)
    }

    fn compile_child(spec: &PatternSpec, root: &PatternSpec) -> Result<Pattern> {
        Ok(match spec {
            PatternSpec::Any => Pattern::Any,
            PatternSpec::Rest => {
                return Err(Self::invalid(root, "rest may only end a children list"));
            }
            PatternSpec::Capture(inner) => {
                if matches!(**inner, PatternSpec::Rest) {
                    return Err(Self::invalid(root, "rest cannot be captured"));
                }
                Pattern::Capture(Box::new(Self::compile_child(inner, root)?))
            }
            PatternSpec::Either(alts) => {
                if alts.is_empty() {
                    return Err(Self::invalid(root, "[any] needs at least one alternative"));
                }
                Pattern::Either(
                    alts.iter()
                        .map(|alt| Self::compile_child(alt, root))
                        .collect::<Result<_>>()?,
                )
            }
            PatternSpec::OneOf(names) => {
                if names.is_empty() {
                    return Err(Self::invalid(root, "[m] needs at least one name"));
                }
                Pattern::OneOf(names.clone())
            }
            PatternSpec::Prefix(prefix) => Pattern::Prefix(prefix.clone()),
            PatternSpec::Not(inner) => Pattern::Not(Box::new(Self::compile_child(inner, root)?)),
            PatternSpec::Atom(class) => Pattern::Atom(*class),
            PatternSpec::Literal(atom) => Pattern::Literal(atom.clone()),
            PatternSpec::Node { kind, children } => {
                let kind = Self::compile_kind(kind, root)?;
                let (rest, positional) = match children.split_last() {
                    Some((PatternSpec::Rest, init)) => (true, init),
                    _ => (false, children.as_slice()),
                };
                Pattern::Node {
                    kind,
                    children: positional
                        .iter()
                        .map(|child| Self::compile_child(child, root))
                        .collect::<Result<_>>()?,
                    rest,
                }
            }
        })
    }

    fn compile_kind(spec: &PatternSpec, root: &PatternSpec) -> Result<KindPattern> {
        Ok(match spec {
            PatternSpec::Any => KindPattern::Any,
            PatternSpec::Literal(Atom::Name(name)) => KindPattern::Exact(name.clone()),
            PatternSpec::Literal(Atom::Nil) => KindPattern::Exact(Symbol::new("nil")),
            PatternSpec::Literal(Atom::Bool(b)) => KindPattern::Exact(Symbol::new(b.to_string())),
            PatternSpec::OneOf(names) => {
                if names.is_empty() {
                    return Err(Self::invalid(root, "[m] needs at least one name"));
                }
                KindPattern::OneOf(names.clone())
            }
            PatternSpec::Prefix(prefix) => KindPattern::Prefix(prefix.clone()),
            PatternSpec::Either(alts) => {
                if alts.is_empty() {
                    return Err(Self::invalid(root, "[any] needs at least one alternative"));
                }
                KindPattern::Either(
                    alts.iter()
                        .map(|alt| Self::compile_kind(alt, root))
                        .collect::<Result<_>>()?,
                )
            }
            PatternSpec::Not(inner) => KindPattern::Not(Box::new(Self::compile_kind(inner, root)?)),
            other => {
                return Err(Self::invalid(
                    root,
                    format!("{other} cannot appear in kind position"),
                ));
            }
        })
    }

    fn invalid(root: &PatternSpec, message: impl Into<String>) -> Error {
        Error::invalid_pattern(root.to_string(), message)
    }
}

// =============================================================================
// Captures
// =============================================================================

/// Children bound by capture patterns, in pre-order left-to-right order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Captures(Vec<Node>);

impl Captures {
    /// Creates an empty capture list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the capture at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.0.get(index)
    }

    /// Returns the capture at `index` if it is an expression.
    #[must_use]
    pub fn expr(&self, index: usize) -> Option<&Expr> {
        self.get(index).and_then(Node::as_expr)
    }

    /// Returns the capture at `index` if it is a name atom.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&Symbol> {
        self.get(index).and_then(Node::as_name)
    }

    /// Iterates the captures in order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.0.iter()
    }

    /// Returns the captures as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Node] {
        &self.0
    }

    /// Consumes the list, returning the captured nodes.
    #[must_use]
    pub fn into_vec(self) -> Vec<Node> {
        self.0
    }
}

// =============================================================================
// Pattern Matcher
// =============================================================================

/// Runs compiled patterns against expression trees.
pub struct PatternMatcher;

#[derive(Clone, Copy)]
enum Subject<'a> {
    Expr(&'a Expr),
    Atom(&'a Atom),
}

impl<'a> Subject<'a> {
    const fn of(node: &'a Node) -> Self {
        match node {
            Node::Expr(e) => Self::Expr(e),
            Node::Atom(a) => Self::Atom(a),
        }
    }

    fn to_node(self) -> Node {
        match self {
            Self::Expr(e) => Node::Expr(e.clone()),
            Self::Atom(a) => Node::Atom(a.clone()),
        }
    }

    const fn name(self) -> Option<&'a Symbol> {
        match self {
            Self::Atom(Atom::Name(name)) => Some(name),
            _ => None,
        }
    }
}

impl PatternMatcher {
    /// Matches `expr` against `pattern`, returning the captures on success.
    #[must_use]
    pub fn match_expr(pattern: &Pattern, expr: &Expr) -> Option<Captures> {
        let mut captures = Vec::new();
        Self::match_subject(pattern, Subject::Expr(expr), &mut captures)
            .then_some(Captures(captures))
    }

    /// Matches a single child node against `pattern`.
    #[must_use]
    pub fn match_node(pattern: &Pattern, node: &Node) -> Option<Captures> {
        let mut captures = Vec::new();
        Self::match_subject(pattern, Subject::of(node), &mut captures)
            .then_some(Captures(captures))
    }

    /// Returns true if `expr` matches `pattern`.
    #[must_use]
    pub fn matches(pattern: &Pattern, expr: &Expr) -> bool {
        Self::match_expr(pattern, expr).is_some()
    }

    /// On failure `captures` may hold partial bindings; callers that keep
    /// going after a failure truncate back to their mark.
    fn match_subject(pattern: &Pattern, subject: Subject<'_>, captures: &mut Vec<Node>) -> bool {
        match pattern {
            Pattern::Any => true,
            Pattern::Capture(inner) => {
                let at = captures.len();
                if Self::match_subject(inner, subject, captures) {
                    captures.insert(at, subject.to_node());
                    true
                } else {
                    false
                }
            }
            Pattern::Either(alts) => {
                let mark = captures.len();
                for alt in alts {
                    if Self::match_subject(alt, subject, captures) {
                        return true;
                    }
                    captures.truncate(mark);
                }
                false
            }
            Pattern::OneOf(names) => subject.name().is_some_and(|n| names.contains(n)),
            Pattern::Prefix(prefix) => subject
                .name()
                .is_some_and(|n| n.starts_with(prefix.as_str())),
            Pattern::Not(inner) => {
                let mark = captures.len();
                let matched = Self::match_subject(inner, subject, captures);
                captures.truncate(mark);
                !matched
            }
            Pattern::Atom(class) => match subject {
                Subject::Atom(atom) => class.is_none_or(|c| c.accepts(atom)),
                Subject::Expr(_) => false,
            },
            Pattern::Literal(expected) => {
                matches!(subject, Subject::Atom(atom) if atom == expected)
            }
            Pattern::Node {
                kind,
                children,
                rest,
            } => {
                let Subject::Expr(expr) = subject else {
                    return false;
                };
                let arity_ok = if *rest {
                    expr.len() >= children.len()
                } else {
                    expr.len() == children.len()
                };
                arity_ok
                    && kind.accepts(expr.kind())
                    && children.iter().zip(expr.children().iter()).all(|(p, child)| {
                        Self::match_subject(p, Subject::of(child), captures)
                    })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
