//! Ruby-flavored source rendering of expression trees.
//!
//! The printer turns trees back into the call syntax a reader of the test
//! suite would recognize:
//!
//! ```text
//! (call nil assert_includes (array (lit 1) (lit 2)) (call nil b))
//! => assert_includes([1, 2], b)
//! ```
//!
//! Shapes the printer does not know fall back to tree notation, so printing
//! never fails.

use std::fmt;

use crate::expr::{Atom, Expr, Node};

/// Method names printed infix, as `(lhs op rhs)`.
pub const BINARY_OPERATORS: &[&str] = &[
    "==", "!=", "<", ">", "<=", ">=", "+", "-", "*", "/", "%", "=~", "!~", "===", "<=>", "<<",
    ">>", "&", "|", "^", "**",
];

/// Rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintConfig {
    /// Maximum number of characters shown from a string literal.
    pub string_limit: Option<usize>,
}

impl PrintConfig {
    /// String prefix length used when rendering trace lines.
    pub const TRACE_STRING_LIMIT: usize = 20;

    /// Creates a config that prints strings in full.
    #[must_use]
    pub const fn new() -> Self {
        Self { string_limit: None }
    }

    /// The config used for trace lines.
    #[must_use]
    pub const fn trace() -> Self {
        Self {
            string_limit: Some(Self::TRACE_STRING_LIMIT),
        }
    }

    /// Sets the string literal limit.
    #[must_use]
    pub const fn with_string_limit(mut self, limit: usize) -> Self {
        self.string_limit = Some(limit);
        self
    }
}

/// Prints expression trees as Ruby source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    config: PrintConfig,
}

impl Printer {
    /// Creates a printer with the given config.
    #[must_use]
    pub const fn new(config: PrintConfig) -> Self {
        Self { config }
    }

    /// Returns the printer's config.
    #[must_use]
    pub const fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// Renders an expression.
    #[must_use]
    pub fn print(&self, expr: &Expr) -> String {
        Source {
            printer: self,
            node: NodeRef::Expr(expr),
        }
        .to_string()
    }

    /// Renders a single child node.
    #[must_use]
    pub fn print_node(&self, node: &Node) -> String {
        let node = match node {
            Node::Expr(e) => NodeRef::Expr(e),
            Node::Atom(a) => NodeRef::Atom(a),
        };
        Source {
            printer: self,
            node,
        }
        .to_string()
    }

    fn fmt_node(&self, node: &Node, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match node {
            Node::Expr(e) => self.fmt_expr(e, f),
            Node::Atom(a) => self.fmt_atom(a, f),
        }
    }

    fn fmt_list(&self, nodes: &[&Node], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.fmt_node(node, f)?;
        }
        Ok(())
    }

    fn fmt_atom(&self, atom: &Atom, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match atom {
            Atom::Str(s) => self.fmt_string(s, f),
            Atom::Name(s) => write!(f, "{s}"),
            other => write!(f, "{other}"),
        }
    }

    fn fmt_string(&self, s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.config.string_limit {
            Some(limit) if s.chars().count() > limit => {
                let prefix: String = s.chars().take(limit).collect();
                write!(f, "{prefix:?}")
            }
            _ => write!(f, "{s:?}"),
        }
    }

    fn fmt_expr(&self, expr: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children: Vec<&Node> = expr.children().iter().collect();
        match (expr.kind().as_str(), children.as_slice()) {
            ("call", _) => self.fmt_call(expr, f),
            ("lit", [Node::Atom(Atom::Name(name))]) => write!(f, ":{name}"),
            ("lit" | "str", [Node::Atom(atom)]) => self.fmt_atom(atom, f),
            (kind @ ("true" | "false" | "nil" | "self"), []) => f.write_str(kind),
            ("array", items) => {
                f.write_str("[")?;
                self.fmt_list(items, f)?;
                f.write_str("]")
            }
            ("hash", []) => f.write_str("{}"),
            ("hash", pairs) if pairs.len() % 2 == 0 => {
                f.write_str("{ ")?;
                for (i, pair) in pairs.chunks(2).enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    self.fmt_node(pair[0], f)?;
                    f.write_str(" => ")?;
                    self.fmt_node(pair[1], f)?;
                }
                f.write_str(" }")
            }
            ("const" | "lvar" | "ivar" | "gvar" | "cvar", [Node::Atom(Atom::Name(name))]) => {
                write!(f, "{name}")
            }
            ("colon2", [base, Node::Atom(Atom::Name(name))]) => {
                self.fmt_node(base, f)?;
                write!(f, "::{name}")
            }
            ("colon3", [Node::Atom(Atom::Name(name))]) => write!(f, "::{name}"),
            ("not", [operand]) => {
                f.write_str("!")?;
                self.fmt_node(operand, f)
            }
            (kind @ ("and" | "or"), [lhs, rhs]) => {
                let op = if kind == "and" { "&&" } else { "||" };
                f.write_str("(")?;
                self.fmt_node(lhs, f)?;
                write!(f, " {op} ")?;
                self.fmt_node(rhs, f)?;
                f.write_str(")")
            }
            (kind @ ("dot2" | "dot3"), [lo, hi]) => {
                let op = if kind == "dot2" { ".." } else { "..." };
                f.write_str("(")?;
                self.fmt_node(lo, f)?;
                f.write_str(op)?;
                self.fmt_node(hi, f)?;
                f.write_str(")")
            }
            ("block", stmts) => self.fmt_body(stmts, f),
            ("iter", [call, params, body @ ..]) => self.fmt_iter(call, params, body, f),
            _ => write!(f, "{expr}"),
        }
    }

    fn fmt_call(&self, expr: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(receiver), Some(name)) = (expr.receiver(), expr.method()) else {
            return write!(f, "{expr}");
        };
        let args: Vec<&Node> = expr.args().collect();
        let name = name.as_str();

        if receiver.is_nil() {
            f.write_str(name)?;
            return self.fmt_args(&args, f);
        }

        match (name, args.as_slice()) {
            (op, [rhs]) if BINARY_OPERATORS.contains(&op) => {
                f.write_str("(")?;
                self.fmt_node(receiver, f)?;
                write!(f, " {op} ")?;
                self.fmt_node(rhs, f)?;
                f.write_str(")")
            }
            ("!", []) => {
                f.write_str("!")?;
                self.fmt_node(receiver, f)
            }
            ("[]", index) => {
                self.fmt_node(receiver, f)?;
                f.write_str("[")?;
                self.fmt_list(index, f)?;
                f.write_str("]")
            }
            _ => {
                self.fmt_node(receiver, f)?;
                write!(f, ".{name}")?;
                self.fmt_args(&args, f)
            }
        }
    }

    fn fmt_args(&self, args: &[&Node], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if args.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        self.fmt_list(args, f)?;
        f.write_str(")")
    }

    fn fmt_body(&self, stmts: &[&Node], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in stmts.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            self.fmt_node(stmt, f)?;
        }
        Ok(())
    }

    fn fmt_iter(
        &self,
        call: &Node,
        params: &Node,
        body: &[&Node],
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let names: Vec<&Node> = params
            .as_expr()
            .filter(|p| p.is("args"))
            .map(|p| p.children().iter().collect())
            .unwrap_or_default();

        let is_lambda = call.as_expr().is_some_and(|c| c.is("lambda") && c.is_empty());
        if is_lambda {
            f.write_str("->")?;
            if !names.is_empty() {
                f.write_str("(")?;
                self.fmt_list(&names, f)?;
                f.write_str(")")?;
            }
        } else {
            self.fmt_node(call, f)?;
        }

        if body.is_empty() && names.is_empty() {
            return f.write_str(" {}");
        }
        f.write_str(" {")?;
        if !is_lambda && !names.is_empty() {
            f.write_str(" |")?;
            self.fmt_list(&names, f)?;
            f.write_str("|")?;
        }
        if !body.is_empty() {
            f.write_str(" ")?;
            self.fmt_body(body, f)?;
        }
        f.write_str(" }")
    }
}

#[derive(Clone, Copy)]
enum NodeRef<'a> {
    Expr(&'a Expr),
    Atom(&'a Atom),
}

struct Source<'a> {
    printer: &'a Printer,
    node: NodeRef<'a>,
}

impl fmt::Display for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            NodeRef::Expr(e) => self.printer.fmt_expr(e, f),
            NodeRef::Atom(a) => self.printer.fmt_atom(a, f),
        }
    }
}

/// Renders an expression with the default (untruncated) config.
#[must_use]
pub fn print(expr: &Expr) -> String {
    Printer::default().print(expr)
}
