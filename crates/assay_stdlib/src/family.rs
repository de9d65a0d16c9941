//! Helpers for declaring rule families.
//!
//! A family declares its documentation and then registers rules whose
//! patterns are written in pattern notation:
//!
//! ```text
//! family.doco(["assert ! obj"], "refute obj")?;
//! family.rewrite("(call nil assert (call ? !))", "refute obj", |_, c| {
//!     Some(Expr::send("refute", [c.get(0)?.clone()]))
//! })?;
//! ```

use assay_engine::{Captures, Pattern, RewriteOutcome, RuleTable};
use assay_foundation::{Atom, Expr, Node, Result, Symbol};

// =============================================================================
// Polarity
// =============================================================================

/// Positive (`assert`/`must`) or negative (`refute`/`wont`) form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// `assert_*` / `must_*`.
    Positive,
    /// `refute_*` / `wont_*`.
    Negative,
}

impl Polarity {
    /// Both polarities, positive first.
    pub const BOTH: [Self; 2] = [Self::Positive, Self::Negative];

    /// Returns the opposite polarity.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }

    /// Returns the flipped polarity when `flips` is set.
    #[must_use]
    pub const fn flip_if(self, flips: bool) -> Self {
        if flips { self.flip() } else { self }
    }

    /// Returns `assert` or `refute`.
    #[must_use]
    pub const fn assertion(self) -> &'static str {
        match self {
            Self::Positive => "assert",
            Self::Negative => "refute",
        }
    }

    /// Returns `must` or `wont`.
    #[must_use]
    pub const fn expectation(self) -> &'static str {
        match self {
            Self::Positive => "must",
            Self::Negative => "wont",
        }
    }
}

// =============================================================================
// Family Builder
// =============================================================================

/// Declares documentation and registers rules into a table.
pub struct Family<'t> {
    table: &'t mut RuleTable,
}

impl<'t> Family<'t> {
    /// Creates a builder over `table`.
    pub fn new(table: &'t mut RuleTable) -> Self {
        Self { table }
    }

    /// Declares that each of `befores` becomes `after`.
    ///
    /// # Errors
    /// Returns a duplicate doco error if a before-form is already declared.
    pub fn doco<S: Into<String>>(
        &mut self,
        befores: impl IntoIterator<Item = S>,
        after: &str,
    ) -> Result<()> {
        self.table.doco_mut().declare(befores, after)
    }

    /// Registers a rewriting rule. The rule declines when `rewrite` returns
    /// `None`.
    ///
    /// # Errors
    /// Returns an error if the pattern is malformed or `message` is not
    /// documented.
    pub fn rewrite<F>(&mut self, pattern: &str, message: &str, rewrite: F) -> Result<()>
    where
        F: Fn(&Expr, &Captures) -> Option<Expr> + Send + Sync + 'static,
    {
        let pattern = Pattern::parse(pattern)?;
        self.table.register(pattern, message, move |expr, captures| {
            rewrite(expr, captures).map_or(RewriteOutcome::Decline, RewriteOutcome::Replace)
        })
    }

    /// Registers a rule that stops analysis with a warning.
    ///
    /// # Errors
    /// Returns an error if the pattern is malformed or `message` is not
    /// documented.
    pub fn stop(&mut self, pattern: &str, message: &str) -> Result<()> {
        let pattern = Pattern::parse(pattern)?;
        self.table
            .register(pattern, message, |_, _| RewriteOutcome::Stop)
    }
}

// =============================================================================
// Tree Helpers
// =============================================================================

/// `(lit :name)`
pub fn sym(name: &Symbol) -> Node {
    Expr::sym(name.clone()).into()
}

/// `_(subject).name(args...)`
pub fn expect(subject: Node, name: &str, args: impl IntoIterator<Item = Node>) -> Expr {
    Expr::call(Expr::send("_", [subject]), name, args)
}

/// `_ { body... }`
pub fn block(body: impl IntoIterator<Item = Node>) -> Expr {
    let head = [Node::from(Expr::send("_", [])), Node::Atom(Atom::Int(0))];
    Expr::new("iter", head.into_iter().chain(body))
}

/// Builds `(const A)`, `(colon2 (const A) B)`, ... from `"A::B"`.
///
/// Returns `None` unless every segment is a constant name.
pub fn const_path(path: &str) -> Option<Expr> {
    let mut segments = path.split("::");
    let first = segments.next().filter(|s| is_const_name(s))?;
    segments.try_fold(Expr::new("const", [Node::name(first)]), |base, segment| {
        is_const_name(segment).then(|| Expr::new("colon2", [base.into(), Node::name(segment)]))
    })
}

fn is_const_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
