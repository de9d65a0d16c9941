//! Rewrite traces.
//!
//! A [`Trace`] records, for one analysis call, each expression that a rule
//! fired on together with that rule's message. Steps are kept in discovery
//! order and every recorded expression is structurally distinct from the
//! others; recording a repeat is refused.

pub mod format;

pub use format::{PlainFormatter, SourceFormatter, TraceFormatter};

use std::collections::HashSet;

use assay_foundation::{Error, Expr, Printer, PrintConfig, Result};

/// One recorded rewrite step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    /// The expression before the rule fired.
    pub expr: Expr,
    /// The message of the rule that fired.
    pub message: String,
}

/// Ordered, duplicate-free record of the steps of one analysis call.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    steps: Vec<TraceStep>,
    seen: HashSet<Expr>,
}

impl Trace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `expr` is already recorded.
    #[must_use]
    pub fn contains(&self, expr: &Expr) -> bool {
        self.seen.contains(expr)
    }

    /// Appends a step.
    ///
    /// # Errors
    /// Returns a duplicate rewrite error, leaving the trace unchanged, if
    /// `expr` is already recorded.
    pub fn record(&mut self, expr: Expr, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        if self.seen.contains(&expr) {
            let printed = Printer::new(PrintConfig::new()).print(&expr);
            return Err(Error::duplicate_rewrite(printed, message));
        }
        self.seen.insert(expr.clone());
        self.steps.push(TraceStep { expr, message });
        Ok(())
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the steps in discovery order.
    #[must_use]
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Iterates the steps in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceStep> {
        self.steps.iter()
    }

    /// Iterates the recorded messages in discovery order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.message.as_str())
    }

    /// Returns the step at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TraceStep> {
        self.steps.get(index)
    }
}

impl PartialEq for Trace {
    fn eq(&self, other: &Self) -> bool {
        self.steps == other.steps
    }
}

impl Eq for Trace {}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceStep;
    type IntoIter = std::slice::Iter<'a, TraceStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
