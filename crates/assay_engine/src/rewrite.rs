//! The fixed-point rewrite engine.
//!
//! [`RewriteEngine::analyze`] drives one top-level expression to a terminal
//! state. Each step asks the [`RuleTable`] for the first rule that fires:
//!
//! - a replacement records the current expression and continues from the
//!   replacement;
//! - a stop records the current expression and ends with a warning;
//! - no match ends the call, and the current expression is the normal form.
//!
//! Revisiting an expression already recorded in the trace faults the call, as
//! does exceeding the rewrite ceiling. A fault affects only that call.

use std::fmt;

use assay_foundation::{Error, Expr, Result, SemanticLimit};

use crate::rule::RuleTable;
use crate::trace::{SourceFormatter, Trace, TraceFormatter};

/// Default ceiling on rewrites within one call.
pub const DEFAULT_MAX_REWRITES: usize = 64;

/// Why an analysis stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// No rule matched the final expression.
    NoMatch,
    /// A rule stopped analysis with a warning.
    Warning,
}

impl StopReason {
    /// Returns the reason as a lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoMatch => "no-match",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one analysis call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    /// The expression analysis started from.
    pub input: Expr,
    /// The expression analysis ended on.
    pub output: Expr,
    /// The recorded steps.
    pub trace: Trace,
    /// Why analysis ended.
    pub stop: StopReason,
    /// The rendered trace, one line per step.
    pub lines: Vec<String>,
}

impl Analysis {
    /// Returns true if no rule fired.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.trace.is_empty()
    }
}

/// Runs analysis calls against a borrowed rule table.
pub struct RewriteEngine<'t> {
    table: &'t RuleTable,
    max_rewrites: usize,
    formatter: Box<dyn TraceFormatter + 't>,
}

impl<'t> RewriteEngine<'t> {
    /// Creates an engine with the default ceiling and source formatter.
    #[must_use]
    pub fn new(table: &'t RuleTable) -> Self {
        Self {
            table,
            max_rewrites: DEFAULT_MAX_REWRITES,
            formatter: Box::new(SourceFormatter::new()),
        }
    }

    /// Builder method to set the rewrite ceiling.
    #[must_use]
    pub fn with_max_rewrites(mut self, max: usize) -> Self {
        self.max_rewrites = max;
        self
    }

    /// Builder method to set the trace formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl TraceFormatter + 't) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Returns the rule table.
    #[must_use]
    pub const fn table(&self) -> &'t RuleTable {
        self.table
    }

    /// Returns the rewrite ceiling.
    #[must_use]
    pub const fn max_rewrites(&self) -> usize {
        self.max_rewrites
    }

    /// Analyzes one expression to a terminal state.
    ///
    /// # Errors
    /// Returns a duplicate rewrite error if a rule rewrites back to an
    /// expression already in the trace, or a limit error if more than the
    /// ceiling of rewrites happen.
    pub fn analyze(&self, expr: &Expr) -> Result<Analysis> {
        let mut trace = Trace::new();
        let mut current = expr.clone();
        let mut rewrites = 0usize;

        let stop = loop {
            let Some(firing) = self.table.find_first_match(&current) else {
                break StopReason::NoMatch;
            };
            let message = firing.rule.message();

            let Some(next) = firing.replacement else {
                tracing::debug!(order = firing.rule.order(), rule = message, "stop");
                trace.record(current.clone(), message)?;
                break StopReason::Warning;
            };

            if rewrites == self.max_rewrites {
                return Err(Error::limit_exceeded(SemanticLimit::MaxRewrites {
                    limit: self.max_rewrites,
                    context: Some(message.to_string()),
                }));
            }
            tracing::debug!(order = firing.rule.order(), rule = message, "rewrite");
            trace.record(current, message)?;
            current = next;
            rewrites += 1;
        };

        let lines = self.formatter.format_lines(&trace);
        Ok(Analysis {
            input: expr.clone(),
            output: current,
            trace,
            stop,
            lines,
        })
    }

    /// Analyzes each expression independently; a fault in one does not
    /// affect the others.
    pub fn analyze_all<'e>(
        &self,
        exprs: impl IntoIterator<Item = &'e Expr>,
    ) -> Vec<Result<Analysis>> {
        exprs.into_iter().map(|e| self.analyze(e)).collect()
    }
}

impl fmt::Debug for RewriteEngine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteEngine")
            .field("rules", &self.table.len())
            .field("max_rewrites", &self.max_rewrites)
            .finish_non_exhaustive()
    }
}
