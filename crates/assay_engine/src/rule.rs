//! Ordered rule tables.
//!
//! A [`RuleTable`] holds rules in registration order together with the
//! [`DocoRegistry`] that documents them. Order is load-bearing: general
//! simplifications are registered ahead of specific specializations, and
//! [`RuleTable::find_first_match`] always returns the earliest rule that
//! fires.

use std::fmt;
use std::sync::Arc;

use assay_foundation::{Error, Expr, Result};

use crate::doco::DocoRegistry;
use crate::pattern::{Captures, Pattern, PatternMatcher};

// =============================================================================
// Outcomes and Handlers
// =============================================================================

/// What a handler decided to do with a matched expression.
#[derive(Clone, Debug, PartialEq)]
pub enum RewriteOutcome {
    /// Rewrite to the given expression and keep going.
    Replace(Expr),
    /// Record this step and stop analysis with a warning.
    Stop,
    /// The pattern matched but the rule does not apply; try later rules.
    Decline,
}

/// Rule handler: receives the matched expression and its captures.
pub type Handler = Arc<dyn Fn(&Expr, &Captures) -> RewriteOutcome + Send + Sync>;

// =============================================================================
// Rule
// =============================================================================

/// A registered rule.
#[derive(Clone)]
pub struct Rule {
    pattern: Pattern,
    message: String,
    handler: Handler,
    order: usize,
}

impl Rule {
    /// Returns the rule's pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns the documented message recorded when the rule fires.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the rule's position in its table.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Runs the handler.
    #[must_use]
    pub fn apply(&self, expr: &Expr, captures: &Captures) -> RewriteOutcome {
        (self.handler)(expr, captures)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("order", &self.order)
            .field("pattern", &self.pattern.to_string())
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A rule that fired, with its replacement (`None` for a stop).
#[derive(Debug)]
pub struct Firing<'a> {
    /// The rule that fired.
    pub rule: &'a Rule,
    /// The rewritten expression, or `None` if the rule stopped analysis.
    pub replacement: Option<Expr>,
}

// =============================================================================
// Rule Table
// =============================================================================

/// Ordered registry of rules.
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
    doco: DocoRegistry,
}

impl RuleTable {
    /// Creates an empty table with an empty documentation registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table using `doco` for documentation.
    #[must_use]
    pub fn with_doco(doco: DocoRegistry) -> Self {
        Self {
            rules: Vec::new(),
            doco,
        }
    }

    /// Returns the documentation registry.
    #[must_use]
    pub const fn doco(&self) -> &DocoRegistry {
        &self.doco
    }

    /// Returns the documentation registry for declaring entries.
    pub fn doco_mut(&mut self) -> &mut DocoRegistry {
        &mut self.doco
    }

    /// Appends a rule.
    ///
    /// If an equal pattern is already registered, its handler and message are
    /// replaced in place and a warning is logged.
    ///
    /// # Errors
    /// Returns an undocumented error if no documentation entry has `message`
    /// as its after-form.
    pub fn register<F>(
        &mut self,
        pattern: Pattern,
        message: impl Into<String>,
        handler: F,
    ) -> Result<()>
    where
        F: Fn(&Expr, &Captures) -> RewriteOutcome + Send + Sync + 'static,
    {
        self.register_handler(pattern, message, Arc::new(handler))
    }

    /// Like [`register`](Self::register), taking a shared handler.
    ///
    /// # Errors
    /// Returns an undocumented error if no documentation entry has `message`
    /// as its after-form.
    pub fn register_handler(
        &mut self,
        pattern: Pattern,
        message: impl Into<String>,
        handler: Handler,
    ) -> Result<()> {
        let message = message.into();
        if !self.doco.documents(&message) {
            return Err(Error::undocumented(message));
        }

        if let Some(existing) = self.rules.iter_mut().find(|r| r.pattern == pattern) {
            tracing::warn!(
                pattern = %existing.pattern,
                order = existing.order,
                old = %existing.message,
                new = %message,
                "reassigning handler for an already registered pattern"
            );
            existing.handler = handler;
            existing.message = message;
            return Ok(());
        }

        let order = self.rules.len();
        self.rules.push(Rule {
            pattern,
            message,
            handler,
            order,
        });
        Ok(())
    }

    /// Removes every rule. Documentation is kept.
    pub fn reset(&mut self) {
        self.rules.clear();
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Iterates rule messages in registration order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Rule::message)
    }

    /// Finds the first rule, in registration order, that matches `expr` and
    /// does not decline.
    #[must_use]
    pub fn find_first_match(&self, expr: &Expr) -> Option<Firing<'_>> {
        self.rules.iter().find_map(|rule| {
            let captures = PatternMatcher::match_expr(&rule.pattern, expr)?;
            match rule.apply(expr, &captures) {
                RewriteOutcome::Replace(next) => Some(Firing {
                    rule,
                    replacement: Some(next),
                }),
                RewriteOutcome::Stop => Some(Firing {
                    rule,
                    replacement: None,
                }),
                RewriteOutcome::Decline => None,
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
