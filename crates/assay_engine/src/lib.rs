//! Pattern matching, rule tables, and the rewrite engine for Assay.
//!
//! This crate provides:
//! - [`PatternCompiler`] / [`PatternMatcher`] - Pattern compilation and matching
//! - [`DocoRegistry`] - Before/after documentation for rule families
//! - [`RuleTable`] - Ordered, documented rules
//! - [`RewriteEngine`] - Fixed-point rewriting with duplicate detection
//! - [`TraceFormatter`] - Rendering of rewrite traces

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod doco;
pub mod pattern;
pub mod rewrite;
pub mod rule;
pub mod trace;

pub use config::LintConfig;
pub use doco::{DocoEntry, DocoRegistry};
pub use pattern::{
    AtomClass, Captures, KindPattern, Pattern, PatternCompiler, PatternMatcher, PatternSpec,
    parse_pattern,
};
pub use rewrite::{Analysis, DEFAULT_MAX_REWRITES, RewriteEngine, StopReason};
pub use rule::{Firing, Handler, RewriteOutcome, Rule, RuleTable};
pub use trace::{PlainFormatter, SourceFormatter, Trace, TraceFormatter, TraceStep};
