//! Text and JSON reports for analyzed expressions.
//!
//! The text form is the rendered trace, followed by the normal form:
//!
//! ```text
//! test/foo.sexp:1
//!   assert_equal(0, obj.length) # assert_empty obj
//!   => assert_empty(obj)
//! ```
//!
//! The JSON form is one [`Report`] object per line.

use std::path::Path;

use serde::Serialize;

use assay_foundation::printer::print;
use assay_foundation::{Error, ErrorKind, Expr, Result};

use crate::session::Outcome;

/// Exit code when no expression had a suggestion.
pub const EXIT_CLEAN: u8 = 0;
/// Exit code when at least one expression had a suggestion.
pub const EXIT_SUGGESTIONS: u8 = 1;
/// Exit code for usage, read, parse, or fault errors.
pub const EXIT_ERROR: u8 = 2;

/// One recorded step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// The printed pre-rewrite expression.
    pub expr: String,
    /// The rule message.
    pub message: String,
}

/// The serializable report for one top-level expression.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    /// The file the expression came from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// 1-based position of the expression within its source.
    pub index: usize,
    /// The printed input.
    pub input: String,
    /// The printed normal form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// The normal form as a tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Expr>,
    /// `no-match` or `warning`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
    /// The recorded steps.
    pub steps: Vec<StepReport>,
    /// The fault that aborted analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// Builds the report for one outcome.
    #[must_use]
    pub fn new(path: Option<&Path>, index: usize, outcome: &Outcome) -> Self {
        let mut report = Self {
            path: path.map(|p| p.display().to_string()),
            index,
            input: print(&outcome.input),
            output: None,
            tree: None,
            stop: None,
            steps: Vec::new(),
            error: None,
        };
        match &outcome.result {
            Ok(analysis) => {
                report.output = Some(print(&analysis.output));
                report.tree = Some(analysis.output.clone());
                report.stop = Some(analysis.stop.to_string());
                report.steps = analysis
                    .trace
                    .iter()
                    .map(|step| StepReport {
                        expr: print(&step.expr),
                        message: step.message.clone(),
                    })
                    .collect();
            }
            Err(e) => report.error = Some(e.to_string()),
        }
        report
    }

    /// Serializes the report as a single line of JSON.
    ///
    /// # Errors
    /// Returns an internal error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))
    }
}

/// Renders the text report for one outcome, or `None` if nothing fired.
#[must_use]
pub fn render_text(path: Option<&Path>, index: usize, outcome: &Outcome) -> Option<String> {
    let header = match path {
        Some(path) => format!("{}:{index}", path.display()),
        None => format!("expression {index}"),
    };
    match &outcome.result {
        Ok(analysis) if analysis.is_clean() => None,
        Ok(analysis) => {
            let mut lines = vec![header];
            lines.extend(analysis.lines.iter().cloned());
            lines.push(format!("  => {}", print(&analysis.output)));
            Some(lines.join("\n"))
        }
        Err(e) => Some(format!("{header}\n  error: {e}")),
    }
}

/// Running totals across a whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Expressions analyzed.
    pub expressions: usize,
    /// Expressions with a non-empty trace.
    pub suggestions: usize,
    /// Expressions whose analysis faulted.
    pub faults: usize,
    /// Files that could not be read or parsed.
    pub errors: usize,
}

impl Summary {
    /// Creates an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        self.expressions += 1;
        if outcome.has_suggestion() {
            self.suggestions += 1;
        }
        if outcome.is_fault() {
            self.faults += 1;
        }
    }

    /// Counts one unreadable or unparsable file.
    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Returns the process exit code for this run.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.faults > 0 || self.errors > 0 {
            EXIT_ERROR
        } else if self.suggestions > 0 {
            EXIT_SUGGESTIONS
        } else {
            EXIT_CLEAN
        }
    }
}
