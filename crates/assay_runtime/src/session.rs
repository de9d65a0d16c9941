//! Session state shared by the CLI and the REPL.
//!
//! A session owns the lint configuration and a rule table built from it. The
//! table sits behind an [`Arc`] so analysis can fan out across threads while
//! the table stays read-only.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use assay_engine::{Analysis, DEFAULT_MAX_REWRITES, LintConfig, RewriteEngine, RuleTable};
use assay_foundation::{Error, ErrorContext, ErrorKind, Expr, Result};
use assay_language::read_all;

/// The result of analyzing one top-level expression.
#[derive(Debug)]
pub struct Outcome {
    /// The expression as read.
    pub input: Expr,
    /// The analysis, or the fault that aborted it.
    pub result: Result<Analysis>,
}

impl Outcome {
    /// Returns true if at least one rule fired.
    #[must_use]
    pub fn has_suggestion(&self) -> bool {
        self.result.as_ref().is_ok_and(|a| !a.is_clean())
    }

    /// Returns true if analysis faulted.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        self.result.is_err()
    }
}

/// Configuration plus the rule table built from it.
#[derive(Debug, Clone)]
pub struct Session {
    config: LintConfig,
    table: Arc<RuleTable>,
    max_rewrites: usize,
}

impl Session {
    /// Creates a session with the standard rule families.
    ///
    /// # Errors
    /// Returns a configuration error if the standard table fails to build.
    pub fn new(config: LintConfig) -> Result<Self> {
        let table = assay_stdlib::standard_table(&config)?;
        Ok(Self::with_table(config, Arc::new(table)))
    }

    /// Creates a session over an existing table.
    #[must_use]
    pub const fn with_table(config: LintConfig, table: Arc<RuleTable>) -> Self {
        Self {
            config,
            table,
            max_rewrites: DEFAULT_MAX_REWRITES,
        }
    }

    /// Builder method to set the rewrite ceiling.
    #[must_use]
    pub const fn with_max_rewrites(mut self, max: usize) -> Self {
        self.max_rewrites = max;
        self
    }

    /// Returns the configuration the table was built from.
    #[must_use]
    pub const fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Returns the shared rule table.
    #[must_use]
    pub const fn table(&self) -> &Arc<RuleTable> {
        &self.table
    }

    /// Returns the rendered documentation catalog.
    #[must_use]
    pub fn catalog(&self) -> String {
        self.table.doco().catalog()
    }

    /// Returns an engine over the session's table.
    #[must_use]
    pub fn engine(&self) -> RewriteEngine<'_> {
        RewriteEngine::new(&self.table).with_max_rewrites(self.max_rewrites)
    }

    /// Analyzes one expression.
    ///
    /// # Errors
    /// Returns a fault if the rewrite cycles or runs past the ceiling.
    pub fn analyze(&self, expr: &Expr) -> Result<Analysis> {
        self.engine().analyze(expr)
    }

    /// Reads every expression in `source` and analyzes each independently.
    ///
    /// # Errors
    /// Returns a parse error if `source` is not valid tree notation. Faults
    /// in individual expressions are reported in their [`Outcome`].
    pub fn analyze_source(&self, source: &str) -> Result<Vec<Outcome>> {
        let engine = self.engine();
        let outcomes = read_all(source)?
            .into_iter()
            .map(|input| {
                let result = engine.analyze(&input);
                Outcome { input, result }
            })
            .collect();
        Ok(outcomes)
    }

    /// Reads and analyzes a tree notation file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or a parse error
    /// carrying the file path and position.
    pub fn analyze_file(&self, path: &Path) -> Result<Vec<Outcome>> {
        let source =
            fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), &e))?;
        tracing::debug!(path = %path.display(), "analyzing");
        self.analyze_source(&source).map_err(|e| with_location(e, path))
    }
}

/// Attaches the file path, and the position for parse errors.
fn with_location(err: Error, path: &Path) -> Error {
    let mut context = ErrorContext::new().with_source(path.display().to_string());
    if let ErrorKind::ParseError { line, column, .. } = &err.kind {
        context = context.with_position(*line as usize, *column as usize);
    }
    err.with_context(context)
}
