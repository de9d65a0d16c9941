//! Error types for the Assay system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Errors fall into three groups: configuration errors raised while a rule
//! table is being built, faults raised while a single expression is being
//! analyzed, and input errors raised by the front end (parse and I/O).

use std::fmt;

use thiserror::Error;

/// Result type alias using the Assay [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Assay operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an error for a rule whose message has no documentation entry.
    #[must_use]
    pub fn undocumented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Undocumented(message.into()))
    }

    /// Creates an error for a documentation before-form declared twice.
    #[must_use]
    pub fn duplicate_doco(before: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateDoco(before.into()))
    }

    /// Creates a malformed pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        })
    }

    /// Creates a duplicate rewrite fault.
    #[must_use]
    pub fn duplicate_rewrite(expr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateRewrite {
            expr: expr.into(),
            message: message.into(),
        })
    }

    /// Creates a semantic limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Creates an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            message: err.to_string(),
        })
    }

    /// Returns true if this error was raised while building a rule table.
    ///
    /// Configuration errors are always fatal at setup time.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Undocumented(_)
                | ErrorKind::DuplicateDoco(_)
                | ErrorKind::InvalidPattern { .. }
        )
    }

    /// Returns true if this error aborted the analysis of one expression.
    ///
    /// Faults leave the rule table and engine usable for later calls.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::DuplicateRewrite { .. } | ErrorKind::LimitExceeded(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A rule was registered with a message no documentation entry produces.
    #[error("undocumented rule message: {0:?}")]
    Undocumented(String),

    /// A documentation before-form was declared more than once.
    #[error("documentation already declared for: {0:?}")]
    DuplicateDoco(String),

    /// A pattern spec could not be compiled.
    #[error("invalid pattern {pattern}: {message}")]
    InvalidPattern {
        /// The offending pattern, as written.
        pattern: String,
        /// Why it was rejected.
        message: String,
    },

    /// A rewrite step revisited an expression already recorded in the trace.
    #[error("duplicate rewrite of {expr} ({message})")]
    DuplicateRewrite {
        /// Printed form of the repeated expression.
        expr: String,
        /// Message of the rule that tried to fire again.
        message: String,
    },

    /// Semantic limit exceeded (kill switch triggered).
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),

    /// Parse error in tree or pattern notation.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// A file could not be read.
    #[error("cannot read {path}: {message}")]
    Io {
        /// The path being read.
        path: String,
        /// The underlying error message.
        message: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Semantic limits (kill switches) that can be exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// Maximum rewrite steps for one analysis call exceeded.
    MaxRewrites {
        /// The configured limit.
        limit: usize,
        /// Message of the last rule that fired, if any.
        context: Option<String>,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxRewrites { limit, context } => {
                write!(f, "max rewrites ({limit}) exceeded")?;
                if let Some(ctx) = context {
                    write!(f, " after {ctx:?}")?;
                }
                Ok(())
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file being analyzed.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "{source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        Ok(())
    }
}
