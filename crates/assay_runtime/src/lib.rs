//! CLI, file walking, REPL, and JSON reports for Assay.
//!
//! This crate provides:
//! - [`Session`] - Configuration plus a shared rule table
//! - [`Repl`] - Interactive read-analyze-print loop
//! - [`collect_sources`] - Discovery of tree notation files
//! - [`Report`] / [`Summary`] - Per-expression reports and exit codes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod highlight;
pub mod repl;
pub mod report;
pub mod session;
pub mod walk;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Repl, Reply};
pub use report::{EXIT_CLEAN, EXIT_ERROR, EXIT_SUGGESTIONS, Report, StepReport, Summary, render_text};
pub use session::{Outcome, Session};
pub use walk::{EXTENSION, collect_sources, sources_for};
