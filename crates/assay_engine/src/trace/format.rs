//! Trace output formatters.
//!
//! Provides the aligned source-comment form shown to users and a plain
//! one-step-per-line form for logs.

use assay_foundation::{PrintConfig, Printer};

use super::Trace;

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for rendering a trace.
///
/// Formatters only read the trace; nothing they do feeds back into analysis.
pub trait TraceFormatter {
    /// Renders one line per step, in discovery order.
    fn format_lines(&self, trace: &Trace) -> Vec<String>;

    /// Renders the whole trace, one step per line.
    fn format(&self, trace: &Trace) -> String {
        self.format_lines(trace).join("\n")
    }
}

// =============================================================================
// Source Formatter
// =============================================================================

/// Renders each step as source followed by an aligned `# message` comment.
///
/// ```text
///   assert(a.include?(b), "is b in a?") # assert obj
///   assert(a.include?(b))               # assert_includes obj, val
/// ```
#[derive(Clone, Debug)]
pub struct SourceFormatter {
    /// Number of spaces before each line.
    pub indent: usize,
    printer: Printer,
}

impl Default for SourceFormatter {
    fn default() -> Self {
        Self {
            indent: 2,
            printer: Printer::new(PrintConfig::trace()),
        }
    }
}

impl SourceFormatter {
    /// Creates a formatter with the default indent and trace print config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the indent.
    #[must_use]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Builder method to set the print config.
    #[must_use]
    pub fn with_print_config(mut self, config: PrintConfig) -> Self {
        self.printer = Printer::new(config);
        self
    }
}

impl TraceFormatter for SourceFormatter {
    fn format_lines(&self, trace: &Trace) -> Vec<String> {
        let printed: Vec<String> = trace.iter().map(|s| self.printer.print(&s.expr)).collect();
        let width = printed.iter().map(|p| p.chars().count()).max().unwrap_or(0);
        let indent = " ".repeat(self.indent);

        printed
            .iter()
            .zip(trace.messages())
            .map(|(source, message)| format!("{indent}{source:<width$} # {message}"))
            .collect()
    }
}

// =============================================================================
// Plain Formatter
// =============================================================================

/// Renders each step as `message: source`, unaligned.
#[derive(Clone, Debug)]
pub struct PlainFormatter {
    printer: Printer,
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self {
            printer: Printer::new(PrintConfig::trace()),
        }
    }
}

impl PlainFormatter {
    /// Creates a plain formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraceFormatter for PlainFormatter {
    fn format_lines(&self, trace: &Trace) -> Vec<String> {
        trace
            .iter()
            .map(|s| format!("{}: {}", s.message, self.printer.print(&s.expr)))
            .collect()
    }
}
