//! Lint configuration.

/// Options that select which rule families are installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LintConfig {
    /// Whether rules that drop a redundant trailing message argument are
    /// installed.
    pub redundant_messages: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            redundant_messages: true,
        }
    }
}

impl LintConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable or disable the redundant message family.
    #[must_use]
    pub const fn with_redundant_messages(mut self, enabled: bool) -> Self {
        self.redundant_messages = enabled;
        self
    }
}
