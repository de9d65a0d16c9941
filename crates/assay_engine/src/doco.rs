//! Documentation registry for rule families.
//!
//! Each entry pairs a *before-form* (an idiom as a user might write it) with
//! an *after-form* (what the rules turn it into):
//!
//! ```text
//! assert obj.empty?          => assert_empty obj
//! assert_equal 0, obj.size   => assert_empty obj
//! ```
//!
//! Rule messages are after-forms, so a rule can only be registered once the
//! idiom it produces has been documented.

use std::collections::HashSet;
use std::fmt::Write as _;

use assay_foundation::{Error, Result};

use crate::rule::RuleTable;

/// One documented before/after pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocoEntry {
    /// The idiom before rewriting.
    pub before: String,
    /// The idiom after rewriting.
    pub after: String,
}

/// Ordered registry of documentation entries.
#[derive(Clone, Debug, Default)]
pub struct DocoRegistry {
    entries: Vec<DocoEntry>,
    befores: HashSet<String>,
}

impl DocoRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that every form in `befores` becomes `after`.
    ///
    /// Nothing is added if any before-form is already declared.
    ///
    /// # Errors
    /// Returns a duplicate doco error if a before-form was declared before,
    /// or appears twice in `befores`.
    pub fn declare<S: Into<String>>(
        &mut self,
        befores: impl IntoIterator<Item = S>,
        after: impl Into<String>,
    ) -> Result<()> {
        let befores: Vec<String> = befores.into_iter().map(Into::into).collect();
        let mut fresh = HashSet::new();
        for before in &befores {
            if self.befores.contains(before) || !fresh.insert(before.as_str()) {
                return Err(Error::duplicate_doco(before.clone()));
            }
        }

        let after = after.into();
        for before in befores {
            self.befores.insert(before.clone());
            self.entries.push(DocoEntry {
                before,
                after: after.clone(),
            });
        }
        Ok(())
    }

    /// Returns true if some entry's after-form equals `message`.
    #[must_use]
    pub fn documents(&self, message: &str) -> bool {
        self.entries.iter().any(|e| e.after == message)
    }

    /// Returns the after-form documented for `before`.
    #[must_use]
    pub fn after_for(&self, before: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.before == before)
            .map(|e| e.after.as_str())
    }

    /// Returns the entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[DocoEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the distinct after-forms in first-declared order.
    #[must_use]
    pub fn after_forms(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.after.as_str())
            .filter(|after| seen.insert(*after))
            .collect()
    }

    /// Renders the registry grouped by after-form.
    ///
    /// Before-forms are padded to a common width; groups are separated by a
    /// blank line.
    #[must_use]
    pub fn catalog(&self) -> String {
        let width = self
            .entries
            .iter()
            .map(|e| e.before.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for (i, after) in self.after_forms().into_iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for entry in self.entries.iter().filter(|e| e.after == after) {
                let _ = writeln!(out, "{:<width$} => {after}", entry.before);
            }
        }
        out
    }

    /// Lists rule messages in `table` that no entry documents.
    ///
    /// Tables built through [`RuleTable::register`] always come back clean.
    #[must_use]
    pub fn check_coverage(&self, table: &RuleTable) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for message in table.messages() {
            if !self.documents(message) && !missing.iter().any(|m| m == message) {
                missing.push(message.to_string());
            }
        }
        missing
    }
}
