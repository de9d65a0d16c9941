//! Standard minitest rule families for Assay.
//!
//! This crate provides the rules that normalize minitest assertions:
//! - Assertion families (`assert_*` / `refute_*`)
//! - Expectation families (`must_*` / `wont_*`)
//! - [`Family`] - The builder the families are declared with
//!
//! Every rule is documented with before/after forms, so the catalog of a
//! standard table lists exactly the rewrites it can perform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assertions;
pub mod expectations;
pub mod family;

pub use family::{Family, Polarity};

use assay_engine::{LintConfig, RuleTable};
use assay_foundation::Result;

/// Registers every standard family into `table`.
///
/// Assertions are registered before expectations. When
/// `config.redundant_messages` is off, the redundant-message family is left
/// out entirely, including its documentation.
///
/// # Errors
/// Returns a configuration error if a rule fails to register or a before-form
/// is declared twice, as happens when installing into a table that already
/// holds the standard families.
pub fn install(table: &mut RuleTable, config: &LintConfig) -> Result<()> {
    {
        let mut family = Family::new(table);
        assertions::install(&mut family, config)?;
        expectations::install(&mut family)?;
    }
    tracing::debug!(
        rules = table.len(),
        redundant_messages = config.redundant_messages,
        "installed standard rules"
    );
    Ok(())
}

/// Builds a fresh table holding the standard families.
///
/// # Errors
/// Returns a configuration error if a rule fails to register.
pub fn standard_table(config: &LintConfig) -> Result<RuleTable> {
    let mut table = RuleTable::new();
    install(&mut table, config)?;
    Ok(table)
}
