//! Cross-layer integration tests for Assay
//!
//! Tests that drive files through discovery, analysis, and reporting.

mod reports;
mod sessions;
