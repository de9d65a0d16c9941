//! Assay - Pattern-driven normalizer for minitest assertions
//!
//! This crate re-exports all layers of the Assay system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: assay_runtime     - CLI, REPL, reports, file discovery
//! Layer 3: assay_stdlib      - Standard minitest rule families
//! Layer 2: assay_engine      - Patterns, rule table, doco, rewrite engine, traces
//! Layer 1: assay_language    - Tree and pattern notation reader
//! Layer 0: assay_foundation  - Core types (Expr, Node, Symbol, Error), printer
//! ```

pub use assay_engine as engine;
pub use assay_foundation as foundation;
pub use assay_language as language;
pub use assay_runtime as runtime;
pub use assay_stdlib as stdlib;
