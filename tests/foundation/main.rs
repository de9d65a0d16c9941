//! Integration tests for Layer 0: Foundation
//!
//! Tests for expression trees, source printing, and errors.

mod errors;
mod printer;
