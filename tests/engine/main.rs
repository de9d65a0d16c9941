//! Integration tests for Layer 2: Engine
//!
//! Tests for pattern matching, rule tables, documentation, and rewriting.

mod doco;
mod patterns;
mod rewrite;
