//! Integration tests for Layer 3: Standard rule families
//!
//! Tests the assertion and expectation families end to end, from tree
//! notation through the engine to printed source and rendered traces.

mod assertions;
mod catalog;
mod operators;
