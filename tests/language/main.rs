//! Integration tests for Layer 1: Language
//!
//! Tests for reading tree notation and parsing pattern notation.
