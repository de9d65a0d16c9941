//! Integration tests for pattern matching against read trees

use assay_engine::{Pattern, PatternMatcher};
use assay_foundation::Expr;
use assay_language::read_one;

fn pat(source: &str) -> Pattern {
    Pattern::parse(source).unwrap()
}

fn tree(source: &str) -> Expr {
    read_one(source).unwrap()
}

fn captured(pattern: &str, expr: &str) -> Option<Vec<String>> {
    PatternMatcher::match_expr(&pat(pattern), &tree(expr))
        .map(|c| c.iter().map(ToString::to_string).collect())
}

// =============================================================================
// Assertion Shapes
// =============================================================================

#[test]
fn predicate_unpacking_shape() {
    let p = "(call nil [m assert refute] (call [- nil] ? ___))";
    assert_eq!(
        captured(p, "(call nil assert (call (call nil obj) empty?))"),
        Some(vec!["empty?".to_string()])
    );
    assert_eq!(captured(p, "(call nil assert (call nil empty?))"), None);
}

#[test]
fn zero_size_shape() {
    let p = "(call nil assert_equal (lit 0) (call ? [m length size count]))";
    assert_eq!(
        captured(p, "(call nil assert_equal (lit 0) (call (call nil obj) count))"),
        Some(vec!["(call nil obj)".to_string()])
    );
    assert_eq!(
        captured(p, "(call nil assert_equal (lit 0.0) (call (call nil obj) size))"),
        None
    );
}

#[test]
fn message_argument_shape() {
    let p = "(call nil [prefix assert] ___ (str _))";
    assert!(PatternMatcher::matches(
        &pat(p),
        &tree(r#"(call nil assert_equal (lit 1) (call nil x) (str "msg"))"#)
    ));
    assert!(!PatternMatcher::matches(
        &pat(p),
        &tree("(call nil assert_equal (lit 1) (call nil x))")
    ));
}

#[test]
fn float_literal_shape() {
    let p = "(call nil assert_equal (lit [? [atom float]]) ?)";
    assert_eq!(
        captured(p, "(call nil assert_equal (lit 2.5) (call nil x))"),
        Some(vec!["2.5".to_string(), "(call nil x)".to_string()])
    );
    assert_eq!(captured(p, "(call nil assert_equal (lit 2) (call nil x))"), None);
}

// =============================================================================
// Expectation Shapes
// =============================================================================

#[test]
fn expectation_subject_shape() {
    let p = "(call (call nil [m expect value :_] ?) [prefix must_] ___)";
    for subject in ["expect", "value", "_"] {
        let source = format!("(call (call nil {subject} (call nil obj)) must_equal (lit 1))");
        assert_eq!(
            captured(p, &source),
            Some(vec!["(call nil obj)".to_string()]),
            "{subject}"
        );
    }
}

#[test]
fn block_subject_shape() {
    let p = "(call (iter [any (call nil [m lambda proc]) (lambda)] _ ___) [prefix must_] ___)";
    assert!(PatternMatcher::matches(
        &pat(p),
        &tree("(call (iter (call nil lambda) 0 (call nil boom)) must_raise (const E))")
    ));
    assert!(PatternMatcher::matches(
        &pat(p),
        &tree("(call (iter (lambda) (args) (call nil boom)) must_raise (const E))")
    ));
    assert!(!PatternMatcher::matches(
        &pat(p),
        &tree("(call (iter (call nil each) 0 (call nil boom)) must_raise (const E))")
    ));
}
