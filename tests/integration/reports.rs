//! Report integration tests
//!
//! Tests the text and JSON renderings and the run summary.

use std::path::Path;

use assay_engine::LintConfig;
use assay_runtime::{EXIT_CLEAN, EXIT_ERROR, EXIT_SUGGESTIONS, Report, Session, Summary, render_text};

fn session() -> Session {
    Session::new(LintConfig::default()).unwrap()
}

#[test]
fn text_report_shows_trace_and_result() {
    let outcomes = session()
        .analyze_source("(call nil assert_equal (lit 0) (call (call nil obj) size))")
        .unwrap();
    let text = render_text(Some(Path::new("t.sexp")), 1, &outcomes[0]).unwrap();

    assert_eq!(
        text,
        "t.sexp:1\n  assert_equal(0, obj.size) # assert_empty obj\n  => assert_empty(obj)"
    );
}

#[test]
fn clean_expressions_have_no_text_report() {
    let outcomes = session()
        .analyze_source("(call nil assert_empty (call nil obj))")
        .unwrap();
    assert!(render_text(None, 1, &outcomes[0]).is_none());
}

#[test]
fn json_report_round_trips_through_serde() {
    let outcomes = session()
        .analyze_source("(call nil assert (call (call nil obj) empty?))")
        .unwrap();
    let json = Report::new(Some(Path::new("t.sexp")), 1, &outcomes[0])
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["path"], "t.sexp");
    assert_eq!(value["index"], 1);
    assert_eq!(value["input"], "assert(obj.empty?)");
    assert_eq!(value["output"], "assert_empty(obj)");
    assert_eq!(value["stop"], "no-match");
    assert_eq!(value["steps"][0]["message"], "assert_predicate obj, :pred?");
    assert_eq!(value["steps"][1]["message"], "assert_empty obj");
    assert!(value.get("error").is_none());
}

#[test]
fn summary_exit_codes() {
    let session = session();
    let outcomes = session
        .analyze_source(
            "(call nil assert_empty (call nil obj))
             (call nil assert (call nil obj))",
        )
        .unwrap();

    let mut clean = Summary::new();
    clean.record(&outcomes[0]);
    assert_eq!(clean.exit_code(), EXIT_CLEAN);

    let mut suggested = Summary::new();
    for outcome in &outcomes {
        suggested.record(outcome);
    }
    assert_eq!(suggested.exit_code(), EXIT_SUGGESTIONS);
    assert_eq!(suggested.expressions, 2);
    assert_eq!(suggested.suggestions, 1);

    suggested.record_error();
    assert_eq!(suggested.exit_code(), EXIT_ERROR);
}

#[test]
fn faults_are_reported_per_expression() {
    let session = session().with_max_rewrites(1);
    let outcomes = session
        .analyze_source(
            "(call nil assert_equal (lit 0) (call (call nil obj) size))
             (call nil assert (call (call nil obj) empty?))",
        )
        .unwrap();

    assert!(!outcomes[0].is_fault());
    assert!(outcomes[1].is_fault());

    let text = render_text(None, 2, &outcomes[1]).unwrap();
    assert!(text.starts_with("expression 2\n  error: limit exceeded"));

    let mut summary = Summary::new();
    for outcome in &outcomes {
        summary.record(outcome);
    }
    assert_eq!(summary.faults, 1);
    assert_eq!(summary.exit_code(), EXIT_ERROR);
}
