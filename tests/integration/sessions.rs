//! Session integration tests
//!
//! Tests reading tree files from disk and analyzing every expression in
//! them.

use std::fs;
use std::path::PathBuf;

use assay_engine::{LintConfig, StopReason};
use assay_foundation::ErrorKind;
use assay_foundation::printer::print;
use assay_runtime::{Session, collect_sources};
use tempfile::{TempDir, tempdir};

fn write(dir: &TempDir, relative: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

const MIXED: &str = "\
; suggestions and clean assertions
(call nil assert_equal (lit 0) (call (call nil obj) length))
(call nil assert_empty (call nil obj))
(call nil assert (call nil obj))
";

#[test]
fn every_expression_in_a_file_is_analyzed() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "mixed.sexp", MIXED);
    let session = Session::new(LintConfig::default()).unwrap();

    let outcomes = session.analyze_file(&path).unwrap();
    assert_eq!(outcomes.len(), 3);

    let first = outcomes[0].result.as_ref().unwrap();
    assert_eq!(print(&first.output), "assert_empty(obj)");
    assert!(outcomes[1].result.as_ref().unwrap().is_clean());
    assert_eq!(outcomes[2].result.as_ref().unwrap().stop, StopReason::Warning);

    let suggestions = outcomes.iter().filter(|o| o.has_suggestion()).count();
    assert_eq!(suggestions, 2);
}

#[test]
fn parse_errors_name_the_file_and_position() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "broken.sexp", "(call nil assert_empty (call nil obj))\n(call ? [m a])\n");
    let session = Session::new(LintConfig::default()).unwrap();

    let err = session.analyze_file(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ParseError { line: 2, .. }));
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some(path.display().to_string().as_str()));
    assert_eq!(context.line, Some(2));
}

#[test]
fn directories_are_discovered_then_analyzed() {
    let dir = tempdir().unwrap();
    write(&dir, "b.sexp", "(call nil assert (call nil obj))");
    write(&dir, "a/inner.sexp", "(call nil assert_empty (call nil obj))");
    write(&dir, "notes.md", "(not a tree");

    let sources = collect_sources(&[dir.path().to_path_buf()]).unwrap();
    assert_eq!(sources.len(), 2);
    assert!(sources[0].ends_with("a/inner.sexp"));
    assert!(sources[1].ends_with("b.sexp"));

    let session = Session::new(LintConfig::default()).unwrap();
    let total: usize = sources
        .iter()
        .map(|p| session.analyze_file(p).unwrap().len())
        .sum();
    assert_eq!(total, 2);
}

#[test]
fn config_reaches_the_rule_table() {
    let source = r#"(call nil assert_equal (lit 1) (call nil x) (str "one"))"#;

    let strict = Session::new(LintConfig::default()).unwrap();
    assert!(strict.analyze_source(source).unwrap()[0].has_suggestion());

    let lenient = Session::new(LintConfig::default().with_redundant_messages(false)).unwrap();
    assert!(!lenient.analyze_source(source).unwrap()[0].has_suggestion());
}
