//! Integration tests for error kinds and context

use assay_foundation::{Error, ErrorContext, ErrorKind, SemanticLimit};

#[test]
fn configuration_errors() {
    for err in [
        Error::undocumented("assert_empty obj"),
        Error::duplicate_doco("assert obj.empty?"),
        Error::invalid_pattern("(call ___ _)", "rest must be last"),
    ] {
        assert!(err.is_configuration(), "{err}");
        assert!(!err.is_fault(), "{err}");
    }
}

#[test]
fn analysis_faults() {
    let cycle = Error::duplicate_rewrite("assert(x)", "assert obj");
    let limit = Error::limit_exceeded(SemanticLimit::MaxRewrites {
        limit: 64,
        context: Some("assert obj".to_string()),
    });
    assert!(cycle.is_fault());
    assert!(limit.is_fault());
    assert!(limit.to_string().contains("max rewrites (64) exceeded"));
}

#[test]
fn io_errors_name_the_path() {
    let err = Error::io("trees.sexp", &std::io::Error::from(std::io::ErrorKind::NotFound));
    assert!(matches!(&err.kind, ErrorKind::Io { path, .. } if path == "trees.sexp"));
    assert!(err.to_string().starts_with("cannot read trees.sexp"));
}

#[test]
fn context_formats_location() {
    let context = ErrorContext::new().with_source("a.sexp").with_position(3, 7);
    assert_eq!(context.to_string(), "a.sexp:3:7");

    let err = Error::new(ErrorKind::Internal("boom".into())).with_context(context);
    assert_eq!(err.to_string(), "internal error: boom");
    assert!(err.context.is_some());
}
