//! Integration tests for source printing

use assay_foundation::printer::print;
use assay_foundation::{PrintConfig, Printer};
use assay_language::read_one;

fn source(tree: &str) -> String {
    print(&read_one(tree).unwrap())
}

#[test]
fn assertions_print_as_calls() {
    assert_eq!(
        source("(call nil assert_equal (lit 0) (call (call nil obj) size))"),
        "assert_equal(0, obj.size)"
    );
    assert_eq!(source("(call nil assert_empty (call nil obj))"), "assert_empty(obj)");
}

#[test]
fn operators_print_infix() {
    assert_eq!(
        source("(call nil assert (call (call (call nil a) include? (call nil b)) == (true)))"),
        "assert((a.include?(b) == true))"
    );
    assert_eq!(source("(call nil refute (call (call nil x) !))"), "refute(!x)");
    assert_eq!(source("(call (call nil h) :[] (lit :k))"), "h[:k]");
}

#[test]
fn literals() {
    assert_eq!(source("(array (lit 1) (lit 2.5) (str \"s\") (nil))"), r#"[1, 2.5, "s", nil]"#);
    assert_eq!(source("(hash)"), "{}");
    assert_eq!(source("(hash (lit :a) (lit 1))"), "{ :a => 1 }");
    assert_eq!(source("(colon2 (const File) Stat)"), "File::Stat");
}

#[test]
fn expectation_subjects() {
    assert_eq!(
        source("(call (call nil :_ (call nil obj)) must_equal (lit 1))"),
        "_(obj).must_equal(1)"
    );
    assert_eq!(
        source("(call (iter (call nil :_) 0 (call nil boom)) must_raise (const ArgumentError))"),
        "_ { boom }.must_raise(ArgumentError)"
    );
}

#[test]
fn trace_config_truncates_strings() {
    let expr = read_one(r#"(call nil assert_equal (str "abcdefghijklmnopqrstuvwxyz") (call nil s))"#)
        .unwrap();
    let trace = Printer::new(PrintConfig::trace()).print(&expr);
    assert_eq!(trace, r#"assert_equal("abcdefghijklmnopqrst", s)"#);
    assert_eq!(
        print(&expr),
        r#"assert_equal("abcdefghijklmnopqrstuvwxyz", s)"#
    );
}
