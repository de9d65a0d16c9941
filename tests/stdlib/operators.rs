//! Operator table tests, one case per operator and polarity

use assay_engine::{Analysis, LintConfig, RewriteEngine, RuleTable, StopReason};
use assay_foundation::printer::print;
use assay_language::read_one;
use assay_stdlib::standard_table;

fn table() -> RuleTable {
    standard_table(&LintConfig::default()).unwrap()
}

fn analyze(table: &RuleTable, source: &str) -> Analysis {
    RewriteEngine::new(table)
        .analyze(&read_one(source).unwrap())
        .unwrap()
}

/// Operator, polarity, dedicated message, printed result for `a OP b`.
const ASSERTIONS: &[(&str, &str, &str, &str)] = &[
    ("==", "assert", "assert_equal exp, act", "assert_equal(a, b)"),
    ("==", "refute", "refute_equal exp, act", "refute_equal(a, b)"),
    ("!=", "assert", "refute_equal exp, act", "refute_equal(a, b)"),
    ("!=", "refute", "assert_equal exp, act", "assert_equal(a, b)"),
    ("include?", "assert", "assert_includes obj, val", "assert_includes(a, b)"),
    ("include?", "refute", "refute_includes obj, val", "refute_includes(a, b)"),
    ("key?", "assert", "assert_includes obj, val", "assert_includes(a, b)"),
    ("key?", "refute", "refute_includes obj, val", "refute_includes(a, b)"),
    ("instance_of?", "assert", "assert_instance_of cls, obj", "assert_instance_of(b, a)"),
    ("instance_of?", "refute", "refute_instance_of cls, obj", "refute_instance_of(b, a)"),
    ("kind_of?", "assert", "assert_kind_of mod, obj", "assert_kind_of(b, a)"),
    ("kind_of?", "refute", "refute_kind_of mod, obj", "refute_kind_of(b, a)"),
    ("is_a?", "assert", "assert_kind_of mod, obj", "assert_kind_of(b, a)"),
    ("is_a?", "refute", "refute_kind_of mod, obj", "refute_kind_of(b, a)"),
    ("=~", "assert", "assert_match obj, val", "assert_match(a, b)"),
    ("=~", "refute", "refute_match obj, val", "refute_match(a, b)"),
    ("===", "assert", "assert_match obj, val", "assert_match(a, b)"),
    ("===", "refute", "refute_match obj, val", "refute_match(a, b)"),
    ("match", "assert", "assert_match obj, val", "assert_match(a, b)"),
    ("match", "refute", "refute_match obj, val", "refute_match(a, b)"),
    ("match?", "assert", "assert_match obj, val", "assert_match(a, b)"),
    ("match?", "refute", "refute_match obj, val", "refute_match(a, b)"),
    ("!~", "assert", "refute_match obj, val", "refute_match(a, b)"),
    ("!~", "refute", "assert_match obj, val", "assert_match(a, b)"),
    ("respond_to?", "assert", "assert_respond_to obj, val", "assert_respond_to(a, b)"),
    ("respond_to?", "refute", "refute_respond_to obj, val", "refute_respond_to(a, b)"),
    ("equal?", "assert", "assert_same obj, val", "assert_same(a, b)"),
    ("equal?", "refute", "refute_same obj, val", "refute_same(a, b)"),
];

/// Operator, polarity, message, printed result for `_(a).must_be :OP, b`.
const EXPECTATIONS: &[(&str, &str, &str, &str)] = &[
    ("==", "must", "_(obj).must_equal val", "_(a).must_equal(b)"),
    ("==", "wont", "_(obj).wont_equal val", "_(a).wont_equal(b)"),
    ("!=", "must", "_(obj).wont_equal val", "_(a).wont_equal(b)"),
    ("!=", "wont", "_(obj).must_equal val", "_(a).must_equal(b)"),
    ("include?", "must", "_(obj).must_include val", "_(a).must_include(b)"),
    ("include?", "wont", "_(obj).wont_include val", "_(a).wont_include(b)"),
    ("key?", "must", "_(obj).must_include val", "_(a).must_include(b)"),
    ("key?", "wont", "_(obj).wont_include val", "_(a).wont_include(b)"),
    ("instance_of?", "must", "_(obj).must_be_instance_of val", "_(a).must_be_instance_of(b)"),
    ("instance_of?", "wont", "_(obj).wont_be_instance_of val", "_(a).wont_be_instance_of(b)"),
    ("kind_of?", "must", "_(obj).must_be_kind_of val", "_(a).must_be_kind_of(b)"),
    ("kind_of?", "wont", "_(obj).wont_be_kind_of val", "_(a).wont_be_kind_of(b)"),
    ("is_a?", "must", "_(obj).must_be_kind_of val", "_(a).must_be_kind_of(b)"),
    ("is_a?", "wont", "_(obj).wont_be_kind_of val", "_(a).wont_be_kind_of(b)"),
    ("===", "must", "_(obj).must_match val", "_(a).must_match(b)"),
    ("===", "wont", "_(obj).wont_match val", "_(a).wont_match(b)"),
    ("=~", "must", "_(obj).must_match val", "_(a).must_match(b)"),
    ("=~", "wont", "_(obj).wont_match val", "_(a).wont_match(b)"),
    ("match", "must", "_(obj).must_match val", "_(a).must_match(b)"),
    ("match", "wont", "_(obj).wont_match val", "_(a).wont_match(b)"),
    ("match?", "must", "_(obj).must_match val", "_(a).must_match(b)"),
    ("match?", "wont", "_(obj).wont_match val", "_(a).wont_match(b)"),
    ("!~", "must", "_(obj).wont_match val", "_(a).wont_match(b)"),
    ("!~", "wont", "_(obj).must_match val", "_(a).must_match(b)"),
    ("respond_to?", "must", "_(obj).must_respond_to val", "_(a).must_respond_to(b)"),
    ("respond_to?", "wont", "_(obj).wont_respond_to val", "_(a).wont_respond_to(b)"),
    ("equal?", "must", "_(obj).must_be_same_as val", "_(a).must_be_same_as(b)"),
    ("equal?", "wont", "_(obj).wont_be_same_as val", "_(a).wont_be_same_as(b)"),
];

// =============================================================================
// Assertions
// =============================================================================

#[test]
fn every_assertion_operator_is_specialized() {
    let table = table();
    for &(op, polarity, message, output) in ASSERTIONS {
        let source = format!("(call nil {polarity} (call (call nil a) {op} (call nil b)))");
        let analysis = analyze(&table, &source);

        let unpacked = format!("{polarity}_operator obj, :msg, val");
        let messages: Vec<&str> = analysis.trace.messages().collect();
        assert_eq!(messages, [unpacked.as_str(), message], "{polarity} a {op} b");
        assert_eq!(print(&analysis.output), output, "{polarity} a {op} b");
        assert_eq!(analysis.stop, StopReason::NoMatch);
    }
}

#[test]
fn file_existence_in_both_polarities() {
    let table = table();
    for (polarity, message, output) in [
        ("assert", "assert_path_exists val", "assert_path_exists(path)"),
        ("refute", "refute_path_exists val", "refute_path_exists(path)"),
    ] {
        let source =
            format!("(call nil {polarity} (call (const File) exist? (call nil path)))");
        let analysis = analyze(&table, &source);
        let messages: Vec<&str> = analysis.trace.messages().collect();
        assert_eq!(messages.last(), Some(&message), "{polarity}");
        assert_eq!(print(&analysis.output), output);
    }
}

// =============================================================================
// Expectations
// =============================================================================

#[test]
fn every_expectation_operator_is_specialized() {
    let table = table();
    for &(op, polarity, message, output) in EXPECTATIONS {
        let source =
            format!("(call (call nil :_ (call nil a)) {polarity}_be (lit {op}) (call nil b))");
        let analysis = analyze(&table, &source);

        let messages: Vec<&str> = analysis.trace.messages().collect();
        assert_eq!(messages, [message], "{polarity}_be :{op}");
        assert_eq!(print(&analysis.output), output, "{polarity}_be :{op}");
    }
}

#[test]
fn file_expectations_in_both_polarities() {
    let table = table();
    for (polarity, message, output) in [
        ("must", "_(val).path_must_exist", "_(path).path_must_exist"),
        ("wont", "_(val).path_wont_exist", "_(path).path_wont_exist"),
    ] {
        let source = format!(
            "(call (call nil :_ (const File)) {polarity}_be (lit exist?) (call nil path))"
        );
        let analysis = analyze(&table, &source);
        let messages: Vec<&str> = analysis.trace.messages().collect();
        assert_eq!(messages, [message], "{polarity}");
        assert_eq!(print(&analysis.output), output);
    }
}
