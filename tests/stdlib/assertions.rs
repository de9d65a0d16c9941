//! Integration tests for the assertion families

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

fn messages(analysis: &Analysis) -> Vec<&str> {
    analysis.trace.messages().collect()
}

const INCLUDE_EQUAL_TRUE: &str = r#"(call nil assert
    (call (call (array (lit 1) (lit 2) (lit 3)) include? (call nil b)) == (true))
    (str "is b in 1..3?"))"#;

// =============================================================================
// Walkthroughs
// =============================================================================

#[test]
fn include_equal_true_reaches_assert_includes() {
    let analysis = analyze(&table(), INCLUDE_EQUAL_TRUE);

    assert_eq!(analysis.trace.len(), 6);
    assert_eq!(messages(&analysis)[0], "redundant message?");
    assert_eq!(analysis.stop, StopReason::NoMatch);
    assert_eq!(print(&analysis.output), "assert_includes([1, 2, 3], b)");
}

#[test]
fn include_equal_true_trace_is_aligned() {
    let analysis = analyze(&table(), INCLUDE_EQUAL_TRUE);

    assert_eq!(analysis.lines.len(), analysis.trace.len());
    assert!(analysis.lines[0]
        .starts_with(r#"  assert(([1, 2, 3].include?(b) == true), "is b in 1..3?") # "#));

    let columns: Vec<usize> = analysis
        .lines
        .iter()
        .map(|line| line.find(" # ").unwrap())
        .collect();
    assert!(columns.windows(2).all(|w| w[0] == w[1]), "{:#?}", analysis.lines);

    for (line, message) in analysis.lines.iter().zip(analysis.trace.messages()) {
        assert!(line.ends_with(&format!(" # {message}")), "{line}");
    }
}

#[test]
fn plain_assert_is_a_warning() {
    let analysis = analyze(&table(), "(call nil assert (call nil obj))");
    assert_eq!(messages(&analysis), ["Try to not use plain assert"]);
    assert_eq!(analysis.stop, StopReason::Warning);
    assert_eq!(analysis.lines, ["  assert(obj) # Try to not use plain assert"]);
}

#[test]
fn zero_length_is_empty() {
    let analysis = analyze(
        &table(),
        "(call nil assert_equal (lit 0) (call (call nil obj) length))",
    );
    assert_eq!(print(&analysis.output), "assert_empty(obj)");
}

#[test]
fn empty_collection_literal_is_empty() {
    let table = table();
    for literal in ["(array)", "(hash)"] {
        let source = format!("(call nil assert_equal {literal} (call nil obj))");
        let analysis = analyze(&table, &source);
        assert_eq!(messages(&analysis), ["assert_empty obj"], "{literal}");
        assert_eq!(print(&analysis.output), "assert_empty(obj)");
    }
}

#[test]
fn canonical_forms_are_left_alone() {
    let table = table();
    for source in [
        "(call nil assert_empty (call nil obj))",
        "(call nil assert_includes (call nil a) (call nil b))",
        "(call nil refute_nil (call nil obj))",
        "(call nil assert_in_epsilon (lit 1.5) (call nil x))",
    ] {
        assert!(analyze(&table, source).is_clean(), "{source}");
    }
}

#[test]
fn empty_literal_on_the_actual_side_is_empty() {
    let table = table();
    for (source, swap, empty, output) in [
        (
            "(call nil assert_equal (call nil obj) (array))",
            "assert_equal lit, act",
            "assert_empty obj",
            "assert_empty(obj)",
        ),
        (
            "(call nil refute_equal (call nil obj) (hash))",
            "refute_equal lit, act",
            "refute_empty obj",
            "refute_empty(obj)",
        ),
    ] {
        let analysis = analyze(&table, source);
        assert_eq!(messages(&analysis), [swap, empty], "{source}");
        assert_eq!(print(&analysis.output), output);
    }
}

// =============================================================================
// Literal swaps
// =============================================================================

#[test]
fn nil_true_and_false_move_to_the_expected_side() {
    let table = table();
    let cases: &[(&str, &[&str], &str)] = &[
        (
            "(call nil assert_equal (call nil obj) (nil))",
            &["assert_equal lit, act", "assert_nil obj"],
            "assert_nil(obj)",
        ),
        (
            "(call nil assert_equal (call nil obj) (true))",
            &["assert_equal lit, act"],
            "assert_equal(true, obj)",
        ),
        (
            "(call nil refute_equal (call nil obj) (false))",
            &["refute_equal lit, act"],
            "refute_equal(false, obj)",
        ),
        (
            "(call nil assert_equal (call (call nil obj) empty?) (true))",
            &["assert_equal lit, act", "assert_predicate obj, :pred?", "assert_empty obj"],
            "assert_empty(obj)",
        ),
        (
            "(call nil assert_equal (call (call nil obj) empty?) (false))",
            &["assert_equal lit, act", "refute_predicate obj, :pred?", "refute_empty obj"],
            "refute_empty(obj)",
        ),
    ];
    for &(source, expected, output) in cases {
        let analysis = analyze(&table, source);
        assert_eq!(messages(&analysis), expected, "{source}");
        assert_eq!(print(&analysis.output), output, "{source}");
    }
}

#[test]
fn literals_on_both_sides_are_left_alone() {
    let table = table();
    for source in [
        "(call nil assert_equal (lit 42) (true))",
        "(call nil assert_equal (true) (true))",
        r#"(call nil refute_equal (str "a") (lit 1))"#,
    ] {
        assert!(analyze(&table, source).is_clean(), "{source}");
    }
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn kind_of_swaps_arguments() {
    let analysis = analyze(
        &table(),
        "(call nil refute (call (call nil a) kind_of? (const B)))",
    );
    assert_eq!(
        messages(&analysis),
        ["refute_operator obj, :msg, val", "refute_kind_of mod, obj"]
    );
    assert_eq!(print(&analysis.output), "refute_kind_of(B, a)");
}

#[test]
fn not_equal_flips_polarity() {
    let analysis = analyze(
        &table(),
        "(call nil assert (call (call nil a) != (call nil b)))",
    );
    assert_eq!(
        messages(&analysis),
        ["assert_operator obj, :msg, val", "refute_equal exp, act"]
    );
    assert_eq!(print(&analysis.output), "refute_equal(a, b)");
}

#[test]
fn predicates_specialize() {
    let analysis = analyze(&table(), "(call nil assert (call (call nil obj) nil?))");
    assert_eq!(
        messages(&analysis),
        ["assert_predicate obj, :pred?", "assert_nil obj"]
    );
    assert_eq!(print(&analysis.output), "assert_nil(obj)");
}

// =============================================================================
// Polarity
// =============================================================================

#[test]
fn refutations_never_fire_assert_rules() {
    let table = table();
    for source in [
        "(call nil refute (call (call nil obj) empty?))",
        "(call nil refute (call (call nil a) include? (call nil b)))",
        "(call nil refute_equal (lit 0) (call (call nil obj) size))",
        "(call nil refute (call nil obj))",
    ] {
        let analysis = analyze(&table, source);
        assert!(!analysis.is_clean(), "{source}");
        for message in analysis.trace.messages() {
            assert!(!message.starts_with("assert"), "{source}: {message}");
        }
    }
}

#[test]
fn assertions_never_fire_refute_rules() {
    let table = table();
    for source in [
        "(call nil assert (call (call nil obj) empty?))",
        "(call nil assert (call (call nil a) include? (call nil b)))",
        "(call nil assert_equal (lit 0) (call (call nil obj) size))",
    ] {
        for message in analyze(&table, source).trace.messages() {
            assert!(!message.starts_with("refute"), "{source}: {message}");
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn messages_kept_when_redundant_rule_is_off() {
    let config = LintConfig::default().with_redundant_messages(false);
    let table = standard_table(&config).unwrap();
    assert!(analyze(&table, INCLUDE_EQUAL_TRUE).is_clean());
}

#[test]
fn analysis_is_repeatable() {
    let table = table();
    let engine = RewriteEngine::new(&table);
    let input = read_one(INCLUDE_EQUAL_TRUE).unwrap();
    assert_eq!(engine.analyze(&input).unwrap(), engine.analyze(&input).unwrap());
}
