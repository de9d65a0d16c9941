//! Integration tests for the rewrite engine
//!
//! Uses a small hand-built family so each step of the trace is predictable.

use assay_engine::{
    DocoRegistry, Pattern, PlainFormatter, RewriteEngine, RewriteOutcome, RuleTable, StopReason,
};
use assay_foundation::printer::print;
use assay_foundation::{ErrorKind, Expr, SemanticLimit};
use assay_language::read_one;

fn pat(source: &str) -> Pattern {
    Pattern::parse(source).unwrap()
}

fn tree(source: &str) -> Expr {
    read_one(source).unwrap()
}

/// A miniature assertion family.
fn family() -> RuleTable {
    let mut doco = DocoRegistry::new();
    doco.declare(["assert obj, msg"], "redundant message?").unwrap();
    doco.declare(["assert !obj"], "refute obj").unwrap();
    doco.declare(["assert obj.empty?"], "assert_empty obj").unwrap();
    doco.declare(["assert obj"], "Try to not use plain assert").unwrap();

    let mut table = RuleTable::with_doco(doco);
    table
        .register(pat("(call nil assert _ (str _))"), "redundant message?", |e, _| {
            RewriteOutcome::Replace(e.truncated(3))
        })
        .unwrap();
    table
        .register(pat("(call nil assert (call ? !))"), "refute obj", |_, c| {
            c.get(0).cloned().map_or(RewriteOutcome::Decline, |obj| {
                RewriteOutcome::Replace(Expr::send("refute", [obj]))
            })
        })
        .unwrap();
    table
        .register(pat("(call nil assert (call ? empty?))"), "assert_empty obj", |_, c| {
            c.get(0).cloned().map_or(RewriteOutcome::Decline, |obj| {
                RewriteOutcome::Replace(Expr::send("assert_empty", [obj]))
            })
        })
        .unwrap();
    table
        .register(
            pat("(call nil [m assert refute] _)"),
            "Try to not use plain assert",
            |_, _| RewriteOutcome::Stop,
        )
        .unwrap();
    table
}

// =============================================================================
// Terminal States
// =============================================================================

#[test]
fn clean_input_stops_with_no_match() {
    let table = family();
    let input = tree("(call nil assert_equal (lit 1) (call nil x))");
    let analysis = RewriteEngine::new(&table).analyze(&input).unwrap();

    assert!(analysis.is_clean());
    assert_eq!(analysis.stop, StopReason::NoMatch);
    assert_eq!(analysis.output, input);
    assert!(analysis.lines.is_empty());
}

#[test]
fn rewrites_reach_a_normal_form() {
    let table = family();
    let analysis = RewriteEngine::new(&table)
        .analyze(&tree("(call nil assert (call (call nil x) empty?) (str \"m\"))"))
        .unwrap();

    assert_eq!(
        analysis.trace.messages().collect::<Vec<_>>(),
        ["redundant message?", "assert_empty obj"]
    );
    assert_eq!(analysis.stop, StopReason::NoMatch);
    assert_eq!(print(&analysis.output), "assert_empty(x)");
}

#[test]
fn stops_record_the_current_expression() {
    let table = family();
    let analysis = RewriteEngine::new(&table)
        .analyze(&tree(
            "(call nil assert (call (call (call nil x) empty?) !) (str \"msg\"))",
        ))
        .unwrap();

    assert_eq!(analysis.stop, StopReason::Warning);
    assert_eq!(print(&analysis.output), "refute(x.empty?)");
    let last = analysis.trace.iter().last().unwrap();
    assert_eq!(last.expr, analysis.output);
    assert_eq!(last.message, "Try to not use plain assert");
}

#[test]
fn trace_lines_align_comments() {
    let table = family();
    let analysis = RewriteEngine::new(&table)
        .analyze(&tree(
            "(call nil assert (call (call (call nil x) empty?) !) (str \"msg\"))",
        ))
        .unwrap();

    assert_eq!(
        analysis.lines,
        [
            r#"  assert(!x.empty?, "msg") # redundant message?"#,
            "  assert(!x.empty?)        # refute obj",
            "  refute(x.empty?)         # Try to not use plain assert",
        ]
    );
}

#[test]
fn formatter_is_pluggable() {
    let table = family();
    let analysis = RewriteEngine::new(&table)
        .with_formatter(PlainFormatter::new())
        .analyze(&tree("(call nil assert (call (call nil x) empty?))"))
        .unwrap();
    assert_eq!(analysis.lines, ["assert_empty obj: assert(x.empty?)"]);
}

// =============================================================================
// Faults
// =============================================================================

fn ping_pong() -> RuleTable {
    let mut doco = DocoRegistry::new();
    doco.declare(["ping"], "pong").unwrap();
    let mut table = RuleTable::with_doco(doco);
    table
        .register(pat("(call nil ping)"), "pong", |_, _| {
            RewriteOutcome::Replace(Expr::send("pong", []))
        })
        .unwrap();
    table
        .register(pat("(call nil pong)"), "pong", |_, _| {
            RewriteOutcome::Replace(Expr::send("ping", []))
        })
        .unwrap();
    table
}

#[test]
fn revisiting_an_expression_faults() {
    let table = ping_pong();
    let err = RewriteEngine::new(&table)
        .analyze(&Expr::send("ping", []))
        .unwrap_err();
    assert!(err.is_fault());
    assert!(matches!(err.kind, ErrorKind::DuplicateRewrite { .. }));
}

#[test]
fn runaway_growth_hits_the_ceiling() {
    let mut doco = DocoRegistry::new();
    doco.declare(["grow"], "grow more").unwrap();
    let mut table = RuleTable::with_doco(doco);
    table
        .register(pat("(call nil grow ___)"), "grow more", |e, _| {
            let mut children: Vec<_> = e.children().iter().cloned().collect();
            children.push(Expr::lit(1).into());
            RewriteOutcome::Replace(Expr::new("call", children))
        })
        .unwrap();

    let err = RewriteEngine::new(&table)
        .with_max_rewrites(5)
        .analyze(&Expr::send("grow", []))
        .unwrap_err();
    match err.kind {
        ErrorKind::LimitExceeded(SemanticLimit::MaxRewrites { limit, context }) => {
            assert_eq!(limit, 5);
            assert_eq!(context.as_deref(), Some("grow more"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn faults_are_isolated_per_call() {
    let table = ping_pong();
    let engine = RewriteEngine::new(&table);
    let inputs = [
        Expr::send("ping", []),
        Expr::send("other", []),
        Expr::send("ping", []),
    ];
    let results = engine.analyze_all(&inputs);

    assert!(results[0].is_err());
    assert!(results[1].as_ref().unwrap().is_clean());
    assert!(results[2].is_err());
}
