//! Integration tests for the documentation registry

use assay_engine::{DocoRegistry, Pattern, RewriteOutcome, RuleTable};
use assay_foundation::ErrorKind;

fn registry() -> DocoRegistry {
    let mut doco = DocoRegistry::new();
    doco.declare(["assert obj.empty?"], "assert_empty obj").unwrap();
    doco.declare(
        ["assert_equal 0, obj.size", "assert_equal 0, obj.length"],
        "assert_empty obj",
    )
    .unwrap();
    doco.declare(["assert !obj"], "refute obj").unwrap();
    doco
}

#[test]
fn catalog_groups_by_after_form() {
    assert_eq!(
        registry().catalog(),
        "assert obj.empty?          => assert_empty obj\n\
         assert_equal 0, obj.size   => assert_empty obj\n\
         assert_equal 0, obj.length => assert_empty obj\n\
         \n\
         assert !obj                => refute obj\n"
    );
}

#[test]
fn duplicate_before_forms_are_rejected() {
    let mut doco = registry();
    let err = doco
        .declare(["assert !obj", "assert obj.nil?"], "assert_nil obj")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateDoco(ref b) if b == "assert !obj"));
    assert!(!doco.documents("assert_nil obj"));
    assert_eq!(doco.len(), 4);
}

#[test]
fn lookups() {
    let doco = registry();
    assert_eq!(doco.after_for("assert_equal 0, obj.size"), Some("assert_empty obj"));
    assert_eq!(doco.after_for("assert obj"), None);
    assert_eq!(doco.after_forms(), ["assert_empty obj", "refute obj"]);
}

#[test]
fn coverage_against_another_registry() {
    let mut table = RuleTable::with_doco(registry());
    table
        .register(Pattern::parse("(call nil assert _)").unwrap(), "refute obj", |_, _| {
            RewriteOutcome::Stop
        })
        .unwrap();

    assert!(table.doco().check_coverage(&table).is_empty());
    assert_eq!(DocoRegistry::new().check_coverage(&table), ["refute obj"]);
}
