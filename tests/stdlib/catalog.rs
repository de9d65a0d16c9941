//! Integration tests for the documentation of the standard families

use assay_engine::LintConfig;
use assay_stdlib::{assertions, install, standard_table};

#[test]
fn every_rule_message_is_documented() {
    for redundant in [true, false] {
        let config = LintConfig::default().with_redundant_messages(redundant);
        let table = standard_table(&config).unwrap();
        assert!(table.doco().check_coverage(&table).is_empty());
    }
}

#[test]
fn every_documented_idiom_has_a_rule() {
    let table = standard_table(&LintConfig::default()).unwrap();
    for after in table.doco().after_forms() {
        assert!(table.messages().any(|m| m == after), "no rule for {after}");
    }
}

#[test]
fn catalog_lists_both_polarities() {
    let table = standard_table(&LintConfig::default()).unwrap();
    let catalog = table.doco().catalog();

    for after in [
        "assert_empty obj",
        "refute_empty obj",
        "assert_includes obj, val",
        "_(obj).must_be_empty",
        "_(obj).wont_be_nil",
        "Try to not use plain assert",
    ] {
        assert!(
            catalog.lines().any(|l| l.ends_with(&format!("=> {after}"))),
            "{after} missing from catalog"
        );
    }
}

#[test]
fn catalog_arrows_line_up() {
    let table = standard_table(&LintConfig::default()).unwrap();
    let catalog = table.doco().catalog();
    let columns: Vec<usize> = catalog
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| l.find(" => ").unwrap())
        .collect();
    assert!(columns.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn disabled_messages_are_not_cataloged() {
    let config = LintConfig::default().with_redundant_messages(false);
    let table = standard_table(&config).unwrap();
    assert!(!table.doco().documents(assertions::REDUNDANT_MESSAGE));
}

#[test]
fn installing_into_a_populated_table_fails() {
    let mut table = standard_table(&LintConfig::default()).unwrap();
    let before = table.len();
    assert!(install(&mut table, &LintConfig::default()).is_err());
    assert!(table.len() >= before);
}
