//! Expectation rule families (`must_*` and `wont_*`).
//!
//! The structural rules first bring every expectation into the `_(obj)` or
//! `_ { ... }` form. The remaining rules only match that form:
//!
//! 1. `expect(obj)`, `value(obj)`, and bare receivers become `_(obj)`
//! 2. lambdas and procs become `_ { ... }`
//! 3. `*_equal` specializations
//! 4. `*_be :op, val` specializations
//! 5. `*_be_close_to`

use assay_foundation::{Expr, Node, Result, Symbol};

use crate::family::{Family, Polarity, block, expect, sym};

/// Anything that can be wrapped into `_ { ... }`.
const CALLABLE: &str =
    "(iter [any (call nil [m lambda proc]) (call (const Proc) new) (lambda)] _ ___)";

/// A receiver that is not yet in `_(obj)` or `_ { ... }` form.
const BARE: &str = "[? [- [any nil (call nil [m :_ expect value] _) (iter ___)]]]";

/// An operator expressed as `_(obj).must_be :op, val` and its dedicated
/// expectation.
struct Operator {
    ops: &'static [&'static str],
    flips: bool,
    method: &'static str,
}

const OPERATORS: &[Operator] = &[
    Operator { ops: &["=="], flips: false, method: "equal" },
    Operator { ops: &["!="], flips: true, method: "equal" },
    Operator { ops: &["include?", "key?"], flips: false, method: "include" },
    Operator { ops: &["instance_of?"], flips: false, method: "be_instance_of" },
    Operator { ops: &["kind_of?", "is_a?"], flips: false, method: "be_kind_of" },
    Operator { ops: &["===", "=~", "match", "match?"], flips: false, method: "match" },
    Operator { ops: &["!~"], flips: true, method: "match" },
    Operator { ops: &["respond_to?"], flips: false, method: "respond_to" },
    Operator { ops: &["equal?"], flips: false, method: "be_same_as" },
];

/// Registers the expectation families.
///
/// # Errors
/// Returns a configuration error if any rule fails to register.
pub fn install(family: &mut Family<'_>) -> Result<()> {
    for polarity in Polarity::BOTH {
        wrapping(family, polarity)?;
        equality(family, polarity)?;
        be(family, polarity)?;
        close_to(family, polarity)?;
    }
    Ok(())
}

fn wrapping(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let e = polarity.expectation();

    for (args, suffix) in [(" _ ___", " val"), ("", "")] {
        let after = format!("_(obj).{e}_<something>{suffix}");
        family.doco(
            [
                format!("expect(obj).{e}_<something>{suffix}"),
                format!("value(obj).{e}_<something>{suffix}"),
            ],
            &after,
        )?;
        family.rewrite(
            &format!("(call (call nil [m expect value] ?) [? [prefix {e}_]]{args})"),
            &after,
            |expr, c| Some(expect(c.get(0)?.clone(), c.name(1)?.as_str(), args_of(expr))),
        )?;

        let after = format!("_ {{ ... }}.{e}_<something>{suffix}");
        family.doco(
            [
                format!("_(lambda {{ ... }}).{e}_<something>{suffix}"),
                format!("lambda {{ ... }}.{e}_<something>{suffix}"),
                format!("proc {{ ... }}.{e}_<something>{suffix}"),
                format!("Proc.new {{ ... }}.{e}_<something>{suffix}"),
                format!("-> {{ ... }}.{e}_<something>{suffix}"),
            ],
            &after,
        )?;
        family.rewrite(
            &format!(
                "(call [any (call nil :_ [? {CALLABLE}]) [? {CALLABLE}]] [? [prefix {e}_]]{args})"
            ),
            &after,
            |expr, c| {
                let body = c.expr(0)?.children_from(2).cloned();
                Some(Expr::call(block(body), c.name(1)?.clone(), args_of(expr)))
            },
        )?;

        let after = format!("_(obj).{e}_<something>{suffix}");
        family.doco([format!("obj.{e}_<something>{suffix}")], &after)?;
        family.rewrite(
            &format!("(call {BARE} [? [prefix {e}_]]{args})"),
            &after,
            |expr, c| Some(expect(c.get(0)?.clone(), c.name(1)?.as_str(), args_of(expr))),
        )?;
    }
    Ok(())
}

fn equality(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let e = polarity.expectation();

    let after = format!("_(obj).{e}_be_nil");
    family.doco([format!("_(obj).{e}_equal nil")], &after)?;
    family.rewrite(
        &format!("(call (call nil :_ ?) {e}_equal (nil))"),
        &after,
        move |_, c| Some(expect(c.get(0)?.clone(), &format!("{e}_be_nil"), [])),
    )?;

    for (literal, target) in [("true", polarity), ("false", polarity.flip())] {
        let t = target.expectation();

        let after = format!("_(obj).{t}_be :pred?");
        family.doco([format!("_(obj.pred?).{e}_equal {literal}")], &after)?;
        family.rewrite(
            &format!("(call (call nil :_ (call [? [- nil]] ?)) {e}_equal ({literal}))"),
            &after,
            move |_, c| {
                Some(expect(c.get(0)?.clone(), &format!("{t}_be"), [sym(c.name(1)?)]))
            },
        )?;

        let after = format!("_(obj).{t}_be :msg, val");
        family.doco([format!("_(obj.msg(val)).{e}_equal {literal}")], &after)?;
        family.rewrite(
            &format!("(call (call nil :_ (call [? [- nil]] ? ?)) {e}_equal ({literal}))"),
            &after,
            move |_, c| operator(target, c.get(0)?, c.name(1)?, c.get(2)?),
        )?;
    }

    let after = format!("_(obj).{e}_be_empty");
    family.doco(
        ["length", "size", "count"].map(|m| format!("_(obj.{m}).{e}_equal 0")),
        &after,
    )?;
    family.rewrite(
        &format!(
            "(call (call nil :_ (call [? [- nil]] [m length size count])) {e}_equal (lit 0))"
        ),
        &after,
        move |_, c| Some(expect(c.get(0)?.clone(), &format!("{e}_be_empty"), [])),
    )?;
    family.doco(
        [format!("_(obj).{e}_equal []"), format!("_(obj).{e}_equal {{}}")],
        &after,
    )?;
    family.rewrite(
        &format!("(call (call nil :_ ?) {e}_equal ([m array hash]))"),
        &after,
        move |_, c| Some(expect(c.get(0)?.clone(), &format!("{e}_be_empty"), [])),
    )?;

    let after = format!("_(obj).{e}_be_close_to float_lit");
    family.doco([format!("_(obj).{e}_equal float_lit")], &after)?;
    family.rewrite(
        &format!("(call (call nil :_ _) {e}_equal (lit [atom float]))"),
        &after,
        move |expr, _| Some(expr.with_child(1, Node::name(format!("{e}_be_close_to")))),
    )
}

fn be(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let e = polarity.expectation();

    for (pred, method) in [("empty?", "be_empty"), ("nil?", "be_nil")] {
        let target = format!("{e}_{method}");
        family.doco([format!("_(obj).{e}_be :{pred}")], &format!("_(obj).{target}"))?;
        family.rewrite(
            &format!("(call (call nil :_ ?) {e}_be (lit {pred}))"),
            &format!("_(obj).{target}"),
            move |_, c| Some(expect(c.get(0)?.clone(), &target, [])),
        )?;
    }

    let after = format!("_(val).path_{e}_exist");
    family.doco([format!("_(File).{e}_be :exist?, val")], &after)?;
    family.rewrite(
        &format!("(call (call nil :_ (const File)) {e}_be (lit exist?) ?)"),
        &after,
        move |_, c| Some(expect(c.get(0)?.clone(), &format!("path_{e}_exist"), [])),
    )?;

    let after = format!("_(obj).{e}_be_within_epsilon float_lit");
    family.doco([format!("_(obj).{e}_be :==, float_lit")], &after)?;
    family.rewrite(
        &format!("(call (call nil :_ ?) {e}_be (lit ==) [? (lit [atom float])])"),
        &after,
        move |_, c| {
            Some(expect(
                c.get(0)?.clone(),
                &format!("{e}_be_within_epsilon"),
                [c.get(1)?.clone()],
            ))
        },
    )?;

    for op in OPERATORS {
        let target = format!("{}_{}", polarity.flip_if(op.flips).expectation(), op.method);
        let after = format!("_(obj).{target} val");
        family.doco(
            op.ops.iter().map(|o| format!("_(obj).{e}_be :{o}, val")),
            &after,
        )?;
        family.rewrite(
            &format!("(call (call nil :_ ?) {e}_be (lit [m {}]) ?)", op.ops.join(" ")),
            &after,
            move |_, c| Some(expect(c.get(0)?.clone(), &target, [c.get(1)?.clone()])),
        )?;
    }
    Ok(())
}

fn close_to(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let e = polarity.expectation();
    let after = format!("_(obj).{e}_be_within_epsilon float_lit");
    family.doco([format!("_(obj).{e}_be_close_to float_lit")], &after)?;
    family.rewrite(
        &format!("(call (call nil :_ _) {e}_be_close_to ___)"),
        &after,
        move |expr, _| Some(expr.with_child(1, Node::name(format!("{e}_be_within_epsilon")))),
    )
}

/// The arguments of a call, after its receiver and method name.
fn args_of(expr: &Expr) -> Vec<Node> {
    expr.args().cloned().collect()
}

/// `_(obj).must_be :op, val`, declining for indexing.
fn operator(polarity: Polarity, obj: &Node, op: &Symbol, val: &Node) -> Option<Expr> {
    if op.as_str() == "[]" {
        return None;
    }
    Some(expect(
        obj.clone(),
        &format!("{}_be", polarity.expectation()),
        [sym(op), val.clone()],
    ))
}
