//! Assertion rule families (`assert_*` and `refute_*`).
//!
//! Each family is registered for `assert` first and then for `refute`, with
//! the same shapes and opposite polarity. Within a polarity the order is:
//!
//! 1. redundant trailing messages (when enabled)
//! 2. negation (`assert !x` => `refute x`)
//! 3. generic unpacking into `*_predicate` / `*_operator`
//! 4. predicate and operator specializations
//! 5. the `*_equal` family
//! 6. `*_in_delta`
//! 7. the plain single-argument warning

use assay_engine::LintConfig;
use assay_foundation::{Expr, Node, Result, Symbol};

use crate::family::{Family, Polarity, const_path, sym};

/// Message for rules that drop a redundant trailing message argument.
pub const REDUNDANT_MESSAGE: &str = "redundant message?";

/// Strings longer than this are compared by prefix instead.
pub const STRING_PREFIX: usize = 20;

/// A literal the equality family prefers on the expected side. Any childless
/// node counts, so `[]` and `{}` move over too.
const LITERAL: &str = "[any (lit _) (str _) (_)]";

/// An operator unpacked into `*_operator obj, :op, val` and its dedicated
/// assertion.
struct Operator {
    ops: &'static [&'static str],
    flips: bool,
    method: &'static str,
    swaps: bool,
    args: &'static str,
}

const OPERATORS: &[Operator] = &[
    Operator { ops: &["=="], flips: false, method: "equal", swaps: false, args: "exp, act" },
    Operator { ops: &["!="], flips: true, method: "equal", swaps: false, args: "exp, act" },
    Operator {
        ops: &["include?", "key?"],
        flips: false,
        method: "includes",
        swaps: false,
        args: "obj, val",
    },
    Operator {
        ops: &["instance_of?"],
        flips: false,
        method: "instance_of",
        swaps: true,
        args: "cls, obj",
    },
    Operator {
        ops: &["kind_of?", "is_a?"],
        flips: false,
        method: "kind_of",
        swaps: true,
        args: "mod, obj",
    },
    Operator {
        ops: &["=~", "===", "match", "match?"],
        flips: false,
        method: "match",
        swaps: false,
        args: "obj, val",
    },
    Operator { ops: &["!~"], flips: true, method: "match", swaps: false, args: "obj, val" },
    Operator {
        ops: &["respond_to?"],
        flips: false,
        method: "respond_to",
        swaps: false,
        args: "obj, val",
    },
    Operator { ops: &["equal?"], flips: false, method: "same", swaps: false, args: "obj, val" },
];

/// Registers the assertion families.
///
/// # Errors
/// Returns a configuration error if any rule fails to register.
pub fn install(family: &mut Family<'_>, config: &LintConfig) -> Result<()> {
    for polarity in Polarity::BOTH {
        if config.redundant_messages {
            redundant_messages(family, polarity)?;
        }
        negation(family, polarity)?;
        unpacking(family, polarity)?;
        predicates(family, polarity)?;
        operators(family, polarity)?;
        equality(family, polarity)?;
        in_delta(family, polarity)?;
        plain(family, polarity)?;
    }
    Ok(())
}

fn redundant_messages(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let p = polarity.assertion();
    family.doco(
        [format!("{p} obj, msg"), format!("{p}_equal exp, act, msg")],
        REDUNDANT_MESSAGE,
    )?;
    family.rewrite(&format!("(call nil {p} _ _)"), REDUNDANT_MESSAGE, |e, _| {
        Some(e.truncated(3))
    })?;
    family.rewrite(&format!("(call nil {p}_equal _ _ _)"), REDUNDANT_MESSAGE, |e, _| {
        Some(e.truncated(4))
    })
}

fn negation(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let (p, n) = (polarity.assertion(), polarity.flip().assertion());
    let after = format!("{n} obj");
    family.doco([format!("{p} ! obj")], &after)?;
    family.rewrite(&format!("(call nil {p} (call ? !))"), &after, move |_, c| {
        Some(Expr::send(n, [c.get(0)?.clone()]))
    })
}

fn unpacking(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let p = polarity.assertion();

    let after = format!("{p}_predicate obj, :pred?");
    family.doco([format!("{p} obj.pred?")], &after)?;
    family.rewrite(&format!("(call nil {p} (call [? [- nil]] ?))"), &after, move |_, c| {
        Some(predicate(polarity, c.get(0)?, c.name(1)?))
    })?;

    let after = format!("{p}_operator obj, :msg, val");
    family.doco([format!("{p} obj.msg(val)")], &after)?;
    family.rewrite(&format!("(call nil {p} (call [? [- nil]] ? ?))"), &after, move |_, c| {
        operator(polarity, c.get(0)?, c.name(1)?, c.get(2)?)
    })
}

fn predicates(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let p = polarity.assertion();
    for (pred, method) in [("empty?", "empty"), ("nil?", "nil")] {
        let target = format!("{p}_{method}");
        let after = format!("{target} obj");
        family.doco(
            [format!("{p} obj.{pred}"), format!("{p}_predicate obj, :{pred}")],
            &after,
        )?;
        family.rewrite(
            &format!("(call nil {p}_predicate ? (lit {pred}))"),
            &after,
            move |_, c| Some(Expr::send(target.as_str(), [c.get(0)?.clone()])),
        )?;
    }
    Ok(())
}

fn operators(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let p = polarity.assertion();

    let after = format!("{p}_path_exists val");
    family.doco([format!("{p} File.exist?(val)")], &after)?;
    family.rewrite(
        &format!("(call nil {p}_operator (const File) (lit exist?) ?)"),
        &after,
        move |_, c| Some(Expr::send(format!("{p}_path_exists"), [c.get(0)?.clone()])),
    )?;

    for op in OPERATORS {
        let target = format!("{}_{}", polarity.flip_if(op.flips).assertion(), op.method);
        let after = format!("{target} {}", op.args);
        family.doco(
            op.ops.iter().map(|o| format!("{p}_operator obj, :{o}, val")),
            &after,
        )?;

        let swaps = op.swaps;
        family.rewrite(
            &format!("(call nil {p}_operator ? (lit [m {}]) ?)", op.ops.join(" ")),
            &after,
            move |_, c| {
                let (obj, val) = (c.get(0)?.clone(), c.get(1)?.clone());
                let args = if swaps { [val, obj] } else { [obj, val] };
                Some(Expr::send(target.as_str(), args))
            },
        )?;
    }
    Ok(())
}

fn equality(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let p = polarity.assertion();

    let after = format!("{p}_nil obj");
    family.doco([format!("{p}_equal nil, obj")], &after)?;
    family.rewrite(&format!("(call nil {p}_equal (nil) ?)"), &after, move |_, c| {
        Some(Expr::send(format!("{p}_nil"), [c.get(0)?.clone()]))
    })?;

    for (literal, target) in [("true", polarity), ("false", polarity.flip())] {
        let t = target.assertion();

        let after = format!("{t}_predicate obj, :pred?");
        family.doco([format!("{p}_equal {literal}, obj.pred?")], &after)?;
        family.rewrite(
            &format!("(call nil {p}_equal ({literal}) (call [? [- nil]] ?))"),
            &after,
            move |_, c| Some(predicate(target, c.get(0)?, c.name(1)?)),
        )?;

        let after = format!("{t}_operator obj, :msg, val");
        family.doco([format!("{p}_equal {literal}, obj.msg(val)")], &after)?;
        family.rewrite(
            &format!("(call nil {p}_equal ({literal}) (call [? [- nil]] ? ?))"),
            &after,
            move |_, c| operator(target, c.get(0)?, c.name(1)?, c.get(2)?),
        )?;
    }

    let after = format!("{p}_instance_of cls, obj");
    family.doco([format!("{p}_equal 'Name', obj.class.name")], &after)?;
    family.rewrite(
        &format!("(call nil {p}_equal (str ?) (call (call ? class) name))"),
        &after,
        move |_, c| {
            let class = const_path(c.get(0)?.as_atom()?.as_str()?)?;
            Some(Expr::send(format!("{p}_instance_of"), [class.into(), c.get(1)?.clone()]))
        },
    )?;

    let after = format!("{p}_includes str, 'substr'");
    family.doco([format!("{p}_equal 'long str', str")], &after)?;
    family.rewrite(&format!("(call nil {p}_equal (str ?) ?)"), &after, move |_, c| {
        let text = c.get(0)?.as_atom()?.as_str()?;
        if text.chars().count() <= STRING_PREFIX {
            return None;
        }
        let prefix: String = text.chars().take(STRING_PREFIX).collect();
        Some(Expr::send(
            format!("{p}_includes"),
            [c.get(1)?.clone(), Expr::str(prefix).into()],
        ))
    })?;

    let after = format!("{p}_in_epsilon float_lit, act");
    family.doco([format!("{p}_equal float_lit, act")], &after)?;
    family.rewrite(
        &format!("(call nil {p}_equal (lit [atom float]) _)"),
        &after,
        move |e, _| Some(e.with_child(1, Node::name(format!("{p}_in_epsilon")))),
    )?;

    let after = format!("{p}_empty obj");
    family.doco(
        ["length", "size", "count"].map(|m| format!("{p}_equal 0, obj.{m}")),
        &after,
    )?;
    family.rewrite(
        &format!("(call nil {p}_equal (lit 0) (call [? [- nil]] [m length size count]))"),
        &after,
        move |_, c| Some(Expr::send(format!("{p}_empty"), [c.get(0)?.clone()])),
    )?;
    family.doco([format!("{p}_equal [], obj"), format!("{p}_equal {{}}, obj")], &after)?;
    family.rewrite(
        &format!("(call nil {p}_equal ([m array hash]) ?)"),
        &after,
        move |_, c| Some(Expr::send(format!("{p}_empty"), [c.get(0)?.clone()])),
    )?;

    let after = format!("{p}_equal lit, act");
    family.doco([format!("{p}_equal act, lit")], &after)?;
    family.rewrite(
        &format!("(call nil {p}_equal [? [- {LITERAL}]] [? {LITERAL}])"),
        &after,
        move |_, c| {
            Some(Expr::send(format!("{p}_equal"), [c.get(1)?.clone(), c.get(0)?.clone()]))
        },
    )
}

fn in_delta(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let p = polarity.assertion();
    let after = format!("{p}_in_epsilon float_lit, act");
    family.doco([format!("{p}_in_delta exp, act")], &after)?;
    family.rewrite(&format!("(call nil {p}_in_delta _ _)"), &after, move |e, _| {
        Some(e.with_child(1, Node::name(format!("{p}_in_epsilon"))))
    })
}

fn plain(family: &mut Family<'_>, polarity: Polarity) -> Result<()> {
    let p = polarity.assertion();
    let warning = format!("Try to not use plain {p}");
    family.doco([format!("{p} obj")], &warning)?;
    family.stop(&format!("(call nil {p} _)"), &warning)
}

/// `assert_predicate obj, :pred`
fn predicate(polarity: Polarity, obj: &Node, pred: &Symbol) -> Expr {
    Expr::send(
        format!("{}_predicate", polarity.assertion()),
        [obj.clone(), sym(pred)],
    )
}

/// `assert_operator obj, :op, val`, declining for indexing.
fn operator(
    polarity: Polarity,
    obj: &Node,
    op: &Symbol,
    val: &Node,
) -> Option<Expr> {
    if op.as_str() == "[]" {
        return None;
    }
    Some(Expr::send(
        format!("{}_operator", polarity.assertion()),
        [obj.clone(), sym(op), val.clone()],
    ))
}
