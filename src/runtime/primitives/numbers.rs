//! Number table
//!
//! Binary operators take a number argument directly. Any other argument gets
//! a chance to handle the operation through double dispatch: `3 + x` sends
//! `x +number: 3`, and the `<op>number:` forms compute `argument op self`.

use super::{arg, expect_number};
use crate::runtime::object::Object;
use crate::runtime::signal::ExecResult;
use crate::runtime::value::Value;
use crate::runtime::Runtime;

pub(super) fn install(table: &Object) {
    table.define_native("+", add);
    table.define_native("-", subtract);
    table.define_native("*", multiply);
    table.define_native("/", divide);
    table.define_native("<", less);
    table.define_native(">", greater);
    table.define_native("<=", less_equal);
    table.define_native(">=", greater_equal);
    table.define_native("=", equal);
    table.define_native("!=", not_equal);

    table.define_native("+number:", add_number);
    table.define_native("-number:", subtract_number);
    table.define_native("*number:", multiply_number);
    table.define_native("/number:", divide_number);
    table.define_native("<number:", less_number);
    table.define_native(">number:", greater_number);
    table.define_native("<=number:", less_equal_number);
    table.define_native(">=number:", greater_equal_number);
    table.define_native("=number:", equal_number);
    table.define_native("!=number:", not_equal_number);

    table.define_native("mod:", modulo);
    table.define_native("abs", abs);
    table.define_native("neg", neg);
    table.define_native("floor", floor);
    table.define_native("ceiling", ceiling);
    table.define_native("sqrt", sqrt);
    table.define_native("sin", sin);
    table.define_native("cos", cos);
    table.define_native("tan", tan);
    table.define_native("asin", asin);
    table.define_native("acos", acos);
    table.define_native("atan", atan);
}

/// `self op argument`, or the argument's `<op>number:` when it is not a number
fn arithmetic(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
    operator: &str,
    op: fn(f64, f64) -> f64,
) -> ExecResult<Value> {
    let x = expect_number(this)?;
    match arg(&args, 0) {
        Value::Number(y) => Ok(Value::Number(op(x, y))),
        other => rt.send(&other, &format!("{}number:", operator), vec![this.clone()]),
    }
}

fn comparison(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
    operator: &str,
    op: fn(f64, f64) -> bool,
) -> ExecResult<Value> {
    let x = expect_number(this)?;
    match arg(&args, 0) {
        Value::Number(y) => Ok(rt.boolean(op(x, y))),
        other => rt.send(&other, &format!("{}number:", operator), vec![this.clone()]),
    }
}

/// `argument op self`, the receiving side of double dispatch
fn reversed(
    this: &Value,
    args: &[Value],
    op: fn(f64, f64) -> f64,
) -> ExecResult<Value> {
    let x = expect_number(&arg(args, 0))?;
    let y = expect_number(this)?;
    Ok(Value::Number(op(x, y)))
}

fn reversed_comparison(
    rt: &mut Runtime,
    this: &Value,
    args: &[Value],
    op: fn(f64, f64) -> bool,
) -> ExecResult<Value> {
    let x = expect_number(&arg(args, 0))?;
    let y = expect_number(this)?;
    Ok(rt.boolean(op(x, y)))
}

fn unary(
    this: &Value,
    op: fn(f64) -> f64,
) -> ExecResult<Value> {
    Ok(Value::Number(op(expect_number(this)?)))
}

fn add(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    arithmetic(rt, this, args, "+", |x, y| x + y)
}

fn subtract(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    arithmetic(rt, this, args, "-", |x, y| x - y)
}

fn multiply(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    arithmetic(rt, this, args, "*", |x, y| x * y)
}

fn divide(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    arithmetic(rt, this, args, "/", |x, y| x / y)
}

fn less(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    comparison(rt, this, args, "<", |x, y| x < y)
}

fn greater(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    comparison(rt, this, args, ">", |x, y| x > y)
}

fn less_equal(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    comparison(rt, this, args, "<=", |x, y| x <= y)
}

fn greater_equal(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    comparison(rt, this, args, ">=", |x, y| x >= y)
}

/// Equality never dispatches: a number only equals a number
fn equal(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let x = expect_number(this)?;
    Ok(rt.boolean(arg(&args, 0).as_number() == Some(x)))
}

fn not_equal(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let x = expect_number(this)?;
    Ok(rt.boolean(arg(&args, 0).as_number() != Some(x)))
}

fn add_number(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    reversed(this, &args, |x, y| x + y)
}

fn subtract_number(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    reversed(this, &args, |x, y| x - y)
}

fn multiply_number(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    reversed(this, &args, |x, y| x * y)
}

fn divide_number(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    reversed(this, &args, |x, y| x / y)
}

fn less_number(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    reversed_comparison(rt, this, &args, |x, y| x < y)
}

fn greater_number(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    reversed_comparison(rt, this, &args, |x, y| x > y)
}

fn less_equal_number(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    reversed_comparison(rt, this, &args, |x, y| x <= y)
}

fn greater_equal_number(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    reversed_comparison(rt, this, &args, |x, y| x >= y)
}

fn equal_number(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    reversed_comparison(rt, this, &args, |x, y| x == y)
}

fn not_equal_number(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    reversed_comparison(rt, this, &args, |x, y| x != y)
}

fn modulo(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let x = expect_number(this)?;
    let y = expect_number(&arg(&args, 0))?;
    Ok(Value::Number(x % y))
}

fn abs(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, f64::abs)
}

fn neg(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, |x| -x)
}

fn floor(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, f64::floor)
}

fn ceiling(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, f64::ceil)
}

fn sqrt(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, f64::sqrt)
}

fn sin(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, f64::sin)
}

fn cos(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, f64::cos)
}

fn tan(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, f64::tan)
}

fn asin(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, f64::asin)
}

fn acos(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, f64::acos)
}

fn atan(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    unary(this, f64::atan)
}
