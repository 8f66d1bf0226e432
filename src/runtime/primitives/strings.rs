//! String table. Indices count characters, not bytes.

use super::{arg, as_index, expect_number, expect_string};
use crate::runtime::object::Object;
use crate::runtime::signal::ExecResult;
use crate::runtime::value::Value;
use crate::runtime::Runtime;

pub(super) fn install(table: &Object) {
    table.define_native("count", count);
    table.define_native("at:", at);
    table.define_native("from:count:", from_count);
    table.define_native("index-of:", index_of);
    table.define_native("=string:", equal);
    table.define_native("=", equal);
    table.define_native("<", less);
    table.define_native(">", greater);
    table.define_native("<=", less_equal);
    table.define_native(">=", greater_equal);
    table.define_native("+", concat);
}

fn count(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    let text = expect_string(this)?;
    Ok(Value::Number(text.chars().count() as f64))
}

/// One-character string, nil when out of range
fn at(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let text = expect_string(this)?;
    let found = as_index(&arg(&args, 0))?.and_then(|index| text.chars().nth(index));
    Ok(found.map_or(Value::Nil, |c| Value::string(c.encode_utf8(&mut [0; 4]))))
}

/// Substring of `count` characters starting at `from`
fn from_count(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let text = expect_string(this)?;
    let start = expect_number(&arg(&args, 0))?.max(0.0) as usize;
    let length = expect_number(&arg(&args, 1))?.max(0.0) as usize;
    let slice: String = text.chars().skip(start).take(length).collect();
    Ok(Value::string(&slice))
}

/// Character index of the first occurrence, or -1
fn index_of(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let text = expect_string(this)?;
    let needle = expect_string(&arg(&args, 0))?;
    let index = text
        .find(&*needle)
        .map_or(-1.0, |byte| text[..byte].chars().count() as f64);
    Ok(Value::Number(index))
}

fn equal(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let text = expect_string(this)?;
    let same = matches!(arg(&args, 0), Value::Str(other) if other == text);
    Ok(rt.boolean(same))
}

fn ordering(
    rt: &mut Runtime,
    this: &Value,
    args: &[Value],
    op: fn(&str, &str) -> bool,
) -> ExecResult<Value> {
    let left = expect_string(this)?;
    let right = expect_string(&arg(args, 0))?;
    Ok(rt.boolean(op(&left, &right)))
}

fn less(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    ordering(rt, this, &args, |a, b| a < b)
}

fn greater(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    ordering(rt, this, &args, |a, b| a > b)
}

fn less_equal(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    ordering(rt, this, &args, |a, b| a <= b)
}

fn greater_equal(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    ordering(rt, this, &args, |a, b| a >= b)
}

/// `"a" + x` lets `x` decide how to be appended: `x +string: "a"`
fn concat(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    rt.send(&arg(&args, 0), "+string:", vec![this.clone()])
}
