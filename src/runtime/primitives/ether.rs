//! Ether: the receiver of messages sent without one
//!
//! Output, the control-flow helpers (conditionals and loops taking blocks)
//! and `wait:`.

use std::time::{Duration, Instant};

use super::{arg, expect_number};
use crate::runtime::object::Object;
use crate::runtime::signal::{ExecResult, RuntimeError};
use crate::runtime::value::{Promise, Value};
use crate::runtime::Runtime;

pub(super) fn install(ether: &Object) {
    ether.define_native("write:", write);
    ether.define_native("write-line:", write_line);
    ether.define_native("if:then:", if_then);
    ether.define_native("if:then:else:", if_then_else);
    ether.define_native("while:do:", while_do);
    ether.define_native("do:", run);
    ether.define_native("wait:", wait);
}

fn write(
    rt: &mut Runtime,
    _this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let text = rt.to_text(&arg(&args, 0))?;
    rt.write_line(&text)?;
    Ok(Value::Nil)
}

/// Like `write:` followed by a blank line
fn write_line(
    rt: &mut Runtime,
    _this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let text = rt.to_text(&arg(&args, 0))?;
    rt.write_line(&text)?;
    rt.write_line("")?;
    Ok(Value::Nil)
}

fn if_then(
    rt: &mut Runtime,
    _this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let condition = rt.value_of(arg(&args, 0))?;
    if rt.truthy(&condition) {
        rt.value_of(arg(&args, 1))
    } else {
        Ok(Value::Nil)
    }
}

fn if_then_else(
    rt: &mut Runtime,
    _this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let condition = rt.value_of(arg(&args, 0))?;
    let branch = if rt.truthy(&condition) { 1 } else { 2 };
    rt.value_of(arg(&args, branch))
}

fn while_do(
    rt: &mut Runtime,
    _this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let condition = arg(&args, 0);
    let body = arg(&args, 1);
    loop {
        let test = rt.value_of(condition.clone())?;
        if !rt.truthy(&test) {
            return Ok(Value::Nil);
        }
        rt.value_of(body.clone())?;
    }
}

fn run(
    rt: &mut Runtime,
    _this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    rt.value_of(arg(&args, 0))
}

/// A promise resolving to nil after the given number of milliseconds
fn wait(
    _rt: &mut Runtime,
    _this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let millis = expect_number(&arg(&args, 0))?.max(0.0);
    let deadline = Duration::try_from_secs_f64(millis / 1000.0)
        .ok()
        .and_then(|delay| Instant::now().checked_add(delay))
        .ok_or_else(|| RuntimeError::type_mismatch("a delay in milliseconds", &Value::Number(millis)))?;

    Ok(Value::promise(Promise::Timer {
        deadline,
        value: Value::Nil,
    }))
}
