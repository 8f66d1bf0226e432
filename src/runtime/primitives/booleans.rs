//! `true` and `false`
//!
//! `not`, `&` and `|` live on the root, so they reach every value.

use super::arg;
use crate::runtime::object::Object;
use crate::runtime::signal::ExecResult;
use crate::runtime::value::Value;
use crate::runtime::Runtime;

pub(super) fn install(object: &Object) {
    object.define_native("if-true:", if_true);
    object.define_native("if-false:", if_false);
    object.define_native("if-true:if-false:", if_true_if_false);
}

fn if_true(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    if rt.truthy(this) {
        rt.value_of(arg(&args, 0))
    } else {
        Ok(Value::Nil)
    }
}

fn if_false(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    if rt.truthy(this) {
        Ok(Value::Nil)
    } else {
        rt.value_of(arg(&args, 0))
    }
}

fn if_true_if_false(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let branch = if rt.truthy(this) { 0 } else { 1 };
    rt.value_of(arg(&args, branch))
}
