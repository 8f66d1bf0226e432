//! Members of the root object, shared with everything by bridging

use std::rc::Rc;

use super::arg;
use crate::runtime::object::Object;
use crate::runtime::signal::ExecResult;
use crate::runtime::value::Value;
use crate::runtime::Runtime;

pub(super) fn install(root: &Object) {
    root.define_native("===", identical);
    root.define_native("to-string", to_string);
    root.define_native("parent", parent);
    root.define_native("+string:", prepend_string);
    root.define_native("not", not);
    root.define_native("&", and);
    root.define_native("|", or);
}

fn identical(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    Ok(rt.boolean(this.same(&arg(&args, 0))))
}

fn to_string(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    match this {
        Value::Str(_) => Ok(this.clone()),
        other => Ok(Value::string(&other.to_string())),
    }
}

/// The root is its own parent; a primitive's parent is its table
fn parent(
    rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    let parent = match this {
        Value::Object(object) => object.parent().cloned().unwrap_or_else(|| Rc::clone(object)),
        other => rt.dispatch_target(other),
    };
    Ok(Value::Object(parent))
}

/// `receiver +string: prefix` answers `prefix` followed by the receiver's text
fn prepend_string(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let prefix = rt.to_text(&arg(&args, 0))?;
    let text = rt.to_text(this)?;
    Ok(Value::string(&format!("{}{}", prefix, text)))
}

/// Logical operators follow truthiness: only `false` and `nil` are false
fn not(
    rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    Ok(rt.boolean(!rt.truthy(this)))
}

fn and(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let result = rt.truthy(this) && rt.truthy(&arg(&args, 0));
    Ok(rt.boolean(result))
}

fn or(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let result = rt.truthy(this) || rt.truthy(&arg(&args, 0));
    Ok(rt.boolean(result))
}
