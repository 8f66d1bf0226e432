//! Array table

use std::cell::RefCell;
use std::rc::Rc;

use super::{arg, as_index};
use crate::runtime::object::Object;
use crate::runtime::signal::{ExecResult, RuntimeError};
use crate::runtime::value::Value;
use crate::runtime::Runtime;

/// Largest length `at:put:` grows an array to
const MAX_ARRAY_LENGTH: usize = 1 << 24;

pub(super) fn install(table: &Object) {
    table.define_native("count", count);
    table.define_native("add:", add);
    table.define_native("at:", at);
    table.define_native("at:put:", at_put);
    table.define_native("removeAt:", remove_at);
}

fn elements(this: &Value) -> ExecResult<&Rc<RefCell<Vec<Value>>>> {
    match this {
        Value::Array(items) => Ok(items),
        other => Err(RuntimeError::type_mismatch("an array", other).into()),
    }
}

fn count(
    _rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    Ok(Value::Number(elements(this)?.borrow().len() as f64))
}

/// Append; answers the new length
fn add(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let mut items = elements(this)?.borrow_mut();
    items.push(arg(&args, 0));
    Ok(Value::Number(items.len() as f64))
}

fn at(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let items = elements(this)?.borrow();
    let found = as_index(&arg(&args, 0))?.and_then(|index| items.get(index).cloned());
    Ok(found.unwrap_or(Value::Nil))
}

/// Store at an index, growing the array with nils as needed, up to
/// `MAX_ARRAY_LENGTH` elements
fn at_put(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let position = arg(&args, 0);
    let Some(index) = as_index(&position)? else {
        return Err(RuntimeError::type_mismatch("a non-negative whole index", &position).into());
    };

    if index >= MAX_ARRAY_LENGTH {
        return Err(RuntimeError::IndexOutOfRange {
            index: format!("{:?}", position),
            limit: MAX_ARRAY_LENGTH,
        }
        .into());
    }

    let value = arg(&args, 1);
    let mut items = elements(this)?.borrow_mut();
    if index >= items.len() {
        items.resize(index + 1, Value::Nil);
    }
    items[index] = value.clone();
    Ok(value)
}

/// Remove and answer the element at an index; nil when out of range
fn remove_at(
    _rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let mut items = elements(this)?.borrow_mut();
    match as_index(&arg(&args, 0))? {
        Some(index) if index < items.len() => Ok(items.remove(index)),
        _ => Ok(Value::Nil),
    }
}
