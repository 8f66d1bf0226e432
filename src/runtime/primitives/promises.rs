//! Promise table

use super::arg;
use crate::runtime::object::Object;
use crate::runtime::signal::{ExecResult, RuntimeError};
use crate::runtime::value::{Promise, Task, Value};
use crate::runtime::Runtime;

pub(super) fn install(table: &Object) {
    table.define_native("then:", then);
    table.define_native("resolved?", resolved);
}

/// Queue the block to run with the receiver's value once it settles and
/// answer a promise of the block's result. A rejected receiver is answered
/// as is.
fn then(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    let callback = arg(&args, 0);
    if !matches!(callback, Value::Block(_)) {
        return Err(RuntimeError::type_mismatch("a block", &callback).into());
    }
    if let Value::Promise(promise) = this {
        if matches!(*promise.borrow(), Promise::Rejected(_)) {
            return Ok(this.clone());
        }
    }

    Ok(rt.spawn(Task::Then {
        source: this.clone(),
        callback,
    }))
}

fn resolved(
    rt: &mut Runtime,
    this: &Value,
    _args: Vec<Value>,
) -> ExecResult<Value> {
    match this {
        Value::Promise(promise) => {
            let resolved = promise.borrow().is_resolved();
            Ok(rt.boolean(resolved))
        }
        other => Err(RuntimeError::type_mismatch("a promise", other).into()),
    }
}
