//! Block table: `call`, `call:`, `call::` and so on up to ten arguments

use crate::runtime::object::Object;
use crate::runtime::signal::ExecResult;
use crate::runtime::value::Value;
use crate::runtime::Runtime;

const MAX_CALL_ARGS: usize = 10;

pub(super) fn install(table: &Object) {
    table.define_native("call", call);
    for arity in 1..=MAX_CALL_ARGS {
        table.define_native(&format!("call{}", ":".repeat(arity)), call);
    }
}

/// Missing arguments are nil and extra ones are dropped when the block runs
fn call(
    rt: &mut Runtime,
    this: &Value,
    args: Vec<Value>,
) -> ExecResult<Value> {
    rt.call_block(this, args)
}
