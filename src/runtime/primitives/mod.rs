//! Primitive objects and their native method tables
//!
//! Numbers, strings, arrays, blocks and promises dispatch through standalone
//! tables rather than through the root object. Bridging copies the root's
//! members into each table so that everything answers `to-string`, `===`
//! and whatever user code later binds onto `Object`.

mod arrays;
mod blocks;
mod booleans;
mod ether;
mod numbers;
mod promises;
mod root;
mod strings;

use std::rc::Rc;

use tracing::trace;

use super::object::Object;
use super::signal::{ExecResult, RuntimeError, Unwind};
use super::value::Value;

pub struct Primitives {
    pub root: Rc<Object>,
    pub ether: Rc<Object>,
    pub numbers: Rc<Object>,
    pub strings: Rc<Object>,
    pub arrays: Rc<Object>,
    pub blocks: Rc<Object>,
    pub promises: Rc<Object>,
    pub true_object: Rc<Object>,
    pub false_object: Rc<Object>,
}

impl Primitives {
    pub fn new() -> Self {
        let root = Object::labeled("Object", None);
        let prims = Self {
            ether: Object::labeled("Ether", Some(Rc::clone(&root))),
            numbers: Object::labeled("Numbers", None),
            strings: Object::labeled("Strings", None),
            arrays: Object::labeled("Arrays", None),
            blocks: Object::labeled("Blocks", None),
            promises: Object::labeled("Promises", None),
            true_object: Object::labeled("true", Some(Rc::clone(&root))),
            false_object: Object::labeled("false", Some(Rc::clone(&root))),
            root,
        };

        root::install(&prims.root);
        ether::install(&prims.ether);
        numbers::install(&prims.numbers);
        strings::install(&prims.strings);
        arrays::install(&prims.arrays);
        blocks::install(&prims.blocks);
        promises::install(&prims.promises);
        booleans::install(&prims.true_object);
        booleans::install(&prims.false_object);

        prims.bridge();
        prims
    }

    /// Objects bound as globals, by source name
    pub fn globals(&self) -> Vec<(&'static str, Rc<Object>)> {
        vec![
            ("Object", Rc::clone(&self.root)),
            ("Ether", Rc::clone(&self.ether)),
            ("Numbers", Rc::clone(&self.numbers)),
            ("Strings", Rc::clone(&self.strings)),
            ("Arrays", Rc::clone(&self.arrays)),
            ("Blocks", Rc::clone(&self.blocks)),
            ("Promises", Rc::clone(&self.promises)),
        ]
    }

    fn tables(&self) -> [&Rc<Object>; 5] {
        [&self.numbers, &self.strings, &self.arrays, &self.blocks, &self.promises]
    }

    /// Copy each root member a table does not already have
    pub fn bridge(&self) {
        let members = self.root.members();
        for table in self.tables() {
            let mut copied = 0;
            for (key, member) in &members {
                if table.set_if_absent(key, member.clone()) {
                    copied += 1;
                }
            }
            if copied > 0 {
                trace!("bridged {} root member(s) onto {:?}", copied, table.label());
            }
        }
    }
}

impl Default for Primitives {
    fn default() -> Self {
        Self::new()
    }
}

/// Argument `index`, nil when missing
pub(crate) fn arg(
    args: &[Value],
    index: usize,
) -> Value {
    args.get(index).cloned().unwrap_or(Value::Nil)
}

pub(crate) fn expect_number(value: &Value) -> ExecResult<f64> {
    value
        .as_number()
        .ok_or_else(|| Unwind::from(RuntimeError::type_mismatch("a number", value)))
}

pub(crate) fn expect_string(value: &Value) -> ExecResult<Rc<str>> {
    match value {
        Value::Str(s) => Ok(Rc::clone(s)),
        other => Err(RuntimeError::type_mismatch("a string", other).into()),
    }
}

/// Non-negative whole number as an index; `None` for anything that can
/// never be in bounds
pub(crate) fn as_index(value: &Value) -> ExecResult<Option<usize>> {
    let n = expect_number(value)?;
    // `usize::MAX as f64` rounds up to 2^64, which does not fit.
    if n >= 0.0 && n.fract() == 0.0 && n < usize::MAX as f64 {
        Ok(Some(n as usize))
    } else {
        Ok(None)
    }
}
