//! Runtime object model and executor
//!
//! A `Runtime` owns the bootstrap environment generated code relies on: the
//! root object, Ether, the bridged primitive tables and the global scope.
//! It is created once and then executes any number of compiled programs.

pub mod exec;
pub mod object;
pub mod primitives;
pub mod scheduler;
pub mod scope;
pub mod signal;
pub mod value;

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use tracing::debug;

pub use object::{Member, Method, NativeFn, Object, Prototype};
pub use primitives::Primitives;
pub use scope::{Frame, FrameToken, Scope};
pub use signal::{ExecResult, RuntimeError, Unwind};
pub use value::{Closure, Promise, Task, Value};

use crate::middle::codegen::mangle;
use crate::middle::codegen::Program;
use scheduler::Scheduler;

/// Default limit on nested method and block activations. Each activation
/// costs several native frames, so a thread running deep programs needs a
/// stack sized for this many.
pub const MAX_CALL_DEPTH: usize = 4096;

pub struct Runtime {
    globals: Rc<Scope>,
    prims: Primitives,
    output: Box<dyn Write>,
    scheduler: Scheduler,
    next_token: FrameToken,
    depth: usize,
    max_depth: usize,
}

impl Runtime {
    /// Runtime writing to stdout
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    pub fn with_output(output: Box<dyn Write>) -> Self {
        let prims = Primitives::new();
        let globals = Scope::global();
        for (name, object) in prims.globals() {
            globals.declare(&mangle::escape(name), Value::Object(object));
        }

        debug!("runtime bootstrapped with {} globals", globals.names().len());
        Self {
            globals,
            prims,
            output,
            scheduler: Scheduler::new(),
            next_token: 0,
            depth: 0,
            max_depth: MAX_CALL_DEPTH,
        }
    }

    /// Limit nested activations; deeper calls raise `StackOverflow`
    pub fn set_max_depth(
        &mut self,
        max_depth: usize,
    ) {
        self.max_depth = max_depth;
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn primitives(&self) -> &Primitives {
        &self.prims
    }

    pub fn globals(&self) -> &Rc<Scope> {
        &self.globals
    }

    /// Global variable by its source name
    pub fn global(
        &self,
        name: &str,
    ) -> Option<Value> {
        self.globals.lookup(&mangle::escape(name))
    }

    /// Run a compiled program and return its value. Async tasks still
    /// queued when the unit finishes run before this returns.
    pub fn execute(
        &mut self,
        program: &Program,
    ) -> Result<Value, RuntimeError> {
        debug!("executing program (inline: {})", program.inline);
        let result = self.run_unit(program);
        if self.scheduler.ready_count() > 0 {
            debug!("running {} queued task(s)", self.scheduler.ready_count());
        }
        self.run_ready();
        self.output.flush().map_err(|e| RuntimeError::Io(e.to_string()))?;
        match result {
            Ok(value) => Ok(value),
            Err(Unwind::Error(error)) => Err(error),
            Err(Unwind::Return { .. }) => Err(RuntimeError::StrayReturn),
        }
    }

    /// Copy root members each primitive table lacks. Idempotent: members a
    /// table already has are left alone.
    pub fn bridge_primitives(&self) {
        self.prims.bridge();
    }

    pub fn boolean(
        &self,
        value: bool,
    ) -> Value {
        let object = if value { &self.prims.true_object } else { &self.prims.false_object };
        Value::Object(Rc::clone(object))
    }

    /// Everything except `false` and `nil` counts as true
    pub fn truthy(
        &self,
        value: &Value,
    ) -> bool {
        match value {
            Value::Nil => false,
            Value::Object(object) => !Rc::ptr_eq(object, &self.prims.false_object),
            _ => true,
        }
    }

    /// Write one line to the runtime's output
    pub fn write_line(
        &mut self,
        text: &str,
    ) -> Result<(), RuntimeError> {
        writeln!(self.output, "{}", text).map_err(|e| RuntimeError::Io(e.to_string()))
    }

    fn fresh_token(&mut self) -> FrameToken {
        self.next_token += 1;
        self.next_token
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable in-memory output sink
#[derive(Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedOutput {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests;
