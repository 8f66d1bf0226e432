//! Executor for generated code
//!
//! Walks the target-code tree. Each function activation gets a fresh scope
//! chained to the scope its block or method was created in; method
//! activations also carry a frame that non-local returns resolve against.

use std::rc::Rc;

use tracing::trace;

use super::object::{Member, Method, Object, Prototype};
use super::scheduler::PromiseCell;
use super::scope::{Frame, Scope};
use super::signal::{ExecResult, RuntimeError, Unwind};
use super::value::{Closure, Promise, Task, Value};
use super::Runtime;
use crate::middle::codegen::{ir, Code, Function, MethodId, Program, Stmt};

/// Where code is running: its scope and its `self`
pub struct Activation {
    pub scope: Rc<Scope>,
    pub receiver: Value,
}

/// Take a queued task's work, marking its promise as running
fn start(cell: &PromiseCell) -> Option<Task> {
    let mut state = cell.borrow_mut();
    match std::mem::replace(&mut *state, Promise::Running) {
        Promise::Pending(task) => Some(task),
        other => {
            *state = other;
            None
        }
    }
}

fn is_pending(cell: &PromiseCell) -> bool {
    cell.borrow().is_pending()
}

/// Close a scope's frame, catching returns addressed to it
fn finish_frame(
    scope: &Scope,
    result: ExecResult<Value>,
) -> ExecResult<Value> {
    let Some(frame) = scope.frame() else {
        return result;
    };
    frame.finish();
    match result {
        Err(Unwind::Return { value, token }) if token == frame.token => Ok(value),
        other => other,
    }
}

impl Runtime {
    pub(super) fn run_unit(
        &mut self,
        program: &Program,
    ) -> ExecResult<Value> {
        let unit = &program.unit;
        let frame = Frame::new(MethodId::PROGRAM, self.fresh_token());
        let scope = Scope::child(&self.globals, Some(frame));

        // Inline programs keep their locals for the next evaluation.
        let declared = if program.inline { &self.globals } else { &scope };
        for local in &unit.locals {
            declared.hoist(&local.mangled);
        }

        let ctx = Activation {
            scope: Rc::clone(&scope),
            receiver: Value::Object(Rc::clone(&self.prims.ether)),
        };
        let result = self.exec_body(&unit.body, &ctx);
        finish_frame(&scope, result)
    }

    fn exec_body(
        &mut self,
        body: &[Stmt],
        ctx: &Activation,
    ) -> ExecResult<Value> {
        let mut last = Value::Nil;
        for stmt in body {
            match stmt {
                Stmt::Expr(code) => last = self.eval(code, ctx)?,
                Stmt::Return(code) => return self.eval(code, ctx),
            }
        }
        Ok(last)
    }

    /// Activate `function` with `receiver` as `self`
    pub fn invoke(
        &mut self,
        function: &Rc<Function>,
        env: &Rc<Scope>,
        receiver: Value,
        args: Vec<Value>,
    ) -> ExecResult<Value> {
        if self.depth >= self.max_depth {
            return Err(RuntimeError::StackOverflow(self.max_depth).into());
        }

        let frame = function.frame().map(|id| Frame::new(id, self.fresh_token()));
        let scope = Scope::child(env, frame);

        let mut args = args.into_iter();
        for param in &function.params {
            scope.declare(&param.mangled, args.next().unwrap_or(Value::Nil));
        }
        for local in &function.locals {
            scope.hoist(&local.mangled);
        }

        let ctx = Activation {
            scope: Rc::clone(&scope),
            receiver,
        };
        self.depth += 1;
        let result = self.exec_body(&function.body, &ctx);
        self.depth -= 1;
        finish_frame(&scope, result)
    }

    /// Call a block value. Calling an async block queues its body and
    /// answers a pending promise.
    pub fn call_block(
        &mut self,
        block: &Value,
        args: Vec<Value>,
    ) -> ExecResult<Value> {
        let Value::Block(closure) = block else {
            return Err(RuntimeError::NotCallable(format!("{:?}", block)).into());
        };
        let closure = Rc::clone(closure);
        if closure.function.is_async {
            return Ok(self.spawn(Task::Call { block: closure, args }));
        }
        self.invoke(&closure.function, &closure.env, closure.receiver.clone(), args)
    }

    /// Queue `task` on the scheduler
    pub fn spawn(
        &mut self,
        task: Task,
    ) -> Value {
        self.scheduler.spawn(task)
    }

    /// Run every queued task, including ones queued along the way
    pub fn run_ready(&mut self) {
        while let Some(cell) = self.scheduler.next_ready() {
            self.run_task(&cell);
        }
    }

    /// Run queued tasks in call order until `target` has been started
    fn run_until_started(
        &mut self,
        target: &PromiseCell,
    ) {
        while is_pending(target) {
            match self.scheduler.next_ready() {
                Some(cell) => self.run_task(&cell),
                None => self.run_task(target),
            }
        }
    }

    /// Run a queued task and settle its promise. Failures reject the
    /// promise; a `return` may not leave the task.
    fn run_task(
        &mut self,
        cell: &PromiseCell,
    ) {
        let Some(task) = start(cell) else {
            return;
        };
        let settled = match self.perform(task) {
            Ok(value) => Promise::Resolved(value),
            Err(Unwind::Error(RuntimeError::Rejected(reason))) => Promise::Rejected(reason),
            Err(Unwind::Error(error)) => Promise::Rejected(error.to_string()),
            Err(Unwind::Return { .. }) => Promise::Rejected(RuntimeError::AsyncReturn.to_string()),
        };
        *cell.borrow_mut() = settled;
    }

    fn perform(
        &mut self,
        task: Task,
    ) -> ExecResult<Value> {
        let value = match task {
            Task::Call { block, args } => self.invoke(&block.function, &block.env, block.receiver.clone(), args)?,
            Task::Then { source, callback } => {
                let settled = self.await_value(source)?;
                self.call_block(&callback, vec![settled])?
            }
        };
        // A promise result is adopted.
        self.await_value(value)
    }

    /// Blocks are called, anything else stands for itself
    pub fn value_of(
        &mut self,
        value: Value,
    ) -> ExecResult<Value> {
        match value {
            Value::Block(_) => self.call_block(&value, Vec::new()),
            other => Ok(other),
        }
    }

    /// Object whose chain answers messages sent to `value`
    pub fn dispatch_target(
        &self,
        value: &Value,
    ) -> Rc<Object> {
        let prims = &self.prims;
        let target = match value {
            Value::Nil => &prims.root,
            Value::Number(_) => &prims.numbers,
            Value::Str(_) => &prims.strings,
            Value::Array(_) => &prims.arrays,
            Value::Block(_) => &prims.blocks,
            Value::Promise(_) => &prims.promises,
            Value::Object(object) => object,
        };
        Rc::clone(target)
    }

    /// Send `selector` to `receiver`
    pub fn send(
        &mut self,
        receiver: &Value,
        selector: &str,
        args: Vec<Value>,
    ) -> ExecResult<Value> {
        trace!("send {} to {:?}", selector, receiver);
        let Some(member) = self.dispatch_target(receiver).resolve(selector) else {
            return Err(RuntimeError::DoesNotUnderstand {
                receiver: format!("{:?}", receiver),
                selector: selector.to_string(),
            }
            .into());
        };

        match member {
            Member::Native(native) => native(self, receiver, args),
            Member::Method(method) => self.invoke(&method.function, &method.env, receiver.clone(), args),
            Member::Accessor(key) => Ok(self.read_field(receiver, &key)),
            Member::Value(value @ Value::Block(_)) => self.call_block(&value, args),
            Member::Value(value) if args.is_empty() => Ok(value),
            Member::Value(value) => Err(RuntimeError::NotCallable(format!("{:?}", value)).into()),
        }
    }

    pub fn read_field(
        &self,
        receiver: &Value,
        key: &str,
    ) -> Value {
        self.dispatch_target(receiver).field(key)
    }

    fn write_field(
        &self,
        receiver: &Value,
        field: &ir::Ident,
        value: Value,
    ) -> ExecResult<()> {
        match receiver {
            Value::Object(object) => {
                object.set_field(&field.mangled, value);
                Ok(())
            }
            other => Err(RuntimeError::FieldOnPrimitive {
                receiver: format!("{:?}", other),
                field: field.source.clone(),
            }
            .into()),
        }
    }

    /// The string a value prints as, asking it via `to-string`
    pub fn to_text(
        &mut self,
        value: &Value,
    ) -> ExecResult<Rc<str>> {
        match self.send(value, "to-string", Vec::new())? {
            Value::Str(text) => Ok(text),
            other => Ok(Rc::from(other.to_string())),
        }
    }

    /// Wait for a promise; other values are already settled. Waiting
    /// yields to queued tasks first.
    pub fn await_value(
        &mut self,
        value: Value,
    ) -> ExecResult<Value> {
        let Value::Promise(promise) = value else {
            return Ok(value);
        };

        if is_pending(&promise) {
            self.run_until_started(&promise);
        }

        let state = promise.borrow().clone();
        match state {
            Promise::Resolved(value) => Ok(value),
            Promise::Rejected(reason) => Err(RuntimeError::Rejected(reason).into()),
            Promise::Pending(_) | Promise::Running => Err(RuntimeError::AwaitRunning.into()),
            Promise::Timer { deadline, value } => {
                self.run_ready();
                self.scheduler.sleep_until(deadline)?;
                *promise.borrow_mut() = Promise::Resolved(value.clone());
                Ok(value)
            }
        }
    }

    /// Evaluate every member first, then merge them all into `object`, so a
    /// failing initializer leaves it untouched
    fn install_members(
        &mut self,
        object: &Rc<Object>,
        members: &[ir::Member],
        ctx: &Activation,
    ) -> ExecResult<()> {
        let mut staged = Vec::with_capacity(members.len());
        for member in members {
            let entry = match member {
                ir::Member::Accessor { selector, field } => {
                    (selector.clone(), Member::Accessor(field.mangled.clone()))
                }
                ir::Member::Field { key, value } => (key.mangled.clone(), Member::Value(self.eval(value, ctx)?)),
                ir::Member::Method { selector, function } => {
                    let method = Method {
                        function: Rc::clone(function),
                        env: Rc::clone(&ctx.scope),
                    };
                    (selector.clone(), Member::Method(Rc::new(method)))
                }
            };
            staged.push(entry);
        }
        object.extend(staged);
        Ok(())
    }

    fn eval_all(
        &mut self,
        codes: &[Code],
        ctx: &Activation,
    ) -> ExecResult<Vec<Value>> {
        codes.iter().map(|code| self.eval(code, ctx)).collect()
    }

    pub fn eval(
        &mut self,
        code: &Code,
        ctx: &Activation,
    ) -> ExecResult<Value> {
        match code {
            Code::Nil => Ok(Value::Nil),
            Code::True => Ok(self.boolean(true)),
            Code::False => Ok(self.boolean(false)),
            Code::Number(n) => Ok(Value::Number(*n)),
            Code::Str(s) => Ok(Value::Str(Rc::clone(s))),
            Code::Local(ident) => ctx
                .scope
                .lookup(&ident.mangled)
                .ok_or_else(|| Unwind::from(RuntimeError::UndefinedVariable(ident.source.clone()))),
            Code::Field(ident) => Ok(self.read_field(&ctx.receiver, &ident.mangled)),
            Code::SelfRef => Ok(ctx.receiver.clone()),
            Code::SetLocal { target, value } => {
                let value = self.eval(value, ctx)?;
                if !ctx.scope.assign(&target.mangled, value.clone()) {
                    ctx.scope.declare(&target.mangled, value.clone());
                }
                Ok(value)
            }
            Code::SetOuter { target, value } => {
                let value = self.eval(value, ctx)?;
                if ctx.scope.assign(&target.mangled, value.clone()) {
                    Ok(value)
                } else {
                    Err(RuntimeError::UnboundAssignment(target.source.clone()).into())
                }
            }
            Code::SetField { target, value } => {
                let value = self.eval(value, ctx)?;
                self.write_field(&ctx.receiver, target, value.clone())?;
                Ok(value)
            }
            Code::Send {
                receiver,
                selector,
                args,
            } => {
                let receiver = match receiver {
                    Some(receiver) => self.eval(receiver, ctx)?,
                    None => Value::Object(Rc::clone(&self.prims.ether)),
                };
                let args = self.eval_all(args, ctx)?;
                self.send(&receiver, selector, args)
            }
            Code::Block(function) => Ok(Value::Block(Rc::new(Closure {
                function: Rc::clone(function),
                env: Rc::clone(&ctx.scope),
                receiver: ctx.receiver.clone(),
            }))),
            Code::Object { parent, members } => {
                let parent = match parent {
                    Some(parent) => match self.eval(parent, ctx)? {
                        Value::Object(object) => object,
                        other => return Err(RuntimeError::InvalidParent(format!("{:?}", other)).into()),
                    },
                    None => Rc::clone(&self.prims.root),
                };
                let object = Object::new(Some(parent));
                self.install_members(&object, members, ctx)?;
                Ok(Value::Object(object))
            }
            Code::Bind { receiver, members } => {
                let target = self.eval(receiver, ctx)?;
                let Value::Object(object) = &target else {
                    return Err(RuntimeError::BindTarget(format!("{:?}", target)).into());
                };
                self.install_members(object, members, ctx)?;
                if Rc::ptr_eq(object, &self.prims.root) {
                    self.bridge_primitives();
                }
                Ok(target)
            }
            Code::Array(elements) => Ok(Value::array(self.eval_all(elements, ctx)?)),
            Code::Sequence(items) => {
                let mut last = Value::Nil;
                for item in items {
                    last = self.eval(item, ctx)?;
                }
                Ok(last)
            }
            Code::Return { value, target } => {
                let value = match value {
                    Some(value) => self.eval(value, ctx)?,
                    None => Value::Nil,
                };
                match ctx.scope.find_frame(*target) {
                    Some(frame) if frame.is_live() => Err(Unwind::Return {
                        value,
                        token: frame.token,
                    }),
                    _ => Err(RuntimeError::StrayReturn.into()),
                }
            }
            Code::Await(value) => {
                let value = self.eval(value, ctx)?;
                self.await_value(value)
            }
        }
    }
}
