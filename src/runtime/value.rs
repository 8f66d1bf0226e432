//! Runtime values

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use super::object::Object;
use super::scope::Scope;
use crate::middle::codegen::Function;
use crate::util::format::{format_number, quote_string};

/// A Jay value. Numbers, strings, arrays, blocks and promises are native;
/// they dispatch through the bridged primitive tables.
#[derive(Clone)]
pub enum Value {
    Nil,
    Number(f64),
    Str(Rc<str>),
    Array(Rc<RefCell<Vec<Value>>>),
    Block(Rc<Closure>),
    Promise(Rc<RefCell<Promise>>),
    Object(Rc<Object>),
}

/// A block value: compiled function, captured scope and captured `self`
pub struct Closure {
    pub function: Rc<Function>,
    pub env: Rc<Scope>,
    pub receiver: Value,
}

/// Work queued behind a pending promise
#[derive(Clone)]
pub enum Task {
    /// Run an async block with these arguments
    Call { block: Rc<Closure>, args: Vec<Value> },
    /// Settle `source`, then call `callback` with its value
    Then { source: Value, callback: Value },
}

#[derive(Clone)]
pub enum Promise {
    /// Queued on the scheduler, not started yet
    Pending(Task),
    /// Started and not settled yet
    Running,
    Resolved(Value),
    Rejected(String),
    /// Resolves to `value` once `deadline` passes
    Timer { deadline: Instant, value: Value },
}

impl Promise {
    pub fn is_resolved(&self) -> bool {
        match self {
            Promise::Resolved(_) => true,
            Promise::Pending(_) | Promise::Running | Promise::Rejected(_) => false,
            Promise::Timer { deadline, .. } => *deadline <= Instant::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Promise::Pending(_))
    }
}

impl Value {
    pub fn string(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn promise(promise: Promise) -> Self {
        Value::Promise(Rc::new(RefCell::new(promise)))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Identity: numbers and strings by value, everything else by reference
    pub fn same(
        &self,
        other: &Value,
    ) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Block(a), Value::Block(b)) => Rc::ptr_eq(a, b),
            (Value::Promise(a), Value::Promise(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Short name of the value's kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Block(_) => "block",
            Value::Promise(_) => "promise",
            Value::Object(_) => "object",
        }
    }
}

/// Arrays nested deeper than this print as `#[...]`
const MAX_PRINT_DEPTH: usize = 64;

/// Write `value`; `open` holds the arrays currently being printed, so a
/// cycle prints as `#[...]` instead of recursing forever
fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    open: &mut Vec<*const RefCell<Vec<Value>>>,
) -> fmt::Result {
    match value {
        Value::Nil => write!(f, "nil"),
        Value::Number(n) => write!(f, "{}", format_number(*n)),
        Value::Str(s) => write!(f, "{}", s),
        Value::Array(items) => {
            let id = Rc::as_ptr(items);
            if open.contains(&id) || open.len() >= MAX_PRINT_DEPTH {
                return write!(f, "#[...]");
            }
            open.push(id);
            write!(f, "#[")?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i != 0 {
                    write!(f, ", ")?;
                }
                match item {
                    Value::Str(s) => write!(f, "{}", quote_string(s))?,
                    other => write_value(f, other, open)?,
                }
            }
            open.pop();
            write!(f, "]")
        }
        Value::Block(closure) => {
            let prefix = if closure.function.is_async { "async " } else { "" };
            write!(f, "<{}block/{}>", prefix, closure.function.params.len())
        }
        Value::Promise(promise) => match &*promise.borrow() {
            Promise::Resolved(value) => {
                write!(f, "<promise: ")?;
                write_value(f, value, open)?;
                write!(f, ">")
            }
            Promise::Rejected(reason) => write!(f, "<promise rejected: {}>", reason),
            Promise::Pending(_) | Promise::Running | Promise::Timer { .. } => write!(f, "<promise: pending>"),
        },
        Value::Object(object) => match object.label() {
            Some(label) => write!(f, "{}", label),
            None => write!(f, "<object>"),
        },
    }
}

impl fmt::Display for Value {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", quote_string(s)),
            other => write!(f, "{}", other),
        }
    }
}

impl PartialEq for Value {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.same(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
