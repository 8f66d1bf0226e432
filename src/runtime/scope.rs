//! Lexical scopes and method frames

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;

use super::value::Value;
use crate::middle::codegen::MethodId;

/// Identifies one activation of a method
pub type FrameToken = u64;

/// Return frame of a running method (or program unit)
#[derive(Debug)]
pub struct Frame {
    pub method: MethodId,
    pub token: FrameToken,
    live: Cell<bool>,
}

impl Frame {
    pub fn new(
        method: MethodId,
        token: FrameToken,
    ) -> Self {
        Self {
            method,
            token,
            live: Cell::new(true),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    /// Mark the activation as returned; later returns to it are stray
    pub fn finish(&self) {
        self.live.set(false);
    }
}

/// Variables of one function activation, chained to the enclosing scope
#[derive(Debug, Default)]
pub struct Scope {
    vars: RefCell<IndexMap<String, Value>>,
    parent: Option<Rc<Scope>>,
    frame: Option<Frame>,
}

impl Scope {
    pub fn global() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn child(
        parent: &Rc<Scope>,
        frame: Option<Frame>,
    ) -> Rc<Self> {
        Rc::new(Self {
            vars: RefCell::default(),
            parent: Some(Rc::clone(parent)),
            frame,
        })
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn declare(
        &self,
        name: &str,
        value: Value,
    ) {
        self.vars.borrow_mut().insert(name.to_string(), value);
    }

    /// Declare `name` as nil unless this scope already has it
    pub fn hoist(
        &self,
        name: &str,
    ) {
        self.vars.borrow_mut().entry(name.to_string()).or_insert(Value::Nil);
    }

    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<Value> {
        if let Some(value) = self.vars.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    /// Overwrite the nearest existing binding; false if there is none
    pub fn assign(
        &self,
        name: &str,
        value: Value,
    ) -> bool {
        if let Some(slot) = self.vars.borrow_mut().get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.parent {
            Some(parent) => parent.assign(name, value),
            None => false,
        }
    }

    /// Innermost frame for `method` along the lexical chain
    pub fn find_frame(
        &self,
        method: MethodId,
    ) -> Option<&Frame> {
        match &self.frame {
            Some(frame) if frame.method == method => Some(frame),
            _ => self.parent.as_deref().and_then(|parent| parent.find_frame(method)),
        }
    }

    /// Names bound directly in this scope, in declaration order
    pub fn names(&self) -> Vec<String> {
        self.vars.borrow().keys().cloned().collect()
    }
}
