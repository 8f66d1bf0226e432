//! Objects and prototype chains
//!
//! An object is an ordered member map plus at most one parent. Dispatch
//! resolves a selector against the object's own members first and then
//! walks the parent chain.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::scope::Scope;
use super::signal::ExecResult;
use super::value::Value;
use super::Runtime;
use crate::middle::codegen::Function;

/// Built-in method: runtime, receiver, arguments
pub type NativeFn = fn(&mut Runtime, &Value, Vec<Value>) -> ExecResult<Value>;

/// A compiled method and the scope its defining expression ran in
pub struct Method {
    pub function: Rc<Function>,
    pub env: Rc<Scope>,
}

#[derive(Clone)]
pub enum Member {
    /// Stored field value
    Value(Value),
    Method(Rc<Method>),
    Native(NativeFn),
    /// Zero-argument method answering the field under this key
    Accessor(String),
}

impl fmt::Debug for Member {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Member::Value(value) => write!(f, "Value({:?})", value),
            Member::Method(method) => write!(f, "Method({:?})", method.function.kind),
            Member::Native(_) => write!(f, "Native"),
            Member::Accessor(key) => write!(f, "Accessor({})", key),
        }
    }
}

/// Member lookup along a prototype chain
pub trait Prototype {
    fn own_member(
        &self,
        key: &str,
    ) -> Option<Member>;

    fn prototype(&self) -> Option<Rc<Object>>;

    fn has_own_member(
        &self,
        key: &str,
    ) -> bool {
        self.own_member(key).is_some()
    }

    /// Own members first, then each parent in turn
    fn resolve(
        &self,
        key: &str,
    ) -> Option<Member> {
        if let Some(member) = self.own_member(key) {
            return Some(member);
        }

        let mut next = self.prototype();
        while let Some(object) = next {
            if let Some(member) = object.own_member(key) {
                return Some(member);
            }
            next = object.prototype();
        }
        None
    }
}

#[derive(Default)]
pub struct Object {
    parent: Option<Rc<Object>>,
    members: RefCell<IndexMap<String, Member>>,
    /// Printed name of a built-in object
    label: Option<&'static str>,
}

impl Object {
    pub fn new(parent: Option<Rc<Object>>) -> Rc<Self> {
        Rc::new(Self {
            parent,
            ..Self::default()
        })
    }

    pub fn labeled(
        label: &'static str,
        parent: Option<Rc<Object>>,
    ) -> Rc<Self> {
        Rc::new(Self {
            parent,
            label: Some(label),
            ..Self::default()
        })
    }

    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    pub fn parent(&self) -> Option<&Rc<Object>> {
        self.parent.as_ref()
    }

    /// Add or replace a member; last write wins
    pub fn set(
        &self,
        key: impl Into<String>,
        member: Member,
    ) {
        self.members.borrow_mut().insert(key.into(), member);
    }

    /// Merge `members` in order; later entries replace earlier ones
    pub fn extend(
        &self,
        members: Vec<(String, Member)>,
    ) {
        self.members.borrow_mut().extend(members);
    }

    /// Insert only when the key is not already an own member
    pub fn set_if_absent(
        &self,
        key: &str,
        member: Member,
    ) -> bool {
        let mut members = self.members.borrow_mut();
        if members.contains_key(key) {
            return false;
        }
        members.insert(key.to_string(), member);
        true
    }

    pub fn define_native(
        &self,
        selector: &str,
        native: NativeFn,
    ) {
        self.set(selector, Member::Native(native));
    }

    /// Own members in insertion order
    pub fn members(&self) -> Vec<(String, Member)> {
        self.members
            .borrow()
            .iter()
            .map(|(key, member)| (key.clone(), member.clone()))
            .collect()
    }

    /// Field value under `key`, searching the parent chain; nil if missing
    pub fn field(
        &self,
        key: &str,
    ) -> Value {
        match self.resolve(key) {
            Some(Member::Value(value)) => value,
            _ => Value::Nil,
        }
    }

    pub fn set_field(
        &self,
        key: &str,
        value: Value,
    ) {
        self.set(key, Member::Value(value));
    }
}

impl Prototype for Object {
    fn own_member(
        &self,
        key: &str,
    ) -> Option<Member> {
        self.members.borrow().get(key).cloned()
    }

    fn prototype(&self) -> Option<Rc<Object>> {
        self.parent.clone()
    }
}
