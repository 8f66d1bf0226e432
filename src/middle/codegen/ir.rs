//! Target code
//!
//! The output of code generation. Every name is mangled, every method knows
//! its compile-time id, every function lists its hoisted locals and implicit
//! returns are explicit `Stmt::Return`s. The runtime executes this tree
//! directly and `emit` renders it as source text.

use std::fmt;
use std::rc::Rc;

/// Compile-time id of a method return frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub u32);

impl MethodId {
    /// The program unit's own frame; per-compile method ids start above it
    pub const PROGRAM: MethodId = MethodId(0);
}

impl fmt::Display for MethodId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mangled name that remembers how it was spelled in source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub mangled: String,
    pub source: String,
}

impl Ident {
    pub fn new(
        mangled: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            mangled: mangled.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// The top-level unit
    Program,
    /// A method body; catches non-local returns tagged with its id
    Method(MethodId),
    /// A block literal; transparent to non-local returns
    Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub kind: FunctionKind,
    pub params: Vec<Ident>,
    /// `<-` targets, declared (as nil) on entry
    pub locals: Vec<Ident>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
}

impl Function {
    /// Return frame id this function establishes, if any
    pub fn frame(&self) -> Option<MethodId> {
        match self.kind {
            FunctionKind::Program => Some(MethodId::PROGRAM),
            FunctionKind::Method(id) => Some(id),
            FunctionKind::Block => None,
        }
    }

    /// Whether the body itself awaits; nested functions do not count
    pub fn awaits(&self) -> bool {
        self.body.iter().any(|stmt| stmt.code().awaits())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Evaluate for effect (or, inline, for the completion value)
    Expr(Code),
    /// Leave the current function with a value
    Return(Code),
}

impl Stmt {
    pub fn code(&self) -> &Code {
        match self {
            Stmt::Expr(code) | Stmt::Return(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Code {
    Nil,
    True,
    False,
    Number(f64),
    Str(Rc<str>),
    Local(Ident),
    Field(Ident),
    SelfRef,
    /// `name <- value` into the current function's scope
    SetLocal {
        target: Ident,
        value: Box<Code>,
    },
    /// `name <-- value` into an existing binding of an enclosing scope
    SetOuter {
        target: Ident,
        value: Box<Code>,
    },
    SetField {
        target: Ident,
        value: Box<Code>,
    },
    /// Dynamic send; no receiver means Ether
    Send {
        receiver: Option<Box<Code>>,
        selector: String,
        args: Vec<Code>,
    },
    Block(Rc<Function>),
    /// New object; no parent means the root object
    Object {
        parent: Option<Box<Code>>,
        members: Vec<Member>,
    },
    /// Merge members into an existing object and yield it
    Bind {
        receiver: Box<Code>,
        members: Vec<Member>,
    },
    Array(Vec<Code>),
    /// Evaluate in order, yielding the last value
    Sequence(Vec<Code>),
    /// Non-local return to the frame of method `target`
    Return {
        value: Option<Box<Code>>,
        target: MethodId,
    },
    Await(Box<Code>),
}

impl Code {
    /// Whether evaluating this code can suspend, not counting the bodies of
    /// blocks and methods it creates
    pub fn awaits(&self) -> bool {
        match self {
            Code::Await(_) => true,
            Code::SetLocal { value, .. } | Code::SetOuter { value, .. } | Code::SetField { value, .. } => value.awaits(),
            Code::Send { receiver, args, .. } => {
                receiver.as_deref().is_some_and(Code::awaits) || args.iter().any(Code::awaits)
            }
            Code::Object { parent, members } => {
                parent.as_deref().is_some_and(Code::awaits) || members.iter().any(Member::awaits)
            }
            Code::Bind { receiver, members } => receiver.awaits() || members.iter().any(Member::awaits),
            Code::Array(items) | Code::Sequence(items) => items.iter().any(Code::awaits),
            Code::Return { value, .. } => value.as_deref().is_some_and(Code::awaits),
            Code::Nil
            | Code::True
            | Code::False
            | Code::Number(_)
            | Code::Str(_)
            | Code::Local(_)
            | Code::Field(_)
            | Code::SelfRef
            | Code::Block(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// Zero-argument method answering a field
    Accessor { selector: String, field: Ident },
    Field { key: Ident, value: Code },
    Method { selector: String, function: Rc<Function> },
}

impl Member {
    /// Key the member is stored under on the object
    pub fn key(&self) -> &str {
        match self {
            Member::Accessor { selector, .. } | Member::Method { selector, .. } => selector,
            Member::Field { key, .. } => &key.mangled,
        }
    }

    fn awaits(&self) -> bool {
        match self {
            Member::Field { value, .. } => value.awaits(),
            Member::Accessor { .. } | Member::Method { .. } => false,
        }
    }
}

/// A compiled translation unit
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Inline programs keep their locals in the session's global scope and
    /// yield the value of their last statement
    pub inline: bool,
    pub unit: Function,
    /// Number of method ids handed out while compiling
    pub methods: u32,
}
