//! Abstract Syntax Tree

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `#[a, b]`
    Array(Vec<Expr>),
    /// `receiver :: defines`
    Bind {
        receiver: Box<Expr>,
        defines: Vec<Define>,
    },
    Block(Block),
    /// `receiver name args`; no receiver means Ether
    Message {
        receiver: Option<Box<Expr>>,
        name: String,
        args: Vec<Expr>,
    },
    Name(String),
    Number(f64),
    /// `[ |parent| defines ]`; no parent means the root object
    Object {
        parent: Option<Box<Expr>>,
        defines: Vec<Define>,
    },
    SelfRef,
    Sequence(Vec<Expr>),
    /// `name <-- value`
    Set {
        name: String,
        value: Box<Expr>,
    },
    String(String),
    /// `name <- value`
    Var {
        name: String,
        value: Box<Expr>,
    },
    Return(Option<Box<Expr>>),
    Await(Box<Expr>),
    /// Placeholder left behind by error recovery
    Error(String),
}

/// `{ |params| body }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub params: Vec<String>,
    pub body: Box<Expr>,
    pub is_async: bool,
}

/// Member definition inside an object literal or a bind
#[derive(Debug, Clone, PartialEq)]
pub struct Define {
    pub name: String,
    /// A `Block` when `is_method` is set
    pub body: Expr,
    pub is_method: bool,
}

impl Expr {
    pub fn message(
        receiver: Option<Expr>,
        name: impl Into<String>,
        args: Vec<Expr>,
    ) -> Self {
        Expr::Message {
            receiver: receiver.map(Box::new),
            name: name.into(),
            args,
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    pub fn block(
        params: Vec<String>,
        body: Expr,
    ) -> Self {
        Expr::Block(Block {
            params,
            body: Box::new(body),
            is_async: false,
        })
    }

    /// Wrap several expressions, leaving a single one bare
    pub fn sequence(mut exprs: Vec<Expr>) -> Self {
        if exprs.len() == 1 {
            exprs.remove(0)
        } else {
            Expr::Sequence(exprs)
        }
    }

    /// Whether an `Error` node appears anywhere in the tree
    pub fn contains_error(&self) -> bool {
        match self {
            Expr::Error(_) => true,
            Expr::Array(items) | Expr::Sequence(items) => items.iter().any(Expr::contains_error),
            Expr::Bind { receiver, defines } => {
                receiver.contains_error() || defines.iter().any(|d| d.body.contains_error())
            }
            Expr::Block(block) => block.body.contains_error(),
            Expr::Message { receiver, args, .. } => {
                receiver.as_deref().is_some_and(Expr::contains_error)
                    || args.iter().any(Expr::contains_error)
            }
            Expr::Object { parent, defines } => {
                parent.as_deref().is_some_and(Expr::contains_error)
                    || defines.iter().any(|d| d.body.contains_error())
            }
            Expr::Set { value, .. } | Expr::Var { value, .. } | Expr::Await(value) => value.contains_error(),
            Expr::Return(value) => value.as_deref().is_some_and(Expr::contains_error),
            Expr::Name(_) | Expr::Number(_) | Expr::SelfRef | Expr::String(_) => false,
        }
    }
}

impl Define {
    pub fn field(
        name: impl Into<String>,
        body: Expr,
    ) -> Self {
        Self {
            name: name.into(),
            body,
            is_method: false,
        }
    }

    pub fn method(
        name: impl Into<String>,
        params: Vec<String>,
        body: Expr,
    ) -> Self {
        Self {
            name: name.into(),
            body: Expr::block(params, body),
            is_method: true,
        }
    }
}

/// Number of arguments a selector takes: one per keyword part, one for an
/// operator, none for a unary name.
pub fn selector_arity(name: &str) -> usize {
    let colons = name.matches(':').count();
    if colons > 0 {
        colons
    } else if name.chars().next().is_some_and(|c| "-+=/<>?~!%^&*".contains(c))
        && !name.chars().any(|c| c.is_ascii_alphabetic() || c == '_')
    {
        1
    } else {
        0
    }
}
