//! Code generation
//!
//! Lowers a parsed `Expr` into a `Program`. The context keeps a stack of the
//! functions being generated (program unit, methods, blocks) so that locals
//! are hoisted into the right one, `return` targets the innermost enclosing
//! method and `await` is checked against the innermost function.

pub mod emit;
pub mod ir;
pub mod mangle;
pub mod tail;

use std::rc::Rc;

use indexmap::IndexSet;
use thiserror::Error;
use tracing::debug;

use crate::frontend::parser::{Block, Define, Expr};
pub use ir::{Code, Function, FunctionKind, Ident, Member, MethodId, Program, Stmt};
use mangle::Mangled;

/// Code generation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("Cannot compile, encountered error: {0}")]
    ErrorNode(String),

    #[error("Cannot assign to '{0}'")]
    InvalidAssignmentTarget(String),

    #[error("Method '{0}' must have a block body")]
    MalformedMethod(String),

    #[error("'await' is only allowed in async blocks")]
    AwaitOutsideAsync,
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Function currently being generated
struct FunctionScope {
    kind: FunctionKind,
    is_async: bool,
    locals: IndexSet<Ident>,
}

/// Per-compile state. Method ids are handed out from `next_id`, so two
/// compiles of the same tree produce the same program.
pub struct CodegenContext {
    inline: bool,
    next_id: u32,
    functions: Vec<FunctionScope>,
}

impl CodegenContext {
    pub fn new(inline: bool) -> Self {
        Self {
            inline,
            next_id: MethodId::PROGRAM.0 + 1,
            functions: Vec::new(),
        }
    }

    /// Generate the program unit for a top-level expression
    pub fn compile_program(
        mut self,
        expr: &Expr,
    ) -> CompileResult<Program> {
        // The program unit may await, like an async block.
        self.enter(FunctionKind::Program, true);
        let body = self.expr(expr);
        let scope = self.leave();
        let body = body?;

        let body = if self.inline {
            tail::as_statements(body)
        } else {
            tail::with_implicit_return(body)
        };

        Ok(Program {
            inline: self.inline,
            unit: Function {
                kind: FunctionKind::Program,
                params: Vec::new(),
                locals: scope.locals.into_iter().collect(),
                body,
                is_async: true,
            },
            methods: self.next_id - 1,
        })
    }

    fn enter(
        &mut self,
        kind: FunctionKind,
        is_async: bool,
    ) {
        self.functions.push(FunctionScope {
            kind,
            is_async,
            locals: IndexSet::new(),
        });
    }

    fn leave(&mut self) -> FunctionScope {
        match self.functions.pop() {
            Some(scope) => scope,
            // enter/leave are always paired
            None => FunctionScope {
                kind: FunctionKind::Program,
                is_async: true,
                locals: IndexSet::new(),
            },
        }
    }

    fn fresh_method_id(&mut self) -> MethodId {
        let id = MethodId(self.next_id);
        self.next_id += 1;
        id
    }

    fn declare_local(
        &mut self,
        ident: &Ident,
    ) {
        if let Some(scope) = self.functions.last_mut() {
            scope.locals.insert(ident.clone());
        }
    }

    /// Method id the innermost enclosing method (or the program) answers to
    fn return_target(&self) -> MethodId {
        self.functions
            .iter()
            .rev()
            .find_map(|scope| match scope.kind {
                FunctionKind::Method(id) => Some(id),
                FunctionKind::Program => Some(MethodId::PROGRAM),
                FunctionKind::Block => None,
            })
            .unwrap_or(MethodId::PROGRAM)
    }

    fn expr(
        &mut self,
        expr: &Expr,
    ) -> CompileResult<Code> {
        match expr {
            Expr::Array(elements) => Ok(Code::Array(self.exprs(elements)?)),
            Expr::Bind { receiver, defines } => Ok(Code::Bind {
                receiver: Box::new(self.expr(receiver)?),
                members: self.defines(defines)?,
            }),
            Expr::Block(block) => Ok(Code::Block(Rc::new(self.block(block, FunctionKind::Block)?))),
            Expr::Message {
                receiver,
                name,
                args,
            } => {
                let receiver = match receiver {
                    Some(receiver) => Some(Box::new(self.expr(receiver)?)),
                    None => None,
                };
                Ok(Code::Send {
                    receiver,
                    selector: name.clone(),
                    args: self.exprs(args)?,
                })
            }
            Expr::Name(name) => Ok(match mangle::mangle(name) {
                Mangled::Nil => Code::Nil,
                Mangled::True => Code::True,
                Mangled::False => Code::False,
                Mangled::Local(ident) => Code::Local(ident),
                Mangled::Field(ident) => Code::Field(ident),
            }),
            Expr::Number(value) => Ok(Code::Number(*value)),
            Expr::Object { parent, defines } => {
                let parent = match parent {
                    Some(parent) => Some(Box::new(self.expr(parent)?)),
                    None => None,
                };
                Ok(Code::Object {
                    parent,
                    members: self.defines(defines)?,
                })
            }
            Expr::SelfRef => Ok(Code::SelfRef),
            Expr::Sequence(exprs) => Ok(Code::Sequence(self.exprs(exprs)?)),
            Expr::Set { name, value } => {
                let value = Box::new(self.expr(value)?);
                match mangle::mangle(name) {
                    Mangled::Local(target) => Ok(Code::SetOuter { target, value }),
                    Mangled::Field(target) => Ok(Code::SetField { target, value }),
                    _ => Err(CompileError::InvalidAssignmentTarget(name.clone())),
                }
            }
            Expr::String(value) => Ok(Code::Str(Rc::from(value.as_str()))),
            Expr::Var { name, value } => {
                let target = mangle::mangle(name);
                if let Mangled::Local(ident) = &target {
                    self.declare_local(ident);
                }
                let value = Box::new(self.expr(value)?);
                match target {
                    Mangled::Local(target) => Ok(Code::SetLocal { target, value }),
                    Mangled::Field(target) => Ok(Code::SetField { target, value }),
                    _ => Err(CompileError::InvalidAssignmentTarget(name.clone())),
                }
            }
            Expr::Return(value) => {
                let value = match value {
                    Some(value) => Some(Box::new(self.expr(value)?)),
                    None => None,
                };
                Ok(Code::Return {
                    value,
                    target: self.return_target(),
                })
            }
            Expr::Await(value) => {
                if !self.functions.last().is_some_and(|scope| scope.is_async) {
                    return Err(CompileError::AwaitOutsideAsync);
                }
                Ok(Code::Await(Box::new(self.expr(value)?)))
            }
            Expr::Error(cause) => Err(CompileError::ErrorNode(cause.clone())),
        }
    }

    fn exprs(
        &mut self,
        exprs: &[Expr],
    ) -> CompileResult<Vec<Code>> {
        exprs.iter().map(|expr| self.expr(expr)).collect()
    }

    /// A block literal or method body as a function with implicit return
    fn block(
        &mut self,
        block: &Block,
        kind: FunctionKind,
    ) -> CompileResult<Function> {
        let is_async = block.is_async && kind == FunctionKind::Block;
        let params = block
            .params
            .iter()
            .map(|param| Ident::new(mangle::escape(param), param.as_str()))
            .collect();

        self.enter(kind, is_async);
        let body = self.expr(&block.body);
        let scope = self.leave();

        Ok(Function {
            kind,
            params,
            locals: scope.locals.into_iter().collect(),
            body: tail::with_implicit_return(body?),
            is_async,
        })
    }

    fn defines(
        &mut self,
        defines: &[Define],
    ) -> CompileResult<Vec<Member>> {
        let mut members = Vec::with_capacity(defines.len());
        for define in defines {
            self.define(define, &mut members)?;
        }
        Ok(members)
    }

    fn define(
        &mut self,
        define: &Define,
        members: &mut Vec<Member>,
    ) -> CompileResult<()> {
        if define.is_method {
            let Expr::Block(block) = &define.body else {
                return Err(CompileError::MalformedMethod(define.name.clone()));
            };
            let id = self.fresh_method_id();
            let function = self.block(block, FunctionKind::Method(id))?;
            members.push(Member::Method {
                selector: define.name.clone(),
                function: Rc::new(function),
            });
            return Ok(());
        }

        let key = mangle::field_key(&define.name);
        if !define.name.starts_with('_') {
            members.push(Member::Accessor {
                selector: define.name.clone(),
                field: key.clone(),
            });
        }
        members.push(Member::Field {
            key,
            value: self.expr(&define.body)?,
        });
        Ok(())
    }
}

/// Generate a program from a parsed tree
pub fn compile(
    expr: &Expr,
    inline: bool,
) -> CompileResult<Program> {
    debug!("generating code (inline: {})", inline);
    let program = CodegenContext::new(inline).compile_program(expr)?;
    debug!("generated {} method(s)", program.methods);
    Ok(program)
}

#[cfg(test)]
mod tests;
