//! Implicit-return rewrite
//!
//! Turns a function body into statements. The tail of the body becomes a
//! `Stmt::Return`: a trailing sequence is split into effect statements plus
//! its own tail, and a trailing assignment returns the name it just bound.

use super::ir::{Code, Stmt};

/// Statements for a body whose last value is returned
pub fn with_implicit_return(body: Code) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    push_tail(body, &mut stmts);
    stmts
}

/// Statements for an inline body; the last statement's value is the
/// completion value, so nothing is returned explicitly
pub fn as_statements(body: Code) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    push_effects(body, &mut stmts);
    stmts
}

fn push_tail(
    code: Code,
    stmts: &mut Vec<Stmt>,
) {
    match code {
        Code::Sequence(mut items) => match items.pop() {
            Some(last) => {
                for item in items {
                    push_effects(item, stmts);
                }
                push_tail(last, stmts);
            }
            None => stmts.push(Stmt::Return(Code::Nil)),
        },
        Code::SetLocal { ref target, .. } => {
            let bound = Code::Local(target.clone());
            stmts.push(Stmt::Expr(code));
            stmts.push(Stmt::Return(bound));
        }
        Code::SetField { ref target, .. } => {
            let bound = Code::Field(target.clone());
            stmts.push(Stmt::Expr(code));
            stmts.push(Stmt::Return(bound));
        }
        other => stmts.push(Stmt::Return(other)),
    }
}

fn push_effects(
    code: Code,
    stmts: &mut Vec<Stmt>,
) {
    match code {
        Code::Sequence(items) => {
            for item in items {
                push_effects(item, stmts);
            }
        }
        other => stmts.push(Stmt::Expr(other)),
    }
}
