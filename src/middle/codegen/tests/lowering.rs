//! Locals, properties, assignments and compile errors

use std::rc::Rc;

use super::{compile_source, inline, program};
use crate::frontend::parser::{parse_source, Define, Expr};
use crate::middle::codegen::{compile, Code, CompileError, Ident, Member, Stmt};

fn local(name: &str) -> Ident {
    Ident::new(format!("${}", name), name)
}

#[cfg(test)]
mod codegen_lowering_tests {
    use super::*;

    #[test]
    fn test_trailing_var_returns_its_name() {
        let program = program("x <- 1");
        assert_eq!(program.unit.locals, vec![local("x")]);
        assert_eq!(
            program.unit.body,
            vec![
                Stmt::Expr(Code::SetLocal {
                    target: local("x"),
                    value: Box::new(Code::Number(1.0)),
                }),
                Stmt::Return(Code::Local(local("x"))),
            ]
        );
    }

    #[test]
    fn test_trailing_expression_is_returned() {
        let program = program("a <- 1\na + 2");
        assert_eq!(program.unit.body.len(), 2);
        assert!(matches!(program.unit.body[0], Stmt::Expr(Code::SetLocal { .. })));
        assert!(matches!(program.unit.body[1], Stmt::Return(Code::Send { .. })));
    }

    #[test]
    fn test_inline_has_no_implicit_return() {
        let program = inline("a <- 1, a");
        assert!(program.inline);
        assert!(program.unit.body.iter().all(|stmt| matches!(stmt, Stmt::Expr(_))));
        assert_eq!(program.unit.body.len(), 2);
    }

    #[test]
    fn test_nested_sequence_is_an_expression() {
        let program = program("x <- (1, 2)");
        let Stmt::Expr(Code::SetLocal { value, .. }) = &program.unit.body[0] else {
            panic!("expected assignment");
        };
        assert_eq!(**value, Code::Sequence(vec![Code::Number(1.0), Code::Number(2.0)]));
    }

    #[test]
    fn test_property_synthesis() {
        let program = program("[ count <- 0 ]");
        let Stmt::Return(Code::Object { parent, members }) = &program.unit.body[0] else {
            panic!("expected object");
        };
        assert!(parent.is_none());
        assert_eq!(
            members,
            &vec![
                Member::Accessor {
                    selector: "count".into(),
                    field: Ident::new("$count", "_count"),
                },
                Member::Field {
                    key: Ident::new("$count", "_count"),
                    value: Code::Number(0.0),
                },
            ]
        );
    }

    #[test]
    fn test_underscore_define_is_field_only() {
        let program = program("[ _hidden <- 1 ]");
        let Stmt::Return(Code::Object { members, .. }) = &program.unit.body[0] else {
            panic!("expected object");
        };
        assert_eq!(members.len(), 1);
        assert!(matches!(&members[0], Member::Field { key, .. } if key.mangled == "$hidden"));
    }

    #[test]
    fn test_block_locals_stay_in_the_block() {
        let program = program("b <- { |n| y <- n }");
        assert_eq!(program.unit.locals, vec![local("b")]);

        let Stmt::Expr(Code::SetLocal { value, .. }) = &program.unit.body[0] else {
            panic!("expected assignment");
        };
        let Code::Block(block) = value.as_ref() else { panic!("expected block") };
        assert_eq!(block.params, vec![local("n")]);
        assert_eq!(block.locals, vec![local("y")]);
        assert_eq!(block.body.last(), Some(&Stmt::Return(Code::Local(local("y")))));
    }

    #[test]
    fn test_field_initializer_locals_hoist_to_enclosing_function() {
        let program = program("[ a <- (t <- 1) ]");
        assert_eq!(program.unit.locals, vec![local("t")]);
    }

    #[test]
    fn test_locals_are_listed_once() {
        let program = program("x <- 1\nx <- 2\ny <- x");
        assert_eq!(program.unit.locals, vec![local("x"), local("y")]);
    }

    #[test]
    fn test_long_assignment_targets() {
        let program = program("{ x <-- 1, _y <-- 2, z <- 3 }");
        let Stmt::Return(Code::Block(block)) = &program.unit.body[0] else {
            panic!("expected block");
        };
        assert!(matches!(&block.body[0], Stmt::Expr(Code::SetOuter { target, .. }) if *target == local("x")));
        assert!(matches!(&block.body[1], Stmt::Expr(Code::SetField { target, .. }) if target.mangled == "$y"));
        assert_eq!(block.locals, vec![local("z")]);
    }

    #[test]
    fn test_literal_names_compile_to_constants() {
        let program = program("#[nil, true, false, self]");
        assert_eq!(
            program.unit.body,
            vec![Stmt::Return(Code::Array(vec![Code::Nil, Code::True, Code::False, Code::SelfRef]))]
        );
    }

    #[test]
    fn test_assigning_literal_names_fails() {
        assert_eq!(
            compile_source("nil <- 3", false),
            Err(CompileError::InvalidAssignmentTarget("nil".into()))
        );
        assert_eq!(
            compile_source("true <-- 3", false),
            Err(CompileError::InvalidAssignmentTarget("true".into()))
        );
    }

    #[test]
    fn test_error_node_aborts_generation() {
        let (expr, errors) = parse_source("test.jay", "a <- )");
        assert!(!errors.is_empty());
        assert!(matches!(compile(&expr, false), Err(CompileError::ErrorNode(_))));
    }

    #[test]
    fn test_method_needs_block_body() {
        let expr = Expr::Object {
            parent: None,
            defines: vec![Define {
                name: "m".into(),
                body: Expr::Number(1.0),
                is_method: true,
            }],
        };
        assert_eq!(compile(&expr, false), Err(CompileError::MalformedMethod("m".into())));
    }

    #[test]
    fn test_await_placement() {
        assert!(compile_source("await wait: 1", false).is_ok());
        assert!(compile_source("async { await wait: 1 }", false).is_ok());
        assert_eq!(
            compile_source("{ await wait: 1 }", false),
            Err(CompileError::AwaitOutsideAsync)
        );
        assert_eq!(
            compile_source("[ m { await wait: 1 } ]", false),
            Err(CompileError::AwaitOutsideAsync)
        );
        assert_eq!(
            compile_source("async { { await wait: 1 } }", false),
            Err(CompileError::AwaitOutsideAsync)
        );
    }

    #[test]
    fn test_strings_are_shared() {
        let program = program("\"hello\"");
        assert_eq!(program.unit.body, vec![Stmt::Return(Code::Str(Rc::from("hello")))]);
    }
}
