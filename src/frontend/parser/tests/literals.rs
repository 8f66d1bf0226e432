//! Objects, arrays, blocks and defines

use super::{num, parse_ok};
use crate::frontend::parser::{Define, Expr};

#[cfg(test)]
mod parser_literals_tests {
    use super::*;

    #[test]
    fn test_empty_object_has_implicit_parent() {
        assert_eq!(
            parse_ok("[]"),
            Expr::Object {
                parent: None,
                defines: vec![],
            }
        );
    }

    #[test]
    fn test_object_with_parent_and_defines() {
        let expr = parse_ok("[ |Base|\n  count <- 0\n  inc { _count <- _count + 1 }\n]");
        let Expr::Object { parent, defines } = expr else { panic!("expected object") };
        assert_eq!(parent.as_deref(), Some(&Expr::name("Base")));
        assert_eq!(defines.len(), 2);
        assert_eq!(defines[0], Define::field("count", num(0.0)));
        assert!(defines[1].is_method);
        assert_eq!(defines[1].name, "inc");
    }

    #[test]
    fn test_operator_and_keyword_methods() {
        let expr = parse_ok("[ + other { other }, at: i put: v { v } ]");
        let Expr::Object { defines, .. } = expr else { panic!("expected object") };
        assert_eq!(defines[0], Define::method("+", vec!["other".into()], Expr::name("other")));
        assert_eq!(
            defines[1],
            Define::method("at:put:", vec!["i".into(), "v".into()], Expr::name("v"))
        );
    }

    #[test]
    fn test_empty_method_body_is_nil() {
        let expr = parse_ok("[ noop {} ]");
        let Expr::Object { defines, .. } = expr else { panic!("expected object") };
        assert_eq!(defines[0], Define::method("noop", vec![], Expr::name("nil")));
    }

    #[test]
    fn test_bind_single_define() {
        let expr = parse_ok("Foo :: bar { 1 }");
        assert_eq!(
            expr,
            Expr::Bind {
                receiver: Box::new(Expr::name("Foo")),
                defines: vec![Define::method("bar", vec![], num(1.0))],
            }
        );
    }

    #[test]
    fn test_bind_group_and_chaining() {
        let expr = parse_ok("Foo :: (\n  a <- 1\n  b { 2 }\n) :: c { 3 }");
        let Expr::Bind { receiver, defines } = expr else { panic!("expected bind") };
        assert_eq!(defines, vec![Define::method("c", vec![], num(3.0))]);
        let Expr::Bind { defines, .. } = *receiver else { panic!("expected inner bind") };
        assert_eq!(defines.len(), 2);
    }

    #[test]
    fn test_empty_bind_group() {
        let expr = parse_ok("x :: ()");
        assert_eq!(
            expr,
            Expr::Bind {
                receiver: Box::new(Expr::name("x")),
                defines: vec![],
            }
        );
    }

    #[test]
    fn test_arrays() {
        assert_eq!(parse_ok("#[]"), Expr::Array(vec![]));
        assert_eq!(
            parse_ok("#[1, 2\n 3]"),
            Expr::Array(vec![num(1.0), num(2.0), num(3.0)])
        );
    }

    #[test]
    fn test_block_with_params() {
        let Expr::Block(block) = parse_ok("{ |a b| a + b }") else { panic!("expected block") };
        assert_eq!(block.params, vec!["a", "b"]);
        assert!(!block.is_async);
    }

    #[test]
    fn test_empty_block_body_is_nil() {
        let Expr::Block(block) = parse_ok("{ |a| }") else { panic!("expected block") };
        assert_eq!(*block.body, Expr::name("nil"));
    }

    #[test]
    fn test_async_block() {
        let Expr::Block(block) = parse_ok("async { await wait: 1 }") else { panic!("expected block") };
        assert!(block.is_async);
    }

    #[test]
    fn test_multiline_block_body() {
        let Expr::Block(block) = parse_ok("{\n  a <- 1\n  a + 1\n}") else { panic!("expected block") };
        let Expr::Sequence(exprs) = *block.body else { panic!("expected sequence") };
        assert_eq!(exprs.len(), 2);
    }

    #[test]
    fn test_message_arity_matches_selector() {
        use crate::frontend::parser::selector_arity;

        fn check(expr: &Expr) {
            if let Expr::Message { name, args, receiver } = expr {
                assert_eq!(selector_arity(name), args.len(), "{}", name);
                if let Some(receiver) = receiver {
                    check(receiver);
                }
                args.iter().for_each(check);
            }
        }

        check(&parse_ok("a b: 1 c: (x + y foo)"));
        check(&parse_ok("(a - 1) to-string"));
    }
}
