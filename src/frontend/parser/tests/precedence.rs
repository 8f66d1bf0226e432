//! Expression ladder

use super::{num, parse_ok, send};
use crate::frontend::parser::Expr;

#[cfg(test)]
mod parser_precedence_tests {
    use super::*;

    #[test]
    fn test_operators_are_flat_and_left_associative() {
        let expr = parse_ok("1 + 2 * 3");
        assert_eq!(
            expr,
            send(send(num(1.0), "+", vec![num(2.0)]), "*", vec![num(3.0)])
        );
    }

    #[test]
    fn test_keyword_parts_accumulate() {
        let expr = parse_ok("dict addKey: 1 value: 2");
        assert_eq!(
            expr,
            send(Expr::name("dict"), "addKey:value:", vec![num(1.0), num(2.0)])
        );
    }

    #[test]
    fn test_keyword_arguments_bind_operators() {
        let expr = parse_ok("a at: 1 + 2 put: b c");
        assert_eq!(
            expr,
            send(
                Expr::name("a"),
                "at:put:",
                vec![
                    send(num(1.0), "+", vec![num(2.0)]),
                    send(Expr::name("b"), "c", vec![]),
                ]
            )
        );
    }

    #[test]
    fn test_unary_binds_tighter_than_operator() {
        let expr = parse_ok("a abs + b neg");
        assert_eq!(
            expr,
            send(
                send(Expr::name("a"), "abs", vec![]),
                "+",
                vec![send(Expr::name("b"), "neg", vec![])]
            )
        );
    }

    #[test]
    fn test_unary_chain_is_left_associative() {
        let expr = parse_ok("x foo bar");
        assert_eq!(expr, send(send(Expr::name("x"), "foo", vec![]), "bar", vec![]));
    }

    #[test]
    fn test_receiverless_keyword_message() {
        let expr = parse_ok("write: \"hi\"");
        assert_eq!(
            expr,
            Expr::message(None, "write:", vec![Expr::String("hi".into())])
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let expr = parse_ok("a <- b <- c <- 4");
        let expected = Expr::Var {
            name: "a".into(),
            value: Box::new(Expr::Var {
                name: "b".into(),
                value: Box::new(Expr::Var {
                    name: "c".into(),
                    value: Box::new(num(4.0)),
                }),
            }),
        };
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_long_assignment() {
        let expr = parse_ok("a <-- 1 + 1");
        assert!(matches!(expr, Expr::Set { ref name, .. } if name == "a"));
    }

    #[test]
    fn test_assignment_value_takes_keyword_message() {
        let expr = parse_ok("x <- list at: 0");
        let Expr::Var { value, .. } = expr else { panic!("expected var") };
        assert_eq!(*value, send(Expr::name("list"), "at:", vec![num(0.0)]));
    }

    #[test]
    fn test_newline_continuation_after_operator() {
        let expr = parse_ok("write: 1 +\n  2");
        assert_eq!(
            expr,
            Expr::message(None, "write:", vec![send(num(1.0), "+", vec![num(2.0)])])
        );
    }

    #[test]
    fn test_newline_separates_expressions() {
        let expr = parse_ok("write: \"hi\"\nwrite: \"bye\"");
        let Expr::Sequence(exprs) = expr else { panic!("expected sequence") };
        assert_eq!(exprs.len(), 2);
    }

    #[test]
    fn test_trailing_separator_is_allowed() {
        let Expr::Sequence(exprs) = parse_ok("a, b,") else { panic!("expected sequence") };
        assert_eq!(exprs, vec![Expr::name("a"), Expr::name("b")]);
    }

    #[test]
    fn test_single_expression_is_not_wrapped() {
        assert_eq!(parse_ok("(42)"), num(42.0));
    }

    #[test]
    fn test_cascade_evaluates_receiver_once() {
        let expr = parse_ok("list add: 1; add: 2; count");
        let Expr::Sequence(exprs) = expr else { panic!("expected sequence") };
        assert_eq!(exprs.len(), 4);
        assert_eq!(
            exprs[0],
            Expr::Var {
                name: "#cascade0".into(),
                value: Box::new(Expr::name("list")),
            }
        );
        let holder = || Expr::name("#cascade0");
        assert_eq!(exprs[1], send(holder(), "add:", vec![num(1.0)]));
        assert_eq!(exprs[2], send(holder(), "add:", vec![num(2.0)]));
        assert_eq!(exprs[3], send(holder(), "count", vec![]));
    }

    #[test]
    fn test_cascade_with_operator_part() {
        let expr = parse_ok("x <- 3 + 4; * 10");
        let Expr::Var { value, .. } = expr else { panic!("expected var") };
        let Expr::Sequence(exprs) = *value else { panic!("expected cascade") };
        assert_eq!(exprs[2], send(Expr::name("#cascade0"), "*", vec![num(10.0)]));
    }

    #[test]
    fn test_receiverless_cascade_targets_ether() {
        let expr = parse_ok("write: 1; write: 2");
        assert_eq!(
            expr,
            Expr::Sequence(vec![
                Expr::message(None, "write:", vec![num(1.0)]),
                Expr::message(None, "write:", vec![num(2.0)]),
            ])
        );
    }

    #[test]
    fn test_return_forms() {
        let Expr::Block(block) = parse_ok("{ return }") else { panic!("expected block") };
        assert_eq!(*block.body, Expr::Return(None));

        let Expr::Block(block) = parse_ok("{ return x + 1 }") else { panic!("expected block") };
        assert_eq!(
            *block.body,
            Expr::Return(Some(Box::new(send(Expr::name("x"), "+", vec![num(1.0)]))))
        );
    }

    #[test]
    fn test_await_takes_keyword_message() {
        let expr = parse_ok("x <- await wait: 10");
        let Expr::Var { value, .. } = expr else { panic!("expected var") };
        assert_eq!(
            *value,
            Expr::Await(Box::new(Expr::message(None, "wait:", vec![num(10.0)])))
        );
    }
}
