//! Newline handling

use super::kinds;
use crate::frontend::lexer::TokenKind;

#[cfg(test)]
mod lexer_layout_tests {
    use super::*;
    use TokenKind::*;

    #[test]
    fn test_newline_separates_statements() {
        assert_eq!(
            kinds("write: \"hi\"\nwrite: \"bye\""),
            vec![Keyword, String, Comma, Keyword, String]
        );
    }

    #[test]
    fn test_trailing_operator_continues_line() {
        assert_eq!(kinds("write: 1 +\n  2"), vec![Keyword, Number, Operator, Number]);
    }

    #[test]
    fn test_trailing_keyword_continues_line() {
        assert_eq!(kinds("if: x\n then: y"), vec![Keyword, Name, Comma, Keyword, Name]);
        assert_eq!(kinds("if:\n x"), vec![Keyword, Name]);
    }

    #[test]
    fn test_leading_newlines_are_dropped() {
        assert_eq!(kinds("\n\n\na"), vec![Name]);
    }

    #[test]
    fn test_blank_lines_collapse() {
        assert_eq!(kinds("a\n\n\nb"), vec![Name, Comma, Name]);
    }

    #[test]
    fn test_explicit_comma_after_comma_is_dropped() {
        assert_eq!(kinds("a,\nb"), vec![Name, Comma, Name]);
    }

    #[test]
    fn test_opening_brackets_eat_newlines() {
        assert_eq!(kinds("{\n a\n}"), vec![LeftBrace, Name, Comma, RightBrace]);
        assert_eq!(kinds("[\n x <- 1\n]"), vec![LeftBracket, Name, Arrow, Number, Comma, RightBracket]);
        assert_eq!(kinds("(\na)"), vec![LeftParen, Name, RightParen]);
    }

    #[test]
    fn test_arrow_and_pipe_continue() {
        assert_eq!(kinds("a <-\n 1"), vec![Name, Arrow, Number]);
        assert_eq!(kinds("{ |a|\n a }"), vec![LeftBrace, Pipe, Name, Pipe, Name, RightBrace]);
        assert_eq!(kinds("x foo;\n bar"), vec![Name, Name, Semicolon, Name]);
    }

    #[test]
    fn test_bind_does_not_continue() {
        assert_eq!(kinds("Foo ::\n bar"), vec![Name, Bind, Comma, Name]);
        assert_eq!(kinds("Foo :: bar {}"), vec![Name, Bind, Name, LeftBrace, RightBrace]);
    }

    #[test]
    fn test_backslash_continues_line() {
        assert_eq!(kinds("a \\\n b"), vec![Name, Name]);
    }

    #[test]
    fn test_carriage_returns_are_whitespace() {
        assert_eq!(kinds("a\r\nb"), vec![Name, Comma, Name]);
    }
}
