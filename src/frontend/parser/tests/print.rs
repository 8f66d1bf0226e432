//! Pretty printer

use super::parse_ok;

#[cfg(test)]
mod parser_print_tests {
    use super::*;

    fn round(source: &str) -> String {
        parse_ok(source).to_string()
    }

    #[test]
    fn test_messages_are_parenthesized() {
        assert_eq!(round("1 + 2 * 3"), "((1 + 2) * 3)");
        assert_eq!(round("dict addKey: 1 value: 2"), "(dict addKey: 1 value: 2)");
        assert_eq!(round("x abs"), "(x abs)");
        assert_eq!(round("write: \"hi\""), "(write: \"hi\")");
    }

    #[test]
    fn test_literals() {
        assert_eq!(round("#[1, \"a\\n\"]"), "#[1, \"a\\n\"]");
        assert_eq!(round("{ |a| a }"), "{ |a| a }");
        assert_eq!(round("async { 1 }"), "async { 1 }");
        assert_eq!(round("[ |Base| x <- 1 ]"), "[ |Base| x <- 1 ]");
    }

    #[test]
    fn test_assignments_and_binds() {
        assert_eq!(round("x <-- 1"), "x <-- 1");
        assert_eq!(round("a <- b <- 2"), "a <- b <- 2");
        assert_eq!(round("Foo :: bar { 1 }"), "Foo :: bar { 1 }");
        assert_eq!(round("Foo :: at: i put: v { v }"), "Foo :: at: i put: v { v }");
        assert_eq!(round("Foo :: + o { o }"), "Foo :: + o { o }");
    }

    #[test]
    fn test_multiline_block() {
        assert_eq!(round("{\n  a <- 1\n  a\n}"), "{\n  a <- 1\n  a\n}");
    }

    #[test]
    fn test_printed_output_reparses() {
        let source = "Point :: (\n  x <- 0\n  + other { x + other x }\n)";
        let printed = round(source);
        assert_eq!(parse_ok(&printed).to_string(), printed);
    }
}
