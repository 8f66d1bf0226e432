//! Rendered source text

use super::{inline, program};

#[cfg(test)]
mod codegen_emit_tests {
    use super::*;

    #[test]
    fn test_whole_program_is_wrapped_in_a_frame() {
        assert_eq!(
            program("1 + 2").to_string(),
            "(function(){\n  try {\n    return ((1)[\"+\"](2));\n  } catch(e) {\n    \
             if (e instanceof ReturnExpr && e.id == 0) { return e.result } else { throw e }\n  }\n})()"
        );
    }

    #[test]
    fn test_inline_program_is_bare() {
        assert_eq!(
            inline("x <- \"hi\"\nwrite: x").to_string(),
            "var $x;\n$x = \"hi\";\n$Ether[\"write:\"]($x);"
        );
    }

    #[test]
    fn test_object_members() {
        assert_eq!(
            inline("[ count <- 0 ]").to_string(),
            "Object.assign(Object.create($Object), {\n  \"count\": function(){ return this.$count },\n  \"$count\": 0,\n});"
        );
        assert_eq!(inline("[]").to_string(), "Object.assign(Object.create($Object), {});");
    }

    #[test]
    fn test_methods_catch_their_own_id() {
        let text = inline("[ m { return 1 } ]").to_string();
        assert!(text.contains("\"m\": (function() {"));
        assert!(text.contains("(()=>{throw new ReturnExpr(1, 1)})()"));
        assert!(text.contains("e.id == 1"));
    }

    #[test]
    fn test_blocks_are_arrow_functions() {
        assert_eq!(inline("{ |a b| a }").to_string(), "(($a, $b) => {\n  return ($a);\n});");
        assert!(inline("async { 1 }").to_string().starts_with("(async () => {"));
    }

    #[test]
    fn test_strings_and_selectors_are_escaped() {
        assert_eq!(inline("\"a\\\"b\"").to_string(), "\"a\\\"b\";");
        assert_eq!(inline("x to-string").to_string(), "($x)[\"to-string\"]();");
    }

    #[test]
    fn test_bind_and_fields() {
        assert_eq!(
            inline("p :: _x <- 1").to_string(),
            "Object.assign($p, {\n  \"$x\": 1,\n});"
        );
        assert_eq!(inline("_x <- _y").to_string(), "this.$x = this.$y;");
    }

    #[test]
    fn test_arrays_and_sequences() {
        assert_eq!(inline("#[]").to_string(), "[];");
        assert_eq!(inline("x <- (1, 2)").to_string(), "var $x;\n$x = (1, 2);");
    }

    #[test]
    fn test_top_level_await_makes_the_unit_async() {
        let text = program("x <- await (wait: 5)\nx").to_string();
        assert!(text.starts_with("(async function(){"), "{}", text);
        assert!(text.contains("await "), "{}", text);
    }

    #[test]
    fn test_await_inside_a_block_leaves_the_unit_sync() {
        let text = program("f <- async { await 1 }").to_string();
        assert!(text.starts_with("(function(){"), "{}", text);
    }
}
