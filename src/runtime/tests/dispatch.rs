//! Prototype chains, fields, binds and bridging

use super::{eval_in, run, show};
use crate::frontend::CompileOptions;
use crate::runtime::{Prototype, Runtime, RuntimeError, SharedOutput};

#[cfg(test)]
mod runtime_dispatch_tests {
    use super::*;

    #[test]
    fn test_inherited_method_sees_original_receiver() {
        let source = r#"
Animal <- [
  name <- "animal"
  describe { "I am " + self name }
  sound { _sound }
]
dog <- [ |Animal| name <- "dog", _sound <- "woof" ]
#[dog describe, dog sound, Animal sound, Animal describe]
"#;
        assert_eq!(show(source), r#"#["I am dog", "woof", nil, "I am animal"]"#);
    }

    #[test]
    fn test_property_accessor() {
        assert_eq!(show("c <- [ count <- 3 ]\nc count"), "3");
    }

    #[test]
    fn test_fields_are_not_messages() {
        let error = run("c <- [ count <- 3 ]\nc _count").unwrap_err();
        assert!(matches!(error, RuntimeError::DoesNotUnderstand { ref selector, .. } if selector == "_count"));
    }

    #[test]
    fn test_methods_write_fields_on_receiver() {
        let source = r#"
Counter <- [
  count <- 0
  increment { _count <- _count + 1 }
]
a <- [ |Counter| ]
a increment, a increment
#[a count, Counter count]
"#;
        assert_eq!(show(source), "#[2, 0]");
    }

    #[test]
    fn test_does_not_understand() {
        assert_eq!(
            run("3 frobnicate"),
            Err(RuntimeError::DoesNotUnderstand {
                receiver: "3".into(),
                selector: "frobnicate".into(),
            })
        );
    }

    #[test]
    fn test_bind_mutates_and_returns_receiver() {
        let source = r#"
p <- []
q <- (p :: greet { "hi" })
p :: greet { "hello" }
#[p === q, p greet, q greet]
"#;
        assert_eq!(show(source), r#"#[true, "hello", "hello"]"#);
    }

    #[test]
    fn test_bind_property() {
        assert_eq!(show("p <- []\np :: size <- 4\np size"), "4");
    }

    #[test]
    fn test_root_extensions_reach_primitives() {
        let source = r#"
Object :: twice { #[self, self] }
#[3 twice, "a" twice, #[] twice count, nil twice count]
"#;
        assert_eq!(show(source), r#"#[#[3, 3], #["a", "a"], 2, 2]"#);
    }

    #[test]
    fn test_bridging_is_idempotent() {
        let runtime = Runtime::new();
        let before = runtime.primitives().numbers.members().len();
        runtime.bridge_primitives();
        runtime.bridge_primitives();
        assert_eq!(runtime.primitives().numbers.members().len(), before);
        assert!(runtime.primitives().numbers.has_own_member("to-string"));
    }

    #[test]
    fn test_table_methods_win_over_root() {
        let source = "Object :: count { \"root\" }\n#[\"abc\" count, [] count]";
        assert_eq!(show(source), r#"#[3, "root"]"#);
    }

    #[test]
    fn test_parent_links() {
        assert_eq!(show("[] parent === Object"), "true");
        assert_eq!(show("Object parent === Object"), "true");
        assert_eq!(show("p <- []\n[ |p| ] parent === p"), "true");
        assert_eq!(show("3 parent === Numbers"), "true");
    }

    #[test]
    fn test_type_object_convention() {
        let source = r#"
PointProto <- [
  x <- 0
  y <- 0
  + other { Point x: _x + other x y: _y + other y }
  to-string { "(" + _x + ", " + _y + ")" }
]
Point <- [
  x: x y: y { [ |PointProto| x <- x, y <- y ] }
]
((Point x: 1 y: 2) + (Point x: 3 y: 4)) to-string
"#;
        assert_eq!(show(source), r#""(4, 6)""#);
    }

    #[test]
    fn test_invalid_bind_and_parent() {
        assert!(matches!(run("3 :: x <- 1"), Err(RuntimeError::BindTarget(_))));
        assert!(matches!(run("[ |3| ]"), Err(RuntimeError::InvalidParent(_))));
    }

    #[test]
    fn test_failed_bind_leaves_receiver_untouched() {
        let mut runtime = Runtime::with_output(Box::new(SharedOutput::new()));
        let inline = CompileOptions::inline;
        eval_in(&mut runtime, "o <- [ a <- 1 ]", inline()).unwrap();

        let error = eval_in(&mut runtime, "o :: ( b <- 2, c <- missing )", inline()).unwrap_err();
        assert_eq!(error, RuntimeError::UndefinedVariable("missing".to_string()));
        assert!(matches!(
            eval_in(&mut runtime, "o b", inline()),
            Err(RuntimeError::DoesNotUnderstand { ref selector, .. }) if selector == "b"
        ));
        assert_eq!(eval_in(&mut runtime, "o a", inline()).unwrap().as_number(), Some(1.0));
    }
}
