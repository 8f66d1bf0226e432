//! End-to-end programs: compile with the public front door, run on a
//! runtime with captured output

use jay::runtime::SharedOutput;
use jay::{compile, CompileOptions, Runtime};

fn run(source: &str) -> String {
    let program = compile("program.jay", source, CompileOptions::default()).unwrap();
    let output = SharedOutput::new();
    let mut runtime = Runtime::with_output(Box::new(output.clone()));
    runtime.execute(&program).unwrap();
    output.contents()
}

#[test]
fn test_recursive_method_with_early_return() {
    let source = r#"
fib <- [
  of: n {
    if: n < 2 then: { return n }
    (self of: n - 1) + (self of: n - 2)
  }
]
write: (fib of: 15)
"#;
    assert_eq!(run(source), "610\n");
}

#[test]
fn test_prototype_stack() {
    let source = r#"
Stack <- [
  items <- nil
  push: x { _items add: x, self }
  pop { _items removeAt: _items count - 1 }
  size { _items count }
]
new-stack <- { [ |Stack| items <- #[] ] }

s <- new-stack call
s push: 1; push: 2; push: 3
write: s pop
write: s size
other <- new-stack call
write: other size
"#;
    assert_eq!(run(source), "3\n2\n0\n");
}

#[test]
fn test_custom_to_string_and_concatenation() {
    let source = r#"
Animal <- [
  name <- "?"
  sound <- "..."
  speak { self name + " says " + self sound }
  to-string { "<" + self name + ">" }
]
cat <- [ |Animal| name <- "cat", sound <- "meow" ]
write: cat speak
write: cat
write: "pet: " + cat
"#;
    assert_eq!(run(source), "cat says meow\n<cat>\npet: <cat>\n");
}

#[test]
fn test_extending_the_root_object() {
    let source = r#"
Object :: describe { "I am " + self to-string }
write: 3 describe
write: #[1, 2] describe
write: Ether describe
"#;
    assert_eq!(run(source), "I am 3\nI am #[1, 2]\nI am Ether\n");
}

#[test]
fn test_loops_and_closures() {
    let source = r#"
total <- 0
i <- 1
while: { i <= 10 } do: {
  total <-- total + i
  i <-- i + 1
}
write: total

adders <- #[]
do: { adders add: { |x| x + 100 } }
write: ((adders at: 0) call: 5)
"#;
    assert_eq!(run(source), "55\n105\n");
}

#[test]
fn test_async_pipeline() {
    let source = r#"
fetch <- async { |x| await wait: 5, x * 2 }
write: await (fetch call: 21)
p <- (fetch call: 1) then: { |v| v + 1 }
write: await p
"#;
    assert_eq!(run(source), "42\n3\n");
}

#[test]
fn test_inline_session_persistence() {
    let output = SharedOutput::new();
    let mut runtime = Runtime::with_output(Box::new(output.clone()));
    for line in ["counter <- 0", "bump <- { counter <-- counter + 1 }", "bump call, bump call", "write: counter"] {
        let program = compile("<repl>", line, CompileOptions::inline()).unwrap();
        runtime.execute(&program).unwrap();
    }
    assert_eq!(output.contents(), "2\n");
}
