//! Middle end: lowering the AST into executable target code

pub mod codegen;

pub use codegen::{compile, CodegenContext, CompileError, Program};
