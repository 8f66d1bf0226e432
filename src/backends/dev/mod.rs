//! Development tools

pub mod repl;
