//! Jay Programming Language
//!
//! A small prototype-based, message-passing language. Everything is an
//! object that answers messages; objects inherit from a parent object rather
//! than from a class.
//!
//! # Example
//!
//! ```text
//! Point <- [
//!   x <- 0
//!   y <- 0
//!   + other { [ |Point| x <- _x + other x, y <- _y + other y ] }
//! ]
//! write: (Point + Point) x
//! ```
//!
//! Source goes through the [`frontend`] (lexer and parser), is lowered by
//! [`middle::codegen`] into a [`Program`], and runs on a [`Runtime`].

#![warn(rust_2018_idioms)]

pub mod backends;
pub mod frontend;
pub mod middle;
pub mod runtime;
pub mod util;

use std::fs;
use std::path::Path;

pub use anyhow::{Context, Result};
pub use frontend::{compile, CompileFailure, CompileOptions};
pub use middle::Program;
pub use runtime::{Runtime, RuntimeError, Value};

use tracing::debug;

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "Jay";

/// Compile and run `source` as a whole program, printing to stdout
///
/// # Example
///
/// ```no_run
/// fn main() -> jay::Result<()> {
///     jay::run("write: \"Hello, World!\"")?;
///     Ok(())
/// }
/// ```
pub fn run(source: &str) -> Result<Value> {
    run_named("<input>", source)
}

fn run_named(
    name: &str,
    source: &str,
) -> Result<Value> {
    debug!("run called for {}", name);
    let program = compile(name, source, CompileOptions::default())?;
    let mut runtime = Runtime::new();
    let value = runtime.execute(&program)?;
    debug!("run finished for {}", name);
    Ok(value)
}

/// Run a source file
pub fn run_file(path: &Path) -> Result<Value> {
    let source = fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    run_named(&path.display().to_string(), &source)
}
