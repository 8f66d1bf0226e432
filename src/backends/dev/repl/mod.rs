//! REPL Module
//!
//! Interactive compile-and-evaluate for Jay.
//!
//! This module contains:
//! - [`backend_trait::ReplBackend`] - Abstract interface for REPL backends
//! - [`session::Session`] - Inline compiler plus one persistent runtime
//! - [`line::LineRepl`] - Line-based REPL with rustyline
//! - [`commands::CommandHandler`] - Command processor

pub mod backend_trait;
pub mod commands;
pub mod line;
pub mod session;

pub use backend_trait::{EvalResult, ReplBackend};
pub use commands::{CommandHandler, CommandResult};
pub use line::{LineRepl, LineReplConfig};
pub use session::Session;
