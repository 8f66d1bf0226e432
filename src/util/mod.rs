//! Utility types and functions

pub mod config;
pub mod diagnostic;
pub mod format;
pub mod logger;
pub mod span;
