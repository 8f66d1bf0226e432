//! Front ends built on the compiler and runtime

pub mod dev;
