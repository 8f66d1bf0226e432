#[path = "integration/cli.rs"]
mod cli;
#[path = "integration/error_handling.rs"]
mod error_handling;
#[path = "integration/execution.rs"]
mod execution;
