//! REPL Command Handler
//!
//! Handles special commands starting with ':'.

use super::backend_trait::ReplBackend;

/// Command result
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Exit the REPL
    Exit,
    /// Continue to next input
    Continue,
    /// Output a message
    Output(String),
}

const HELP: &str = "\
Available commands:
  :quit, :q      - Exit the REPL
  :help, :h      - Show this help
  :code          - Toggle printing the generated code
  :reset         - Start over with a fresh environment";

/// Command handler for REPL
pub struct CommandHandler<'a, B: ReplBackend> {
    backend: &'a mut B,
}

impl<'a, B: ReplBackend> CommandHandler<'a, B> {
    /// Create a new command handler
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    /// Whether `line` is a command rather than code
    pub fn is_command(line: &str) -> bool {
        line.trim_start().starts_with(':')
    }

    /// Handle a command
    pub fn handle(
        &mut self,
        line: &str,
    ) -> CommandResult {
        let command = line.trim().trim_start_matches(':');
        let name = command.split_whitespace().next().unwrap_or("");

        match name {
            "quit" | "q" => CommandResult::Exit,
            "help" | "h" => CommandResult::Output(HELP.to_string()),
            "code" => {
                let state = if self.backend.toggle_code() { "on" } else { "off" };
                CommandResult::Output(format!("Generated code display {}", state))
            }
            "reset" => {
                self.backend.reset();
                CommandResult::Output("Environment reset".to_string())
            }
            "" => CommandResult::Continue,
            _ => CommandResult::Output(format!("Unknown command: {} (try :help)", line.trim())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::dev::repl::EvalResult;

    #[derive(Default)]
    struct Recorder {
        show_code: bool,
        resets: usize,
    }

    impl ReplBackend for Recorder {
        fn eval(
            &mut self,
            _code: &str,
        ) -> EvalResult {
            EvalResult::Ok
        }

        fn generated_code(&self) -> Option<&str> {
            None
        }

        fn toggle_code(&mut self) -> bool {
            self.show_code = !self.show_code;
            self.show_code
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    #[test]
    fn test_quit_and_help() {
        let mut backend = Recorder::default();
        let mut handler = CommandHandler::new(&mut backend);
        assert_eq!(handler.handle(":q"), CommandResult::Exit);
        assert_eq!(handler.handle(":quit"), CommandResult::Exit);
        match handler.handle(":help") {
            CommandResult::Output(text) => assert!(text.contains(":reset")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(handler.handle(":"), CommandResult::Continue);
    }

    #[test]
    fn test_code_toggles_backend() {
        let mut backend = Recorder::default();
        let mut handler = CommandHandler::new(&mut backend);
        assert_eq!(handler.handle(":code"), CommandResult::Output("Generated code display on".into()));
        assert_eq!(handler.handle(":code"), CommandResult::Output("Generated code display off".into()));
        assert!(!backend.show_code);
    }

    #[test]
    fn test_reset_and_unknown() {
        let mut backend = Recorder::default();
        let mut handler = CommandHandler::new(&mut backend);
        handler.handle(":reset");
        match handler.handle(":frob") {
            CommandResult::Output(text) => assert!(text.starts_with("Unknown command: :frob")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(backend.resets, 1);
        assert!(CommandHandler::<Recorder>::is_command("  :q"));
        assert!(!CommandHandler::<Recorder>::is_command("x <- 1"));
    }
}
