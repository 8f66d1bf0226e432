//! Line-based REPL with rustyline
//!
//! Lines accumulate until they form a complete input, then the input is
//! evaluated as a whole.

use std::io;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{Editor, EditMode};
use tracing::warn;

use super::backend_trait::{EvalResult, ReplBackend};
use super::commands::{CommandHandler, CommandResult};
use crate::util::config::ReplConfig;

/// Line REPL configuration
#[derive(Debug, Clone)]
pub struct LineReplConfig {
    /// Prompt to display
    pub prompt: String,
    /// Prompt while an input is still open
    pub continuation_prompt: String,
    /// History file path
    pub history_file: Option<PathBuf>,
    /// Maximum history size
    pub history_size: usize,
    /// Colored values and errors
    pub use_colors: bool,
}

impl Default for LineReplConfig {
    fn default() -> Self {
        Self::from(&ReplConfig::default())
    }
}

impl From<&ReplConfig> for LineReplConfig {
    fn from(config: &ReplConfig) -> Self {
        Self {
            prompt: config.prompt.clone(),
            continuation_prompt: config.continuation_prompt.clone(),
            history_file: config.history_file.clone(),
            history_size: config.history_size,
            use_colors: true,
        }
    }
}

/// Line REPL
pub struct LineRepl<B: ReplBackend> {
    config: LineReplConfig,
    editor: Editor<(), FileHistory>,
    backend: B,
}

impl<B: ReplBackend> LineRepl<B> {
    /// Create a new line REPL
    pub fn new(backend: B) -> io::Result<Self> {
        Self::with_config(backend, LineReplConfig::default())
    }

    /// Create with custom config
    pub fn with_config(
        backend: B,
        config: LineReplConfig,
    ) -> io::Result<Self> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .max_history_size(config.history_size)
            .map_err(readline_error)?
            .edit_mode(EditMode::Emacs)
            .build();

        let mut editor = Editor::with_config(rl_config).map_err(readline_error)?;

        if let Some(history_file) = &config.history_file {
            if history_file.exists() {
                if let Err(e) = editor.load_history(history_file) {
                    warn!("could not load history from {}: {}", history_file.display(), e);
                }
            }
        }

        Ok(Self {
            config,
            editor,
            backend,
        })
    }

    /// Run the REPL until `:quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        println!("Jay {} - Type :help for assistance", crate::VERSION);
        println!("Press Ctrl+D or :quit to exit\n");

        let mut buffer = String::new();

        loop {
            let prompt = if buffer.is_empty() {
                self.config.prompt.clone()
            } else {
                self.config.continuation_prompt.clone()
            };

            let line = match self.editor.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Eof) => break,
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C drops a half-typed input.
                    buffer.clear();
                    println!("(Interrupted)");
                    continue;
                }
                Err(e) => return Err(readline_error(e)),
            };

            if buffer.is_empty() && CommandHandler::<B>::is_command(&line) {
                let _ = self.editor.add_history_entry(line.as_str());
                match CommandHandler::new(&mut self.backend).handle(&line) {
                    CommandResult::Exit => break,
                    CommandResult::Continue => {}
                    CommandResult::Output(message) => println!("{}", message),
                }
                continue;
            }

            if !buffer.is_empty() {
                buffer.push('\n');
            }
            buffer.push_str(&line);

            let result = self.backend.eval(&buffer);
            if let EvalResult::Incomplete = result {
                continue;
            }
            let _ = self.editor.add_history_entry(buffer.as_str());
            buffer.clear();
            self.print_result(result);
        }

        if let Some(history_file) = &self.config.history_file {
            if let Err(e) = self.editor.save_history(history_file) {
                warn!("could not save history to {}: {}", history_file.display(), e);
            }
        }

        Ok(())
    }

    fn print_result(
        &self,
        result: EvalResult,
    ) {
        if let Some(code) = self.backend.generated_code() {
            println!("{}", code);
        }

        match result {
            EvalResult::Value(value) => {
                let text = format!("{:?}", value);
                if self.config.use_colors {
                    println!("{}", text.cyan());
                } else {
                    println!("{}", text);
                }
            }
            EvalResult::Error(message) => {
                if self.config.use_colors {
                    eprintln!("{}", message.red());
                } else {
                    eprintln!("{}", message);
                }
            }
            EvalResult::Ok | EvalResult::Incomplete => {}
        }
    }

    /// Get the backend reference
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn readline_error(error: ReadlineError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("Readline error: {}", error))
}
