//! REPL session: inline compiles against one persistent runtime
//!
//! Every input is compiled in inline mode, so its top-level locals land in
//! the runtime's global scope and stay visible to later inputs.

use std::time::Instant;

use tracing::debug;

use super::backend_trait::{EvalResult, ReplBackend};
use crate::frontend::{compile, CompileFailure, CompileOptions};
use crate::runtime::{Runtime, SharedOutput, Value};
use crate::util::diagnostic::{DiagnosticEmitter, EmitterConfig, TextEmitter};
use crate::util::span::SourceFile;

/// Name inputs are reported under
const INPUT_NAME: &str = "<repl>";

pub struct Session {
    runtime: Runtime,
    /// Captured output, or stdout when `None`
    sink: Option<SharedOutput>,
    show_code: bool,
    last_code: Option<String>,
    emitter: TextEmitter,
    eval_count: usize,
}

impl Session {
    /// Session printing to stdout
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Session whose program output goes to `sink`
    pub fn with_output(sink: SharedOutput) -> Self {
        Self::build(Some(sink))
    }

    fn build(sink: Option<SharedOutput>) -> Self {
        Self {
            runtime: Self::fresh_runtime(sink.as_ref()),
            sink,
            show_code: false,
            last_code: None,
            emitter: TextEmitter::new(),
            eval_count: 0,
        }
    }

    fn fresh_runtime(sink: Option<&SharedOutput>) -> Runtime {
        match sink {
            Some(sink) => Runtime::with_output(Box::new(sink.clone())),
            None => Runtime::new(),
        }
    }

    pub fn set_show_code(
        &mut self,
        show_code: bool,
    ) {
        self.show_code = show_code;
    }

    pub fn set_colors(
        &mut self,
        use_colors: bool,
    ) {
        self.emitter = TextEmitter::with_config(EmitterConfig {
            use_colors,
            ..EmitterConfig::default()
        });
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Number of inputs evaluated since the last reset
    pub fn eval_count(&self) -> usize {
        self.eval_count
    }

    fn report(
        &self,
        failure: &CompileFailure,
        code: &str,
    ) -> String {
        let source = SourceFile::new(INPUT_NAME, code);
        self.emitter.emit(&failure.diagnostics(), Some(&source))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplBackend for Session {
    fn eval(
        &mut self,
        code: &str,
    ) -> EvalResult {
        if code.trim().is_empty() {
            return EvalResult::Ok;
        }
        self.last_code = None;

        let program = match compile(INPUT_NAME, code, CompileOptions::inline()) {
            Ok(program) => program,
            Err(failure) if failure.is_incomplete() => return EvalResult::Incomplete,
            Err(failure) => return EvalResult::Error(self.report(&failure, code)),
        };
        self.last_code = Some(program.to_string());

        let started = Instant::now();
        let result = self.runtime.execute(&program);
        self.eval_count += 1;
        debug!("evaluation #{} took {:?}", self.eval_count, started.elapsed());

        match result {
            Ok(Value::Nil) => EvalResult::Ok,
            Ok(value) => EvalResult::Value(value),
            Err(error) => EvalResult::Error(format!("Error: {}", error)),
        }
    }

    fn generated_code(&self) -> Option<&str> {
        if self.show_code {
            self.last_code.as_deref()
        } else {
            None
        }
    }

    fn toggle_code(&mut self) -> bool {
        self.show_code = !self.show_code;
        self.show_code
    }

    fn reset(&mut self) {
        debug!("resetting REPL session");
        if let Some(sink) = &self.sink {
            sink.clear();
        }
        self.runtime = Self::fresh_runtime(self.sink.as_ref());
        self.last_code = None;
        self.eval_count = 0;
    }
}
