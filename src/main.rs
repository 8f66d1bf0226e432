//! Jay Programming Language - CLI

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use jay::backends::dev::repl::{LineRepl, LineReplConfig, Session};
use jay::frontend::parser::parse_source;
use jay::frontend::{compile, CompileFailure, CompileOptions};
use jay::util::config::{default_history_path, Config};
use jay::util::diagnostic::{Diagnostic, DiagnosticEmitter, EmitterConfig, ErrorFormat, JsonEmitter, TextEmitter};
use jay::util::logger::{self, LogLevel};
use jay::runtime::MAX_CALL_DEPTH;
use jay::util::span::SourceFile;
use jay::{Program, Runtime, Value, NAME, VERSION};

/// Parse or compile failure (sysexits EX_DATAERR)
const EXIT_COMPILE: u8 = 65;
/// Runtime failure (EX_SOFTWARE)
const EXIT_RUNTIME: u8 = 70;
/// Unreadable input or broken terminal (EX_IOERR)
const EXIT_IO: u8 = 74;

/// Stack of the thread commands run on. Deep Jay recursion stops at
/// `MAX_CALL_DEPTH` activations, which has to fit in here.
const STACK_SIZE: usize = 256 * 1024 * 1024;

/// A small prototype-based, message-passing language
#[derive(Parser, Debug)]
#[command(name = "jay")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Source file to run; starts the REPL when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// How to print errors
    #[arg(long, value_enum, global = true)]
    error_format: Option<ErrorFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a Jay source file
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the code generated for a source file
    Compile {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Generate REPL-style code (bare statements, shared globals)
        #[arg(long)]
        inline: bool,
    },

    /// Parse and compile a source file without running it
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the parsed syntax tree of a source file
    Ast {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Evaluate Jay code from the command line
    Eval {
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Start the interactive REPL
    Repl,
}

/// Why a command stopped; its diagnostics are already printed
struct Exit(u8);

/// Shared state for every command: configuration and error rendering
struct Driver {
    config: Config,
    format: ErrorFormat,
    colors: bool,
}

impl Driver {
    fn new(
        args: &Args,
        config: Config,
    ) -> Self {
        let format = args.error_format.unwrap_or(config.diagnostics.format);
        let colors = !args.no_color && config.diagnostics.colors && std::io::stderr().is_terminal();
        Self { config, format, colors }
    }

    fn report(
        &self,
        diagnostics: &[Diagnostic],
        source: Option<&SourceFile>,
    ) {
        let rendered = match self.format {
            ErrorFormat::Json => JsonEmitter.emit(diagnostics, source),
            ErrorFormat::Text => {
                let emitter = TextEmitter::with_config(EmitterConfig {
                    use_colors: self.colors,
                    ..EmitterConfig::default()
                });
                emitter.emit(diagnostics, source)
            }
        };
        eprint!("{}", rendered);
        if !rendered.ends_with('\n') {
            eprintln!();
        }
    }

    fn read(
        &self,
        path: &Path,
    ) -> Result<SourceFile, Exit> {
        match read_source(path) {
            Ok(source) => Ok(source),
            Err(error) => {
                eprintln!("error: {:#}", error);
                Err(Exit(EXIT_IO))
            }
        }
    }

    fn compile(
        &self,
        source: &SourceFile,
        options: CompileOptions,
    ) -> Result<Program, Exit> {
        compile(&source.name, &source.content, options).map_err(|failure: CompileFailure| {
            self.report(&failure.diagnostics(), Some(source));
            Exit(EXIT_COMPILE)
        })
    }

    fn execute(
        &self,
        program: &Program,
    ) -> Result<Value, Exit> {
        let mut runtime = Runtime::new();
        runtime.execute(program).map_err(|error| {
            self.report(&[error.diagnostic()], None);
            Exit(EXIT_RUNTIME)
        })
    }

    fn run_file(
        &self,
        path: &Path,
    ) -> Result<(), Exit> {
        let source = self.read(path)?;
        let program = self.compile(&source, CompileOptions::default())?;
        self.execute(&program)?;
        Ok(())
    }

    fn dispatch(
        &self,
        command: Commands,
    ) -> Result<(), Exit> {
        match command {
            Commands::Run { file } => self.run_file(&file),
            Commands::Compile { file, inline } => {
                let source = self.read(&file)?;
                let options = CompileOptions { inline };
                let program = self.compile(&source, options)?;
                println!("{}", program);
                Ok(())
            }
            Commands::Check { file } => {
                let source = self.read(&file)?;
                let program = self.compile(&source, CompileOptions::default())?;
                eprintln!("{}: ok ({} method(s))", source.name, program.methods);
                Ok(())
            }
            Commands::Ast { file } => {
                let source = self.read(&file)?;
                let (expr, errors) = parse_source(&source.name, &source.content);
                if !errors.is_empty() {
                    self.report(&CompileFailure::Parse(errors).diagnostics(), Some(&source));
                    return Err(Exit(EXIT_COMPILE));
                }
                println!("{}", expr);
                Ok(())
            }
            Commands::Eval { code } => {
                let source = SourceFile::new("<eval>", code);
                let program = self.compile(&source, CompileOptions::default())?;
                let value = self.execute(&program)?;
                if !value.is_nil() {
                    println!("{:?}", value);
                }
                Ok(())
            }
            Commands::Repl => self.repl(),
        }
    }

    fn repl(&self) -> Result<(), Exit> {
        let mut session = Session::new();
        session.set_show_code(self.config.repl.show_code);
        session.set_colors(self.colors);

        let mut config = LineReplConfig::from(&self.config.repl);
        config.use_colors = self.colors;
        if config.history_file.is_none() {
            config.history_file = default_history_path();
        }

        let result = LineRepl::with_config(session, config).and_then(|mut repl| repl.run());
        result.map_err(|error| {
            eprintln!("error: {}", error);
            Exit(EXIT_IO)
        })
    }
}

fn read_source(path: &Path) -> Result<SourceFile> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(SourceFile::new(path.display().to_string(), content))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    let level = if args.verbose { LogLevel::Debug } else { config.log.level() };
    logger::init_with_level(level);
    if let Err(error) = &loaded {
        warn!("ignoring configuration: {}", error);
    }
    debug!("{} {} on {} (max call depth {})", NAME, VERSION, std::env::consts::OS, MAX_CALL_DEPTH);

    let driver = Driver::new(&args, config);
    let command = match (args.command, args.file) {
        (Some(command), _) => command,
        (None, Some(file)) => Commands::Run { file },
        (None, None) => Commands::Repl,
    };

    let worker = thread::Builder::new()
        .name("jay".to_string())
        .stack_size(STACK_SIZE)
        .spawn(move || driver.dispatch(command));
    let outcome = match worker {
        Ok(worker) => worker.join().unwrap_or(Err(Exit(EXIT_RUNTIME))),
        Err(error) => {
            eprintln!("error: cannot start interpreter thread: {}", error);
            Err(Exit(EXIT_IO))
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(Exit(code)) => ExitCode::from(code),
    }
}
