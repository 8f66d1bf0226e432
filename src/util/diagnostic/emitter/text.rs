//! Text diagnostic renderer

use owo_colors::OwoColorize;

use super::DiagnosticEmitter;
use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::SourceFile;

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Colored output
    pub use_colors: bool,
    /// Print the offending source line under the header
    pub show_source: bool,
    /// Print help lines
    pub show_help: bool,
    /// Indicator character (default: "^")
    pub indicator: char,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            show_help: true,
            indicator: '^',
        }
    }
}

/// Text diagnostic renderer
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// Render a single diagnostic, optionally with a snippet from `source`
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
        source: Option<&SourceFile>,
    ) -> String {
        let mut output = self.render_header(diagnostic);

        if let Some(location) = &diagnostic.location {
            output.push_str(&format!(" {} {}\n", self.paint_gutter("-->"), location));

            if self.config.show_source {
                let line = source.and_then(|file| file.line_text(location.line));
                if let Some(line) = line {
                    let number = location.line.to_string();
                    let pad = " ".repeat(number.len());
                    let marker = format!(
                        "{}{}",
                        " ".repeat(location.column.saturating_sub(1)),
                        self.config.indicator
                    );
                    output.push_str(&format!("{} {}\n", pad, self.paint_gutter("|")));
                    output.push_str(&format!("{} {} {}\n", self.paint_gutter(&number), self.paint_gutter("|"), line));
                    output.push_str(&format!(
                        "{} {} {}\n",
                        pad,
                        self.paint_gutter("|"),
                        self.paint_severity(diagnostic.severity, &marker)
                    ));
                }
            }
        }

        if self.config.show_help {
            if let Some(help) = &diagnostic.help {
                output.push_str(&format!("{}: {}\n", self.paint_bold("help"), help));
            }
        }

        output
    }

    fn render_header(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let label = format!("{}[{}]", diagnostic.severity, diagnostic.code);
        format!(
            "{}: {}\n",
            self.paint_severity(diagnostic.severity, &label),
            self.paint_bold(&diagnostic.message)
        )
    }

    fn paint_severity(
        &self,
        severity: Severity,
        text: &str,
    ) -> String {
        if !self.config.use_colors {
            return text.to_string();
        }
        match severity {
            Severity::Error => text.red().bold().to_string(),
            Severity::Warning => text.yellow().bold().to_string(),
        }
    }

    fn paint_gutter(
        &self,
        text: &str,
    ) -> String {
        if self.config.use_colors {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_bold(
        &self,
        text: &str,
    ) -> String {
        if self.config.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl DiagnosticEmitter for TextEmitter {
    fn emit(
        &self,
        diagnostics: &[Diagnostic],
        source: Option<&SourceFile>,
    ) -> String {
        diagnostics
            .iter()
            .map(|diagnostic| self.render(diagnostic, source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
