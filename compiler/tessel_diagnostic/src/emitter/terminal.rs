//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use tessel_ir::{Context, Location, UnknownLoc};

use crate::{Diagnostic, Severity};

use super::{expand_diagnostic, DiagnosticEmitter};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const REMARK: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
///
/// Borrows the [`Context`] that issued the diagnostics' locations.
pub struct TerminalEmitter<'ctx, W: Write> {
    ctx: &'ctx Context,
    writer: W,
    colors: bool,
}

impl<'ctx, W: Write> TerminalEmitter<'ctx, W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(ctx: &'ctx Context, writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            ctx,
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Consume the emitter and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Remark => colors::REMARK,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn write_location(&mut self, loc: Location) {
        if loc.isa::<UnknownLoc>() {
            return;
        }
        let text = self.ctx.format_location(loc);
        let _ = writeln!(self.writer, "  --> {text}");
    }
}

impl<'ctx> TerminalEmitter<'ctx, io::Stderr> {
    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(ctx: &'ctx Context, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(ctx, io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let diagnostic = expand_diagnostic(self.ctx, diagnostic);

        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        if let Some(loc) = diagnostic.location {
            self.write_location(loc);
        }

        for note in &diagnostic.notes {
            if let Some(loc) = note.location {
                // Located notes render as their own sub-diagnostic.
                self.write_severity(Severity::Note);
                let _ = writeln!(self.writer, ": {}", note.message);
                self.write_location(loc);
            } else {
                let _ = write!(self.writer, "  = ");
                self.write_colored("note", colors::BOLD);
                let _ = writeln!(self.writer, ": {}", note.message);
            }
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);

            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };

            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {} warning{} emitted",
                    warning_count,
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {} warning{} emitted",
                warning_count,
                plural_s(warning_count)
            );
        }
    }
}
