//! Core diagnostic types.
//!
//! Defines [`Diagnostic`], [`Note`] and [`Severity`].

use std::fmt;

use tessel_ir::Location;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Remark,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Remark => write!(f, "remark"),
        }
    }
}

/// Supplementary message attached to a diagnostic, optionally at its own
/// location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Note {
    pub message: String,
    pub location: Option<Location>,
}

impl Note {
    /// A note with no location of its own.
    pub fn new(message: impl Into<String>) -> Self {
        Note {
            message: message.into(),
            location: None,
        }
    }

    /// A note pointing at `location`.
    pub fn at(location: Location, message: impl Into<String>) -> Self {
        Note {
            message: message.into(),
            location: Some(location),
        }
    }
}

/// A diagnostic: what went wrong, and where.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Severity level.
    pub severity: Severity,
    /// Main message.
    pub message: String,
    /// Where the problem was found. `None` when the producer had no location.
    pub location: Option<Location>,
    /// Additional notes, in order.
    pub notes: Vec<Note>,
}

impl Diagnostic {
    /// Create a new diagnostic with the given severity.
    pub fn new(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            location: None,
            notes: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new(code, Severity::Warning)
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the location the diagnostic is reported at.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(Note::new(note));
        self
    }

    /// Add a note pointing at another location.
    pub fn with_note_at(mut self, location: Location, note: impl Into<String>) -> Self {
        self.notes.push(Note::at(location, note));
        self
    }

    /// Check if this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}
