//! Diagnostic system for Tessel IR clients.
//!
//! A diagnostic is a severity, an error code, a message and an attached
//! [`Location`](tessel_ir::Location). Producers report expected failures
//! (for example a malformed type string) by emitting diagnostics into a
//! [`DiagnosticSink`] instead of panicking; the caller decides whether to
//! skip, report or continue.
//!
//! # Error Guarantees
//!
//! The `ErrorGuaranteed` type provides type-level proof that at least one
//! error was emitted.
//!
//! ```text
//! // Can only get ErrorGuaranteed by emitting an error
//! let guarantee = queue.emit_error(diagnostic);
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
mod guarantee;
pub mod queue;
mod sink;

pub use diagnostic::{Diagnostic, Note, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
pub use sink::DiagnosticSink;
