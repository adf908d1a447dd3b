//! Diagnostic Emitters
//!
//! Emitters render diagnostics for a reader. Locations are resolved through
//! the [`Context`] that issued them, and composite locations are expanded:
//! a fused location reports at its first member and adds a "fused from
//! here" note for each of the others; a call site reports at its callee and
//! adds a "called from" note per caller frame.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use tessel_ir::{CallSiteLoc, Context, FusedLoc, Location};

use crate::{Diagnostic, Note};

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Split `loc` into the location to report at and the notes that carry the
/// rest of its provenance.
pub fn expand_location(ctx: &Context, loc: Location) -> (Location, Vec<Note>) {
    if let Some(fused) = loc.dyn_cast::<FusedLoc>() {
        let mut members = fused.locations(ctx).into_iter();
        // Fused locations always hold at least one member.
        let Some(first) = members.next() else {
            return (loc, Vec::new());
        };
        let (primary, mut notes) = expand_location(ctx, first);
        notes.extend(members.map(|member| Note::at(member, "fused from here")));
        return (primary, notes);
    }
    if let Some(call) = loc.dyn_cast::<CallSiteLoc>() {
        let (primary, mut notes) = expand_location(ctx, call.callee(ctx));
        notes.extend(
            call.frames(ctx)
                .into_iter()
                .map(|frame| Note::at(frame, "called from")),
        );
        return (primary, notes);
    }
    (loc, Vec::new())
}

/// Expand the diagnostic's location into a primary location plus notes.
///
/// The expansion notes come before the diagnostic's own notes.
pub fn expand_diagnostic(ctx: &Context, diagnostic: &Diagnostic) -> Diagnostic {
    let mut expanded = diagnostic.clone();
    if let Some(loc) = diagnostic.location {
        let (primary, mut notes) = expand_location(ctx, loc);
        notes.extend(diagnostic.notes.iter().cloned());
        expanded.location = Some(primary);
        expanded.notes = notes;
    }
    expanded
}
