use crate::{Diagnostic, DiagnosticQueue};

/// Boundary through which producers report diagnostics.
///
/// Reporting never fails and never unwinds; what happens to a diagnostic
/// afterwards (buffering, filtering, rendering) is up to the sink.
pub trait DiagnosticSink {
    /// Report one diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }
}
