use std::fmt;

/// Proof that at least one error diagnostic was emitted.
///
/// Only obtainable by emitting an error (see
/// [`DiagnosticQueue::emit_error`](crate::DiagnosticQueue::emit_error)) or
/// from a non-zero error count.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    #[inline]
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// `Some` proof if `count` errors is at least one.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}
