//! Diagnostic channel for recoverable failures.
//!
//! The fullscreen core never propagates a failure in a way that could take the
//! host down. Instead every failure is handed to a [`DiagnosticSink`], which by
//! default logs it through `tracing`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::SoftScreenError;

/// Receives every recoverable failure produced by the core.
pub trait DiagnosticSink {
    /// Reports a failure together with the operation that produced it.
    fn report(&self, context: &str, error: &SoftScreenError);
}

/// Logs diagnostics as `warn` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, context: &str, error: &SoftScreenError) {
        tracing::warn!(context, kind = error.kind(), "{error}");
    }
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Operation that produced the failure.
    pub context: String,
    /// The failure itself.
    pub error: SoftScreenError,
}

/// Logs diagnostics and keeps them for later inspection.
///
/// Clones share the same log, so a host can hand one clone to the controller
/// and keep another to display or assert on.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl DiagnosticLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns a copy of every recorded diagnostic, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> { self.entries.lock().clone() }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.lock().len() }

    /// Returns `true` if nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.lock().is_empty() }

    /// Drains the log.
    pub fn take(&self) -> Vec<Diagnostic> { std::mem::take(&mut *self.entries.lock()) }
}

impl DiagnosticSink for DiagnosticLog {
    fn report(&self, context: &str, error: &SoftScreenError) {
        TracingDiagnostics.report(context, error);
        self.entries.lock().push(Diagnostic {
            context: context.to_string(),
            error: error.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_in_order() {
        let log = DiagnosticLog::new();
        log.report("first", &SoftScreenError::UnavailableContext);
        log.report("second", &SoftScreenError::NoDisplays);

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].context, "first");
        assert_eq!(entries[1].error, SoftScreenError::NoDisplays);
    }

    #[test]
    fn test_clones_share_entries() {
        let log = DiagnosticLog::new();
        let handle = log.clone();
        log.report("resolve", &SoftScreenError::NoDisplays);
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_take_drains() {
        let log = DiagnosticLog::new();
        log.report("x", &SoftScreenError::UnavailableContext);
        assert_eq!(log.take().len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        TracingDiagnostics.report("test", &SoftScreenError::unsupported("nothing"));
    }
}
