//! Collector for accumulating diagnostics during a processing phase.

use log::debug;

use crate::error::Diagnostic;

/// Accumulates warnings emitted by one compilation, in emission order.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        debug!(diagnostic:% = diagnostic; "Recorded diagnostic");
        self.diagnostics.push(diagnostic);
    }

    /// Consume the collector and return all recorded diagnostics.
    pub(crate) fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
