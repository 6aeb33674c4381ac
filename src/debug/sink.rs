// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Pluggable diagnostic sink.
//!
//! Validation never aborts and never throws; every violation becomes a
//! (severity, message, offending identifier) tuple delivered here. With no
//! sink installed, validation is skipped entirely and the non-debug path runs
//! unchanged.

use std::sync::Mutex;

/// How bad a reported violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The composed object is unusable or the call was illegal.
    Error,
    /// Suspicious but not fatal, such as a read-after-write hazard.
    Warning,
}

/// One delivered diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the violation.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// The offending identifier: a stage name, a mask, a resource, etc.
    pub offending: String,
}

/// Receives validation diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Delivers one diagnostic. Must not panic.
    fn report(&self, severity: Severity, message: &str, offending: &str);
}

/// A sink that remembers everything it receives. Handy in tests and tools.
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, in delivery order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.records.lock().expect("sink poisoned").clone()
    }

    /// Number of error-severity diagnostics received.
    pub fn error_count(&self) -> usize {
        self.records
            .lock()
            .expect("sink poisoned")
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, severity: Severity, message: &str, offending: &str) {
        self.records.lock().expect("sink poisoned").push(Diagnostic {
            severity,
            message: message.to_string(),
            offending: offending.to_string(),
        });
    }
}
