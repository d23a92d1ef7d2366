//! Append-only diagnostic sink used by the scanner.
//!
//! The queue never interrupts scanning. The scanner asks [`has_fatal`]
//! after reporting and stops on its own.
//!
//! [`has_fatal`]: DiagnosticQueue::has_fatal

use crate::{Diagnostic, Severity};

/// Diagnostics in scan order.
#[derive(Clone, Default, Debug)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    has_fatal: bool,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => {}
            Severity::Error => self.error_count += 1,
            Severity::Fatal => {
                self.error_count += 1;
                self.has_fatal = true;
            }
        }
        self.diagnostics.push(diagnostic);
    }

    /// Whether a fatal diagnostic has been reported.
    #[inline]
    pub fn has_fatal(&self) -> bool {
        self.has_fatal
    }

    /// Number of errors, fatal ones included.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
        self.error_count = 0;
        self.has_fatal = false;
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests;
