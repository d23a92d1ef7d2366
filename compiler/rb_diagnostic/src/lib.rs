//! Diagnostics reported while scanning.
//!
//! A diagnostic is data: a severity, a symbolic code, ordered named
//! arguments and a source range. Turning it into a rendered message with
//! source snippets is left to the consumer; [`Diagnostic::message`] only
//! performs template substitution.

mod code;
mod diagnostic;
pub mod queue;

pub use code::DiagnosticCode;
pub use diagnostic::{Diagnostic, Severity};
pub use queue::DiagnosticQueue;
