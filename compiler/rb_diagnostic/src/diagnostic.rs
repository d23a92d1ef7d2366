use std::fmt;

use rb_ir::Span;

use crate::DiagnosticCode;

/// Severity level for diagnostics.
///
/// Warnings and errors never stop a scan. A fatal diagnostic ends it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// A structured diagnostic.
///
/// Arguments are kept in insertion order; keys are the placeholder names used
/// by [`DiagnosticCode::template`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub arguments: Vec<(&'static str, String)>,
    pub span: Span,
}

impl Diagnostic {
    #[cold]
    pub fn new(severity: Severity, code: DiagnosticCode, span: Span) -> Self {
        Diagnostic {
            severity,
            code,
            arguments: Vec::new(),
            span,
        }
    }

    #[cold]
    pub fn warning(code: DiagnosticCode, span: Span) -> Self {
        Self::new(Severity::Warning, code, span)
    }

    #[cold]
    pub fn error(code: DiagnosticCode, span: Span) -> Self {
        Self::new(Severity::Error, code, span)
    }

    #[cold]
    pub fn fatal(code: DiagnosticCode, span: Span) -> Self {
        Self::new(Severity::Fatal, code, span)
    }

    /// Add a named argument.
    #[must_use]
    pub fn with_arg(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.arguments.push((key, value.into()));
        self
    }

    /// Look up an argument by key.
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    /// Message with every `%{key}` placeholder substituted.
    ///
    /// Placeholders without a matching argument are left as written.
    pub fn message(&self) -> String {
        let template = self.code.template();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find("%{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            let key = &after[..close];
            match self.arg(key) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[open..open + 2 + close + 1]),
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity,
            self.code,
            self.span,
            self.message()
        )
    }
}

#[cfg(test)]
mod tests;
