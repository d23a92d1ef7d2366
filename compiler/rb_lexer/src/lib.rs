//! Context-sensitive scanner for Ruby-like source.
//!
//! The same characters mean different things depending on what came before:
//! `/` divides after a value and opens a regexp where a value is expected,
//! `do` binds to the innermost call or to the outer command, and a newline
//! ends a statement only when nothing continues it. [`Lexer`] tracks that
//! context and produces a flat token stream, the comments it skipped and the
//! diagnostics it found.
//!
//! ```
//! use rb_lexer::{lex, LexerConfig, SourceBuffer, TokenKind};
//!
//! let source = SourceBuffer::new("example.rb", "puts 1 if ok").unwrap();
//! let output = lex(&source, LexerConfig::default()).unwrap();
//! assert_eq!(
//!     output.kinds(),
//!     [
//!         TokenKind::Identifier,
//!         TokenKind::Integer,
//!         TokenKind::KwIfMod,
//!         TokenKind::Identifier,
//!     ]
//! );
//! ```

mod config;
mod emitter;
mod escape;
mod keywords;
mod literal;
mod numeric;
mod operators;
mod scanner;
mod stack_state;
mod static_env;

pub use config::{ConfigError, LanguageVersion, LexerConfig};
pub use rb_diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use rb_ir::{Comment, Span, Token, TokenKind, TokenList};
pub use rb_lexer_core::SourceBuffer;
pub use scanner::{LexState, Lexer};
pub use static_env::{StaticEnv, StaticEnvironment};

/// Everything one scan produced.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub comments: Vec<Comment>,
    pub diagnostics: Vec<Diagnostic>,
    /// Scanning stopped at a fatal diagnostic before the end of input.
    pub truncated: bool,
}

impl LexOutput {
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.kinds()
    }

    /// Whether any diagnostic is an error or worse.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity >= Severity::Error)
    }
}

/// Scan `source` from the configured start offset.
pub fn lex(source: &SourceBuffer, config: LexerConfig) -> Result<LexOutput, ConfigError> {
    Ok(Lexer::new(source, config)?.tokenize())
}

/// Scan `source`, treating the names `env` declares as local variables.
pub fn lex_with_env(
    source: &SourceBuffer,
    config: LexerConfig,
    env: &dyn StaticEnvironment,
) -> Result<LexOutput, ConfigError> {
    Ok(Lexer::new(source, config)?.with_static_env(env).tokenize())
}
