//! The context-sensitive scanner.
//!
//! The scanner is a state machine over codepoints. Each step looks at the
//! input under the cursor in the current mode and either consumes something
//! (blanks, a comment, part of a literal), switches mode without consuming,
//! or emits a token. A step that emits ends a token cycle; the
//! "command start" flag set during one cycle is only observed by the next.
//!
//! Expression modes live in `expr`, literal bodies and heredocs in `body`.
//! Every mode change that does not consume input leads towards
//! [`LexState::ExprEnd`], which always consumes, emits or halts.

mod body;
mod expr;

use std::mem;

use rb_diagnostic::{Diagnostic, DiagnosticCode, DiagnosticQueue};
use rb_ir::{Span, TokenKind};
use rb_lexer_core::char_class::{
    is_constant_start, is_eof_char, is_ident_char, is_ident_start, is_space, is_space_nl,
};
use rb_lexer_core::{Cursor, SourceBuffer};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::{ConfigError, LexerConfig};
use crate::emitter::TokenEmitter;
use crate::literal::{is_gvar_punct, Literal, LiteralKind};
use crate::stack_state::StackState;
use crate::static_env::StaticEnvironment;
use crate::LexOutput;

/// Expression states, visible to a parser driving the scanner.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LexState {
    /// Start of a line, where `=begin` and `__END__` are recognized.
    LineBegin,
    /// A value is expected and a label is not allowed.
    ExprValue,
    /// Start of an expression.
    ExprBeg,
    /// After `return`, `break`, `next` and `rescue`.
    ExprMid,
    /// After a method name that may take arguments without parentheses.
    ExprArg,
    /// Like `ExprArg`, for the first word of a command.
    ExprCmdarg,
    /// After a complete expression.
    ExprEnd,
    /// After a closing bracket that may take a block.
    ExprEndarg,
    /// After a method name in a definition, or a closing parenthesis.
    ExprEndfn,
    /// After `.`, `&.` or `::`.
    ExprDot,
    /// After `def`, `alias`, `undef` and the like.
    ExprFname,
    /// After a label.
    ExprLabelarg,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Mode {
    Expr(LexState),
    /// After a newline that may be continued by `.method` on the next line.
    LeadingDot,
    RegexpModifiers,
    InterpString,
    PlainString,
    InterpWords,
    PlainWords,
}

impl Mode {
    fn for_literal(literal: &Literal) -> Mode {
        match (literal.interpolates(), literal.is_words()) {
            (true, true) => Mode::InterpWords,
            (false, true) => Mode::PlainWords,
            (true, false) => Mode::InterpString,
            (false, false) => Mode::PlainString,
        }
    }
}

/// Outcome of one scanner step.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Step {
    /// Keep going within the current token cycle.
    Continue,
    /// A token cycle ended.
    Break,
}

/// Scanner over one source buffer.
///
/// A lexer is single-use per run: [`Lexer::tokenize`] drains it, and
/// [`Lexer::reset`] returns it to the configured start offset.
pub struct Lexer<'src> {
    source: &'src SourceBuffer,
    cursor: Cursor<'src>,
    config: LexerConfig,
    start: usize,
    static_env: Option<&'src dyn StaticEnvironment>,

    mode: Mode,
    /// Modes suspended by interpolations and embedded documents.
    mode_stack: SmallVec<[Mode; 8]>,
    emitter: TokenEmitter<'src>,
    diagnostics: DiagnosticQueue,
    literals: Vec<Literal>,

    cond: StackState,
    cmdarg: StackState,
    /// Paren level of each `cond` bit pushed by the scanner itself.
    cond_pushes: SmallVec<[u32; 4]>,
    /// Paren level of each `cmdarg` bit pushed by the scanner itself.
    cmdarg_pushes: SmallVec<[u32; 4]>,
    /// Paren levels opened by `tLPAREN_ARG`.
    paren_arg_levels: SmallVec<[u32; 4]>,
    /// Paren levels at which a `->` awaits its body.
    lambda_stack: SmallVec<[u32; 4]>,
    paren_nest: u32,

    command_start: bool,
    /// Token count right after a command name; arguments starting there
    /// open a command-argument scope.
    pending_command: Option<usize>,
    newline_s: usize,
    /// Where scanning continues after the current line, when a heredoc body
    /// was consumed out of order.
    herebody_s: Option<usize>,
    halted: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src SourceBuffer, config: LexerConfig) -> Result<Self, ConfigError> {
        let start = config.start_index(source)?;
        let mut lexer = Lexer {
            source,
            cursor: source.cursor(),
            emitter: TokenEmitter::new(source, config.force_utf32, config.emit_comments),
            config,
            start,
            static_env: None,
            mode: Mode::Expr(LexState::LineBegin),
            mode_stack: SmallVec::new(),
            diagnostics: DiagnosticQueue::new(),
            literals: Vec::new(),
            cond: StackState::new("cond"),
            cmdarg: StackState::new("cmdarg"),
            cond_pushes: SmallVec::new(),
            cmdarg_pushes: SmallVec::new(),
            paren_arg_levels: SmallVec::new(),
            lambda_stack: SmallVec::new(),
            paren_nest: 0,
            command_start: true,
            pending_command: None,
            newline_s: start,
            herebody_s: None,
            halted: false,
        };
        lexer.reset();
        Ok(lexer)
    }

    /// Consult `env` to tell local variables from method calls.
    #[must_use]
    pub fn with_static_env(mut self, env: &'src dyn StaticEnvironment) -> Self {
        self.static_env = Some(env);
        self
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Current expression state, or `None` inside a literal body or
    /// another non-expression mode.
    pub fn state(&self) -> Option<LexState> {
        match self.mode {
            Mode::Expr(state) => Some(state),
            _ => None,
        }
    }

    /// Force the expression state, as a parser does after reducing a rule
    /// that changes what may follow.
    pub fn set_state(&mut self, state: LexState) {
        trace!(?state, "state forced");
        self.mode = Mode::Expr(state);
    }

    /// Return to the configured start offset and discard all output.
    pub fn reset(&mut self) {
        self.cursor.set_pos(self.start);
        self.mode = Mode::Expr(LexState::LineBegin);
        self.mode_stack.clear();
        self.emitter.clear();
        self.diagnostics.clear();
        self.literals.clear();
        self.cond.clear();
        self.cmdarg.clear();
        self.cond_pushes.clear();
        self.cmdarg_pushes.clear();
        self.paren_arg_levels.clear();
        self.lambda_stack.clear();
        self.paren_nest = 0;
        self.command_start = true;
        self.pending_command = None;
        self.newline_s = self.start;
        self.herebody_s = None;
        self.halted = false;
    }

    /// Scan to the end of input, `__END__`, or the first fatal diagnostic.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(source = %self.source.name(), version = self.config.version.get())
    )]
    pub fn tokenize(&mut self) -> LexOutput {
        let mut cmd_state = mem::take(&mut self.command_start);
        while !self.halted {
            if self.step(cmd_state) == Step::Break {
                cmd_state = mem::take(&mut self.command_start);
            }
        }

        let (tokens, comments) = self.emitter.take();
        let diagnostics = mem::take(&mut self.diagnostics);
        let truncated = diagnostics.has_fatal();
        debug!(
            tokens = tokens.len(),
            comments = comments.len(),
            diagnostics = diagnostics.len(),
            truncated,
            "scan finished"
        );
        LexOutput {
            tokens,
            comments,
            diagnostics: diagnostics.into_vec(),
            truncated,
        }
    }

    fn step(&mut self, cmd_state: bool) -> Step {
        if matches!(self.mode, Mode::Expr(_)) && self.at_document_start() {
            return self.embedded_document();
        }
        match self.mode {
            Mode::Expr(state) => self.expr_step(state, cmd_state),
            Mode::LeadingDot => self.leading_dot(),
            Mode::RegexpModifiers => self.regexp_modifiers(),
            Mode::InterpString | Mode::PlainString | Mode::InterpWords | Mode::PlainWords => {
                self.literal_body()
            }
        }
    }

    // === Input access ===

    #[inline]
    fn pos(&self) -> usize {
        self.cursor.pos()
    }

    #[inline]
    fn set_pos(&mut self, pos: usize) {
        self.cursor.set_pos(pos);
    }

    #[inline]
    fn at(&self, index: usize) -> char {
        self.cursor.char_at(index)
    }

    #[inline]
    fn len(&self) -> usize {
        self.source.len()
    }

    /// End of input, or a character that ends input when scanned.
    #[inline]
    fn is_eof_at(&self, index: usize) -> bool {
        index >= self.len() || is_eof_char(self.at(index))
    }

    fn text(&self, start: usize, end: usize) -> &'src str {
        self.source.slice(start, end)
    }

    fn word_end(&self, start: usize) -> usize {
        let mut end = start;
        while end < self.len() && is_ident_char(self.at(end)) {
            end += 1;
        }
        end
    }

    /// A `?` or `!` at `end` that belongs to the word before it.
    fn fid_suffix(&self, end: usize) -> bool {
        matches!(self.at(end), '?' | '!') && self.at(end + 1) != '='
    }

    /// Position after blanks and escaped newlines starting at `start`.
    fn blanks_end(&self, start: usize) -> usize {
        let mut end = start;
        loop {
            let c = self.at(end);
            if end < self.len() && is_space(c) {
                end += 1;
            } else if c == '\\' && self.at(end + 1) == '\n' {
                end += 2;
            } else {
                return end;
            }
        }
    }

    fn skip_blanks(&mut self) -> Step {
        let end = self.blanks_end(self.pos());
        self.set_pos(end);
        Step::Continue
    }

    /// A `#` comment up to the end of the line; the newline is not part of it.
    fn comment(&mut self) -> Step {
        let start = self.pos();
        let end = self.source.line_end(start);
        self.emitter.comment(start, end);
        self.set_pos(end);
        Step::Continue
    }

    fn consume_newline(&mut self) {
        let pos = self.pos();
        self.newline_s = pos;
        match self.herebody_s.take() {
            Some(body) => self.set_pos(body),
            None => self.set_pos(pos + 1),
        }
    }

    /// End of a `name:` label starting at `start`, just past the colon.
    fn label_end(&self, start: usize) -> Option<usize> {
        if !self.config.version.at_least(19) || !is_ident_start(self.at(start)) {
            return None;
        }
        let mut end = self.word_end(start);
        if matches!(self.at(end), '?' | '!') {
            end += 1;
        }
        (self.at(end) == ':' && self.at(end + 1) != ':').then_some(end + 1)
    }

    fn is_declared(&self, name: &str) -> bool {
        self.static_env.is_some_and(|env| env.is_declared(name))
    }

    fn at_document_start(&self) -> bool {
        let pos = self.pos();
        self.emitter.is_line_start(pos)
            && self.cursor.starts_with_at(pos, "=begin")
            && (self.is_eof_at(pos + 6) || is_space_nl(self.at(pos + 6)))
    }

    // === Output ===

    fn emit(&mut self, kind: TokenKind, text: impl Into<String>, start: usize, end: usize) {
        self.emitter.emit(kind, text, start, end);
    }

    fn emit_source(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.emitter.emit_source(kind, start, end);
    }

    fn span(&self, start: usize, end: usize) -> Span {
        self.emitter.span(start, end)
    }

    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_fatal() {
            debug!(code = %diagnostic.code, "fatal diagnostic, halting");
            self.halted = true;
        }
        self.diagnostics.push(diagnostic);
    }

    #[cold]
    fn error(&mut self, code: DiagnosticCode, start: usize, end: usize) {
        self.diagnostic(Diagnostic::error(code, self.span(start, end)));
    }

    #[cold]
    fn fatal(&mut self, code: DiagnosticCode, start: usize, end: usize) -> Step {
        self.diagnostic(Diagnostic::fatal(code, self.span(start, end)));
        Step::Break
    }

    fn at_eof(&mut self) -> Step {
        if let Some(literal) = self.literals.last() {
            let start = literal.str_start;
            return self.fatal(DiagnosticCode::StringEof, start, start + 1);
        }
        trace!(pos = self.pos(), "end of input");
        self.halted = true;
        Step::Break
    }

    // === Nesting bookkeeping ===

    /// After an emit: the command state the token leaves behind.
    fn arg_or_cmdarg(&mut self, cmd_state: bool) -> LexState {
        if cmd_state {
            self.pending_command = Some(self.emitter.len());
            LexState::ExprCmdarg
        } else {
            LexState::ExprArg
        }
    }

    /// The first argument of a command starts here.
    fn begin_command_args(&mut self) {
        if self.pending_command == Some(self.emitter.len()) {
            self.cmdarg.push(true);
            self.cmdarg_pushes.push(self.paren_nest);
        }
        self.pending_command = None;
    }

    fn push_cond(&mut self) {
        self.cond.push(true);
        self.cond_pushes.push(self.paren_nest);
    }

    fn pop_pushed_cond(&mut self) {
        if self.cond_pushes.last() == Some(&self.paren_nest) {
            self.cond_pushes.pop();
            self.cond.pop();
        }
    }

    fn pop_pushed_cmdarg(&mut self) {
        if self.cmdarg_pushes.last() == Some(&self.paren_nest) {
            self.cmdarg_pushes.pop();
            self.cmdarg.pop();
        }
    }

    /// Command arguments at this level end here.
    fn end_command_args(&mut self) {
        while self.cmdarg_pushes.last() == Some(&self.paren_nest) {
            self.cmdarg_pushes.pop();
            self.cmdarg.pop();
        }
        self.pending_command = None;
    }

    /// A statement ends: drop every bit the scanner pushed at this level.
    fn end_statement(&mut self) {
        self.end_command_args();
        while self.cond_pushes.last() == Some(&self.paren_nest) {
            self.cond_pushes.pop();
            self.cond.pop();
        }
    }

    fn open_bracket(&mut self) {
        self.cond.push(false);
        self.cmdarg.push(false);
        self.paren_nest += 1;
    }

    fn open_brace(&mut self) {
        self.open_bracket();
        if let Some(literal) = self.literals.last_mut() {
            literal.start_interp_brace();
        }
    }

    fn close_bracket(&mut self) {
        self.end_statement();
        if self.config.version.at_least(24) {
            self.cond.pop();
            self.cmdarg.pop();
        } else {
            self.cond.lexpop();
            self.cmdarg.lexpop();
        }
        self.paren_nest = self.paren_nest.saturating_sub(1);
    }

    /// Emit `do` in its contextual form.
    fn emit_do(&mut self, do_block: bool, start: usize, end: usize) {
        trace!(cond = ?self.cond, cmdarg = ?self.cmdarg, paren_nest = self.paren_nest, "do");
        let kind = if self.lambda_stack.last() == Some(&self.paren_nest) {
            self.lambda_stack.pop();
            TokenKind::KwDoLambda
        } else if self.cond.active() {
            self.pop_pushed_cond();
            TokenKind::KwDoCond
        } else if self.cmdarg.active() || do_block {
            self.pop_pushed_cmdarg();
            TokenKind::KwDoBlock
        } else {
            TokenKind::KwDo
        };
        self.emit_source(kind, start, end);
        self.set_pos(end);
        self.command_start = true;
        self.mode = Mode::Expr(LexState::ExprValue);
    }

    /// `{` after an expression: a lambda body, or `other` otherwise.
    fn emit_lbrace(&mut self, other: TokenKind, start: usize) -> Step {
        let kind = if self.lambda_stack.last() == Some(&self.paren_nest) {
            self.lambda_stack.pop();
            TokenKind::Lambeg
        } else {
            other
        };
        self.emit_source(kind, start, start + 1);
        self.open_brace();
        self.set_pos(start + 1);
        self.command_start = true;
        self.mode = Mode::Expr(LexState::ExprValue);
        Step::Break
    }

    // === Literals ===

    fn push_literal(
        &mut self,
        kind: LiteralKind,
        start: usize,
        prefix_end: usize,
        delimiter: char,
        label_allowed: bool,
    ) -> Step {
        let prefix = self.text(start, prefix_end).to_owned();
        let mut literal = Literal::new(kind, prefix, delimiter, start, prefix_end, label_allowed);
        literal.open(&mut self.emitter);
        trace!(?kind, start, "literal opened");
        self.mode = Mode::for_literal(&literal);
        self.literals.push(literal);
        self.set_pos(prefix_end);
        Step::Continue
    }

    fn pop_literal(&mut self) {
        self.mode = match self.literals.pop() {
            Some(literal) if literal.is_regexp() => Mode::RegexpModifiers,
            _ => Mode::Expr(LexState::ExprEnd),
        };
    }

    // === Names ===

    /// Scan `$name`, `@name` or `@@name` at `start`, emitting it. Returns
    /// the end, or `None` when no variable is there.
    fn variable(&mut self, start: usize) -> Option<usize> {
        let c = self.at(start + 1);
        if self.at(start) == '$' {
            let (kind, end) = self.gvar_end(start)?;
            match kind {
                TokenKind::NthRef => {
                    let digits = self.text(start + 1, end).to_owned();
                    self.emit(kind, digits, start, end);
                }
                _ => self.emit_source(kind, start, end),
            }
            return Some(end);
        }

        let (name_start, kind, code) = if c == '@' {
            (start + 2, TokenKind::Cvar, DiagnosticCode::CvarName)
        } else {
            (start + 1, TokenKind::Ivar, DiagnosticCode::IvarName)
        };
        if !is_ident_char(self.at(name_start)) || name_start >= self.len() {
            return None;
        }
        let end = self.word_end(name_start);
        if self.at(name_start).is_ascii_digit() {
            let name = self.text(start, end).to_owned();
            self.diagnostic(Diagnostic::error(code, self.span(start, end)).with_arg("name", name));
        }
        self.emit_source(kind, start, end);
        Some(end)
    }

    /// Kind and end of the global variable at `start`.
    fn gvar_end(&self, start: usize) -> Option<(TokenKind, usize)> {
        let c = self.at(start + 1);
        if start + 1 >= self.len() {
            return None;
        }
        if is_ident_start(c) {
            return Some((TokenKind::Gvar, self.word_end(start + 1)));
        }
        match c {
            '0' => Some((TokenKind::Gvar, start + 2)),
            '1'..='9' => {
                let mut end = start + 1;
                while self.at(end).is_ascii_digit() {
                    end += 1;
                }
                Some((TokenKind::NthRef, end))
            }
            '&' | '`' | '\'' | '+' => Some((TokenKind::BackRef, start + 2)),
            '-' if is_ident_char(self.at(start + 2)) => Some((TokenKind::Gvar, start + 3)),
            c if is_gvar_punct(c) => Some((TokenKind::Gvar, start + 2)),
            _ => None,
        }
    }

    /// Kind for a plain word that is not a keyword.
    fn word_kind(&self, start: usize, end: usize) -> TokenKind {
        if self.fid_suffix(end) {
            TokenKind::Fid
        } else if is_constant_start(self.at(start)) {
            TokenKind::Constant
        } else {
            TokenKind::Identifier
        }
    }
}
