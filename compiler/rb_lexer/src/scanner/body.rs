//! Literal bodies, heredocs, regexp options and embedded documents.

use rb_diagnostic::{Diagnostic, DiagnosticCode};
use rb_ir::TokenKind;
use rb_lexer_core::char_class::{is_ident_start, is_space, is_space_nl};
use tracing::trace;

use super::{LexState, Lexer, Mode, Step};
use crate::escape::{self, EscapeError};
use crate::literal::{Closed, Heredoc, Literal, LiteralAction, LiteralKind};

const REGEXP_OPTIONS: &str = "imxouesn";

/// Characters whose escape keeps its backslash inside a regexp.
fn is_regexp_meta(c: char) -> bool {
    matches!(
        c,
        '\\' | '$' | '(' | ')' | '*' | '+' | '.' | '<' | '>' | '?' | '[' | ']' | '^' | '{' | '|' | '}'
    )
}

impl Lexer<'_> {
    pub(super) fn report_escape_errors(&mut self, errors: Vec<EscapeError>) {
        for error in errors {
            let span = self.span(error.start, error.end);
            let mut diagnostic = if error.is_fatal() {
                Diagnostic::fatal(error.code, span)
            } else {
                Diagnostic::error(error.code, span)
            };
            if error.code == DiagnosticCode::InvalidEscapeUse {
                diagnostic = diagnostic.with_arg("escape", self.text(error.start, error.end));
            }
            self.diagnostic(diagnostic);
        }
    }

    pub(super) fn literal_body(&mut self) -> Step {
        let Some(index) = self.literals.len().checked_sub(1) else {
            self.mode = Mode::Expr(LexState::ExprEnd);
            return Step::Continue;
        };
        let pos = self.pos();
        if let Some(step) = self.heredoc_terminator(index, pos) {
            return step;
        }
        if pos >= self.len() {
            let start = self.literals[index].str_start;
            return self.fatal(DiagnosticCode::StringEof, start, start + 1);
        }

        let chars = self.source.chars();
        let mut end = pos;
        let mut action = None;
        while end < chars.len() {
            let ahead = &chars[end..chars.len().min(end + 4)];
            match self.literals[index].feed(ahead) {
                LiteralAction::Continue => end += 1,
                other => {
                    action = Some(other);
                    break;
                }
            }
        }
        if end > pos {
            let text = self.text(pos, end);
            self.literals[index].extend_string(text.as_bytes(), pos, end);
            self.set_pos(end);
            return Step::Continue;
        }

        match action {
            Some(LiteralAction::Escape) => self.literal_escape(index, pos),
            Some(LiteralAction::FlushContent) => self.literal_newline(index, pos),
            Some(LiteralAction::WordSeparator) => {
                let mut end = pos;
                while end < chars.len() && is_space(chars[end]) {
                    end += 1;
                }
                self.literals[index].extend_space(pos, end, &mut self.emitter);
                self.set_pos(end);
                Step::Continue
            }
            Some(LiteralAction::OpenInterpolation) => self.open_interpolation(index, pos),
            Some(LiteralAction::InterpolateVariable) => self.interpolate_variable(index, pos),
            Some(LiteralAction::CloseLiteral) => self.close_literal(index, pos),
            Some(LiteralAction::Continue) | None => Step::Continue,
        }
    }

    fn literal_escape(&mut self, index: usize, pos: usize) -> Step {
        if pos + 1 >= self.len() {
            return self.fatal(DiagnosticCode::EscapeEof, pos, pos + 1);
        }
        let c = self.at(pos + 1);
        let raw = self.text(pos, pos + 2);
        let literal = &self.literals[index];
        let squiggly = literal.heredoc.as_ref().is_some_and(|heredoc| heredoc.squiggly);

        let mut end = pos + 2;
        let mut value = Vec::new();
        if literal.munge_escape(c) {
            if literal.is_regexp() && is_regexp_meta(c) {
                value.extend_from_slice(raw.as_bytes());
            } else {
                let mut buf = [0u8; 4];
                value.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        } else if literal.is_regexp() {
            if c != '\n' {
                value.extend_from_slice(raw.as_bytes());
            }
        } else if !literal.interpolates() {
            value.extend_from_slice(raw.as_bytes());
        } else if squiggly && c == '\n' {
            return self.squiggly_continuation(index, pos);
        } else {
            let mut errors = Vec::new();
            end = escape::unescape(
                self.source.chars(),
                pos,
                self.config.version,
                &mut value,
                &mut errors,
            );
            self.report_escape_errors(errors);
            if self.halted {
                return Step::Break;
            }
        }

        self.literals[index].extend_string(&value, pos, end);
        self.set_pos(end);
        Step::Continue
    }

    /// Backslash-newline in a `<<~` body. The lines join, but the continued
    /// line still starts a body line of its own and is dedented.
    fn squiggly_continuation(&mut self, index: usize, pos: usize) -> Step {
        let literal = &mut self.literals[index];
        literal.flush_string(&mut self.emitter);
        if let Some(heredoc) = literal.heredoc.as_mut() {
            let line = self.source.chars().get(heredoc.line_start..pos).unwrap_or_default();
            heredoc.infer_indent(line);
            heredoc.line_start = pos + 2;
        }
        self.set_pos(pos + 2);
        Step::Continue
    }

    fn literal_newline(&mut self, index: usize, pos: usize) -> Step {
        let literal = &mut self.literals[index];
        if let Some(line_start) = literal.heredoc.as_ref().map(|heredoc| heredoc.line_start) {
            literal.extend_string(b"\n", pos, pos + 1);
            literal.flush_string(&mut self.emitter);
            // A heredoc opened inside this line's interpolation already
            // consumed the lines after it.
            let next = self.herebody_s.take().unwrap_or(pos + 1);
            if let Some(heredoc) = literal.heredoc.as_mut() {
                if heredoc.squiggly {
                    let line = self.source.chars().get(line_start..pos).unwrap_or_default();
                    heredoc.infer_indent(line);
                }
                heredoc.line_start = next;
            }
            self.set_pos(next);
            return Step::Continue;
        }

        if literal.is_words() {
            literal.extend_space(pos, pos + 1, &mut self.emitter);
        } else {
            literal.extend_string(b"\n", pos, pos + 1);
            literal.flush_string(&mut self.emitter);
        }
        match self.herebody_s.take() {
            Some(body) => self.set_pos(body),
            None => self.set_pos(pos + 1),
        }
        Step::Continue
    }

    fn open_interpolation(&mut self, index: usize, pos: usize) -> Step {
        let literal = &mut self.literals[index];
        literal.flush_string(&mut self.emitter);
        literal.extend_content();
        self.emitter.emit(TokenKind::StringDbeg, "#{", pos, pos + 2);
        if literal.heredoc.is_some() {
            literal.saved_herebody = self.herebody_s.take();
        }
        self.open_brace();
        self.mode_stack.push(self.mode);
        self.command_start = true;
        self.mode = Mode::Expr(LexState::ExprValue);
        self.set_pos(pos + 2);
        Step::Break
    }

    pub(super) fn close_interpolation(&mut self, pos: usize) -> Step {
        let kind = if self.config.version.at_least(20) {
            TokenKind::StringDend
        } else {
            TokenKind::Rcurly
        };
        self.emit(kind, "}", pos, pos + 1);
        self.close_bracket();
        if let Some(saved) = self.literals.last_mut().and_then(|l| l.saved_herebody.take()) {
            self.herebody_s = Some(saved);
        }
        self.mode = match self.mode_stack.pop() {
            Some(mode) => mode,
            None => self
                .literals
                .last()
                .map_or(Mode::Expr(LexState::ExprEnd), Mode::for_literal),
        };
        self.set_pos(pos + 1);
        Step::Break
    }

    fn interpolate_variable(&mut self, index: usize, pos: usize) -> Step {
        let literal = &mut self.literals[index];
        literal.flush_string(&mut self.emitter);
        literal.extend_content();
        self.emit(TokenKind::StringDvar, "#", pos, pos + 1);
        let end = self.variable(pos + 1).unwrap_or(pos + 1);
        self.set_pos(end);
        Step::Break
    }

    fn close_literal(&mut self, index: usize, pos: usize) -> Step {
        let label = {
            let literal = &self.literals[index];
            literal.label_allowed
                && self.config.version.at_least(22)
                && !self.cond.active()
                && literal.kind.start_token() == TokenKind::StringBeg
                && self.at(pos + 1) == ':'
                && self.at(pos + 2) != ':'
        };
        let closed = self.literals[index].close(pos, pos + 1, label, &mut self.emitter);
        self.pop_literal();
        if closed == Closed::Label {
            self.set_pos(pos + 2);
            self.mode = Mode::Expr(LexState::ExprLabelarg);
        } else {
            self.set_pos(pos + 1);
        }
        Step::Break
    }

    // === Regexp options ===

    pub(super) fn regexp_modifiers(&mut self) -> Step {
        let pos = self.pos();
        let mut end = pos;
        while self.at(end).is_ascii_alphabetic() {
            end += 1;
        }
        let options = self.text(pos, end);
        let unknown: String = options.chars().filter(|&c| !REGEXP_OPTIONS.contains(c)).collect();
        if !unknown.is_empty() {
            self.diagnostic(
                Diagnostic::error(DiagnosticCode::RegexpOptions, self.span(pos, end))
                    .with_arg("options", unknown),
            );
        }
        self.emit(TokenKind::RegexpOpt, options, pos, end);
        self.set_pos(end);
        self.mode = Mode::Expr(LexState::ExprEnd);
        Step::Break
    }

    // === Heredocs ===

    /// Open a heredoc at the `<<` at `pos`. `None` when the text is not a
    /// heredoc opener and should be scanned as an operator.
    pub(super) fn heredoc_opener(&mut self, pos: usize) -> Option<Step> {
        let mut i = pos + 2;
        let (indent, squiggly) = match self.at(i) {
            '-' => (true, false),
            '~' => (true, true),
            _ => (false, false),
        };
        if indent {
            i += 1;
        }

        let quote = self.at(i);
        let (id_start, id_end, resume, type_text) = if matches!(quote, '"' | '\'' | '`') {
            let close = (i + 1..self.len()).find(|&k| self.at(k) == quote)?;
            (i + 1, close, close + 1, format!("<<{quote}"))
        } else if is_ident_start(quote) {
            let end = self.word_end(i);
            (i, end, end, "<<\"".to_owned())
        } else {
            return None;
        };
        let newline = self.source.line_end(resume);
        if squiggly && !self.config.version.at_least(23) {
            self.emit(TokenKind::Lshft, "<<", pos, pos + 2);
            self.set_pos(pos + 2);
            return Some(Step::Break);
        }

        let mut identifier = self.text(id_start, id_end).to_owned();
        if self.config.version.at_least(24) && identifier.contains('\n') {
            let code = match identifier.strip_suffix('\n') {
                Some(stripped) if !stripped.contains('\n') => DiagnosticCode::HeredocIdEndsWithNl,
                _ => DiagnosticCode::HeredocIdHasNewline,
            };
            self.error(code, pos, resume);
            identifier.truncate(identifier.find('\n').unwrap_or(identifier.len()));
        }

        let kind = LiteralKind::from_type(&type_text)?;
        // Without a body line the literal reports `string_eof` at the opener.
        let body = self.herebody_s.take().unwrap_or((newline + 1).min(self.len()));
        trace!(identifier = %identifier, body, "heredoc opened");
        let heredoc = Heredoc::new(identifier, indent, squiggly, resume, body);
        let mut literal = Literal::heredoc(kind, type_text, pos, heredoc);
        literal.open(&mut self.emitter);
        self.mode = Mode::for_literal(&literal);
        self.literals.push(literal);
        self.set_pos(body);
        Some(Step::Continue)
    }

    /// At the start of a heredoc body line, check for the terminator.
    fn heredoc_terminator(&mut self, index: usize, pos: usize) -> Option<Step> {
        let len = self.len();
        let line_end = self.source.line_end(pos);
        let heredoc = self.literals[index].heredoc.as_mut()?;
        if heredoc.line_start != pos || heredoc.checked_line == Some(pos) {
            return None;
        }
        heredoc.checked_line = Some(pos);
        if pos >= len || !heredoc.is_terminator(self.source.slice(pos, line_end)) {
            return None;
        }

        let literal = &mut self.literals[index];
        literal.flush_string(&mut self.emitter);
        let heredoc = literal.heredoc.take()?;
        if heredoc.squiggly {
            if let Some(level) = heredoc.dedent_level {
                self.emitter.dedent(&heredoc.lines, level);
            }
        }
        let text_end = if line_end > pos && self.at(line_end - 1) == '\r' {
            line_end - 1
        } else {
            line_end
        };
        self.emit(TokenKind::StringEnd, heredoc.identifier, pos, text_end);
        self.herebody_s = Some((line_end + 1).min(self.len()));
        self.set_pos(heredoc.resume);
        self.pop_literal();
        trace!(resume = heredoc.resume, "heredoc closed");
        Some(Step::Break)
    }

    // === Embedded documents ===

    /// `=begin` ... `=end`, recorded as one comment.
    pub(super) fn embedded_document(&mut self) -> Step {
        let start = self.pos();
        let mut line = self.source.line_end(start) + 1;
        loop {
            if line >= self.len() {
                return self.fatal(DiagnosticCode::EmbeddedDocument, start, start + 6);
            }
            let line_end = self.source.line_end(line);
            if self.cursor.starts_with_at(line, "=end")
                && (line + 4 >= self.len() || is_space_nl(self.at(line + 4)))
            {
                self.emitter.comment(start, line_end);
                self.set_pos((line_end + 1).min(self.len()));
                trace!(start, end = line_end, "embedded document");
                return Step::Continue;
            }
            line = line_end + 1;
        }
    }
}
