//! Expression states: everything outside literal bodies.

use rb_diagnostic::{Diagnostic, DiagnosticCode};
use rb_ir::TokenKind;
use rb_lexer_core::char_class::{
    is_constant_start, is_ident_char, is_ident_start, is_space, is_space_nl,
};
use tracing::trace;

use super::{LexState, Lexer, Mode, Step};
use crate::escape;
use crate::keywords::{self, Keyword, KeywordClass};
use crate::literal::LiteralKind;
use crate::numeric;
use crate::operators;

/// Words after which a command's arguments cannot continue.
fn ends_command(word: &str) -> bool {
    keywords::is_modifier(word)
        || matches!(
            word,
            "and" | "or" | "then" | "do" | "in" | "end" | "ensure" | "else" | "elsif" | "when"
        )
}

fn quote_kind(quote: char) -> LiteralKind {
    match quote {
        '\'' => LiteralKind::SingleQuote,
        '`' => LiteralKind::Backtick,
        _ => LiteralKind::DoubleQuote,
    }
}

impl Lexer<'_> {
    pub(super) fn expr_step(&mut self, state: LexState, cmd_state: bool) -> Step {
        match state {
            LexState::LineBegin => self.line_begin(),
            LexState::ExprValue => self.expr_value(),
            LexState::ExprBeg => self.expr_beg(),
            LexState::ExprMid => self.expr_mid(),
            LexState::ExprArg => self.expr_arg(),
            LexState::ExprCmdarg => self.expr_cmdarg(),
            LexState::ExprEnd => self.expr_end(cmd_state),
            LexState::ExprEndarg => self.expr_endarg(),
            LexState::ExprEndfn => self.expr_endfn(),
            LexState::ExprDot => self.expr_dot(cmd_state),
            LexState::ExprFname => self.expr_fname(),
            LexState::ExprLabelarg => self.expr_labelarg(),
        }
    }

    /// Switch state without consuming anything.
    fn goto(&mut self, state: LexState) -> Step {
        self.mode = Mode::Expr(state);
        Step::Continue
    }

    /// Emit a token spanning `start..end`, continue after it in `state`.
    fn token(&mut self, kind: TokenKind, start: usize, end: usize, state: LexState) -> Step {
        self.emit_source(kind, start, end);
        self.set_pos(end);
        self.mode = Mode::Expr(state);
        Step::Break
    }

    /// Blanks and comments, skipped alike by every expression state.
    fn skip_trivia(&mut self) -> Option<Step> {
        let pos = self.pos();
        let c = self.at(pos);
        if (pos < self.len() && is_space(c)) || (c == '\\' && self.at(pos + 1) == '\n') {
            return Some(self.skip_blanks());
        }
        (c == '#').then(|| self.comment())
    }

    /// The bare word `word` at `at`, with no `?`, `!` or `:` attached.
    fn word_at(&self, at: usize, word: &str) -> bool {
        let end = self.word_end(at);
        self.text(at, end) == word && !matches!(self.at(end), '?' | '!' | ':')
    }

    fn open_quote(&mut self, quote: char, start: usize) -> Step {
        self.push_literal(quote_kind(quote), start, start + 1, quote, quote != '`')
    }

    // === Statement starts ===

    fn line_begin(&mut self) -> Step {
        if let Some(step) = self.skip_trivia() {
            return step;
        }
        let pos = self.pos();
        if self.is_eof_at(pos) {
            return self.at_eof();
        }
        if self.at(pos) == '\n' {
            self.consume_newline();
            return Step::Continue;
        }
        if self.emitter.is_line_start(pos)
            && self.cursor.starts_with_at(pos, "__END__")
            && (pos + 7 >= self.len() || self.at(pos + 7) == '\n')
        {
            trace!(pos, "__END__ reached");
            self.halted = true;
            return Step::Break;
        }
        self.goto(LexState::ExprValue)
    }

    fn expr_value(&mut self) -> Step {
        if let Some(step) = self.skip_trivia() {
            return step;
        }
        let pos = self.pos();
        if self.is_eof_at(pos) {
            return self.at_eof();
        }
        match self.at(pos) {
            '\n' => {
                self.consume_newline();
                self.goto(LexState::LineBegin)
            }
            c @ ('"' | '\'') => self.open_quote(c, pos),
            _ if self.label_end(pos).is_some() => self.goto(LexState::ExprEnd),
            _ => self.goto(LexState::ExprBeg),
        }
    }

    fn expr_beg(&mut self) -> Step {
        if let Some(step) = self.skip_trivia() {
            return step;
        }
        let pos = self.pos();
        if self.is_eof_at(pos) {
            return self.at_eof();
        }
        let c = self.at(pos);
        let next = self.at(pos + 1);
        match c {
            '\n' => {
                self.consume_newline();
                Step::Continue
            }
            '+' | '-' if next.is_ascii_digit() => {
                self.token(TokenKind::UnaryNum, pos, pos + 1, LexState::ExprEnd)
            }
            '/' => self.push_literal(LiteralKind::Regexp, pos, pos + 1, '/', false),
            '%' => self.percent_literal(pos),
            '<' if next == '<' => match self.heredoc_opener(pos) {
                Some(step) => step,
                None => self.goto(LexState::ExprEnd),
            },
            ':' => self.symbol(pos),
            '?' => self.character(pos),
            '(' => {
                self.open_bracket();
                self.token(TokenKind::Lparen, pos, pos + 1, LexState::ExprBeg)
            }
            '[' => {
                self.open_bracket();
                self.token(TokenKind::Lbrack, pos, pos + 1, LexState::ExprBeg)
            }
            '{' if self.lambda_stack.last() == Some(&self.paren_nest) => {
                self.emit_lbrace(TokenKind::Lbrace, pos)
            }
            '{' => {
                self.open_brace();
                self.token(TokenKind::Lbrace, pos, pos + 1, LexState::ExprBeg)
            }
            '"' | '\'' | '`' => self.open_quote(c, pos),
            '*' | '&' | '+' | '-' => self.prefix_operator(pos),
            c if is_ident_start(c) => self.beg_word(pos),
            _ => self.goto(LexState::ExprEnd),
        }
    }

    /// A unary operator or splat at the start of an expression.
    fn prefix_operator(&mut self, pos: usize) -> Step {
        let Some(op) = operators::scan_operator(self.source.chars(), pos) else {
            return self.goto(LexState::ExprEnd);
        };
        let end = pos + op.len();
        if op == "**" && !self.config.version.at_least(20) {
            return self.goto(LexState::ExprEnd);
        }
        if self.at(end) == '=' && operators::is_assignable(op) {
            return self.goto(LexState::ExprEnd);
        }
        match operators::punctuation_begin(op) {
            Some(kind) if matches!(op, "*" | "**" | "&" | "+" | "-") => {
                self.emit(kind, op, pos, end);
                self.set_pos(end);
                Step::Break
            }
            _ => self.goto(LexState::ExprEnd),
        }
    }

    fn beg_word(&mut self, pos: usize) -> Step {
        if let Some(end) = self.label_end(pos) {
            return self.label(pos, end);
        }
        let end = self.word_end(pos);
        let word = self.text(pos, end);
        if !matches!(self.at(end), '?' | '!') && keywords::is_modifier(word) {
            if let Some(keyword) = keywords::lookup(word) {
                if matches!(word, "while" | "until") {
                    self.push_cond();
                }
                self.command_start = true;
                return self.token(keyword.begin, pos, end, LexState::ExprValue);
            }
        }
        self.goto(LexState::ExprEnd)
    }

    fn label(&mut self, start: usize, end: usize) -> Step {
        let name = self.text(start, end - 1);
        self.emit(TokenKind::Label, name, start, end);
        self.set_pos(end);
        self.mode = Mode::Expr(LexState::ExprLabelarg);
        Step::Break
    }

    fn percent_literal(&mut self, pos: usize) -> Step {
        let mut type_end = pos + 1;
        if self.at(type_end).is_ascii_alphabetic() {
            type_end += 1;
        }
        if type_end >= self.len() {
            return self.fatal(DiagnosticCode::StringEof, pos, pos + 1);
        }
        let delimiter = self.at(type_end);
        let type_text = self.text(pos, type_end);
        let kind = match LiteralKind::from_type(type_text) {
            Some(LiteralKind::Symbols | LiteralKind::InterpSymbols)
                if !self.config.version.at_least(20) =>
            {
                None
            }
            kind => kind.filter(|_| !delimiter.is_ascii_alphanumeric()),
        };
        let kind = kind.unwrap_or_else(|| {
            self.diagnostic(
                Diagnostic::error(DiagnosticCode::UnexpectedPercentStr, self.span(pos, type_end))
                    .with_arg("type", type_text),
            );
            LiteralKind::PercentUpperQ
        });
        self.push_literal(kind, pos, type_end + 1, delimiter, false)
    }

    fn symbol(&mut self, pos: usize) -> Step {
        let next = self.at(pos + 1);
        match next {
            '"' => return self.push_literal(LiteralKind::SymbolDouble, pos, pos + 2, '"', false),
            '\'' => return self.push_literal(LiteralKind::SymbolSingle, pos, pos + 2, '\'', false),
            ':' => return self.token(TokenKind::Colon3, pos, pos + 2, LexState::ExprBeg),
            _ => {}
        }

        if next == '@' {
            let cvar = self.at(pos + 2) == '@';
            let name_start = if cvar { pos + 3 } else { pos + 2 };
            if self.at(name_start).is_ascii_digit() {
                if !self.config.version.at_least(27) {
                    return self.goto(LexState::ExprEnd);
                }
                let end = self.word_end(name_start);
                let code = if cvar {
                    DiagnosticCode::CvarName
                } else {
                    DiagnosticCode::IvarName
                };
                let name = self.text(pos + 1, end);
                self.diagnostic(Diagnostic::error(code, self.span(pos + 1, end)).with_arg("name", name));
                self.emit(TokenKind::Symbol, name, pos, end);
                self.set_pos(end);
                self.mode = Mode::Expr(LexState::ExprEnd);
                return Step::Break;
            }
        }

        let Some(end) = self.symbol_name_end(pos + 1) else {
            return self.goto(LexState::ExprEnd);
        };
        let name = match self.text(pos + 1, end) {
            "!@" => "!",
            "~@" => "~",
            name => name,
        };
        self.emit(TokenKind::Symbol, name, pos, end);
        self.set_pos(end);
        self.mode = Mode::Expr(LexState::ExprEnd);
        Step::Break
    }

    fn symbol_name_end(&self, start: usize) -> Option<usize> {
        match self.at(start) {
            '$' => self.gvar_end(start).map(|(_, end)| end),
            '@' => {
                let name_start = if self.at(start + 1) == '@' { start + 2 } else { start + 1 };
                is_ident_start(self.at(name_start)).then(|| self.word_end(name_start))
            }
            c if is_ident_start(c) => {
                let end = self.word_end(start);
                let suffixed = match self.at(end) {
                    '?' | '!' => self.at(end + 1) != '=',
                    '=' => !matches!(self.at(end + 1), '=' | '~' | '>'),
                    _ => false,
                };
                Some(if suffixed { end + 1 } else { end })
            }
            _ => operators::scan_method_operator(self.source.chars(), start).map(|op| start + op.len()),
        }
    }

    /// `?a` and `?\n` character literals.
    fn character(&mut self, pos: usize) -> Step {
        if pos + 1 >= self.len() {
            return self.fatal(DiagnosticCode::IncompleteEscape, pos, pos + 1);
        }
        let c = self.at(pos + 1);
        if is_space_nl(c) {
            let escape = match c {
                ' ' => "\\s",
                '\t' => "\\t",
                '\n' => "\\n",
                '\r' => "\\r",
                '\x0b' => "\\v",
                _ => "\\f",
            };
            self.diagnostic(
                Diagnostic::warning(DiagnosticCode::InvalidEscapeUse, self.span(pos, pos + 2))
                    .with_arg("escape", escape),
            );
            return self.goto(LexState::ExprEnd);
        }
        // `?ab` is the ternary operator followed by a name.
        if is_ident_char(c) && is_ident_char(self.at(pos + 2)) {
            return self.goto(LexState::ExprEnd);
        }

        let mut value = Vec::new();
        let end = if c == '\\' {
            let mut errors = Vec::new();
            let end = escape::unescape(
                self.source.chars(),
                pos + 1,
                self.config.version,
                &mut value,
                &mut errors,
            );
            self.report_escape_errors(errors);
            if self.halted {
                return Step::Break;
            }
            end
        } else {
            let mut buf = [0u8; 4];
            value.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            pos + 2
        };

        if self.config.version.at_least(19) {
            let text = String::from_utf8_lossy(&value).into_owned();
            self.emit(TokenKind::Character, text, pos, end);
        } else {
            let byte = value.first().copied().unwrap_or(0);
            self.emit(TokenKind::Integer, byte.to_string(), pos, end);
        }
        self.set_pos(end);
        self.mode = Mode::Expr(LexState::ExprEnd);
        Step::Break
    }

    // === After method names ===

    fn expr_arg(&mut self) -> Step {
        let pos = self.pos();
        let at = self.blanks_end(pos);
        let spaced = at > pos;
        if self.is_eof_at(at) || matches!(self.at(at), '\n' | '#') {
            self.set_pos(at);
            return self.goto(LexState::ExprEnd);
        }
        match self.at(at) {
            '(' => return self.paren_after_name(at, spaced),
            '[' if spaced => {
                self.begin_command_args();
                self.open_bracket();
                return self.token(TokenKind::Lbrack, at, at + 1, LexState::ExprBeg);
            }
            '{' => return self.emit_lbrace(TokenKind::Lcurly, at),
            _ => {}
        }
        self.set_pos(at);
        if !spaced {
            let colon = self.at(at) == ':' && self.at(at + 1) != ':';
            return self.goto(if colon { LexState::ExprBeg } else { LexState::ExprEnd });
        }
        if self.starts_argument(at) {
            self.begin_command_args();
            self.goto(LexState::ExprBeg)
        } else {
            self.goto(LexState::ExprEnd)
        }
    }

    fn paren_after_name(&mut self, at: usize, spaced: bool) -> Step {
        if spaced && self.config.version.at_least(19) {
            self.begin_command_args();
            self.open_bracket();
            self.paren_arg_levels.push(self.paren_nest);
            self.token(TokenKind::LparenArg, at, at + 1, LexState::ExprBeg)
        } else {
            self.open_bracket();
            self.token(TokenKind::Lparen2, at, at + 1, LexState::ExprBeg)
        }
    }

    /// Whether the text at `at`, preceded by blanks, begins a command
    /// argument rather than continuing a binary expression.
    fn starts_argument(&mut self, at: usize) -> bool {
        let c = self.at(at);
        let next = self.at(at + 1);
        match c {
            '%' | '/' => {
                let literal = !self.is_eof_at(at + 1) && !is_space_nl(next) && next != '=';
                if literal && c == '/' {
                    self.diagnostic(Diagnostic::warning(
                        DiagnosticCode::AmbiguousLiteral,
                        self.span(at, at + 1),
                    ));
                }
                literal
            }
            '<' if next == '<' => self.looks_like_heredoc(at),
            '?' => !self.is_eof_at(at + 1) && !is_space_nl(next),
            ':' => true,
            '\\' => false,
            c if is_ident_start(c) => {
                if self.label_end(at).is_some() {
                    return true;
                }
                let end = self.word_end(at);
                self.fid_suffix(end) || !ends_command(self.text(at, end))
            }
            _ => match operators::scan_operator(self.source.chars(), at) {
                Some(op @ ("+" | "-" | "*" | "**" | "&")) => {
                    let end = at + op.len();
                    let after = self.at(end);
                    if self.is_eof_at(end) || is_space_nl(after) || after == '=' {
                        return false;
                    }
                    self.diagnostic(
                        Diagnostic::warning(DiagnosticCode::AmbiguousPrefix, self.span(at, end))
                            .with_arg("prefix", op),
                    );
                    true
                }
                Some("->" | "!" | "~" | "::") | None => true,
                Some(_) => false,
            },
        }
    }

    fn looks_like_heredoc(&self, at: usize) -> bool {
        let mut i = at + 2;
        if matches!(self.at(i), '-' | '~') {
            i += 1;
        }
        matches!(self.at(i), '"' | '\'' | '`') || is_ident_start(self.at(i))
    }

    fn expr_cmdarg(&mut self) -> Step {
        let pos = self.pos();
        let at = self.blanks_end(pos);
        if is_ident_start(self.at(at)) && self.word_at(at, "do") {
            let kind = if self.cond.active() {
                self.pop_pushed_cond();
                TokenKind::KwDoCond
            } else {
                TokenKind::KwDo
            };
            self.command_start = true;
            return self.token(kind, at, at + 2, LexState::ExprValue);
        }
        self.goto(LexState::ExprArg)
    }

    fn expr_endarg(&mut self) -> Step {
        if let Some(step) = self.skip_trivia() {
            return step;
        }
        let pos = self.pos();
        match self.at(pos) {
            '{' => self.emit_lbrace(TokenKind::LbraceArg, pos),
            'd' if self.word_at(pos, "do") => {
                self.emit_do(true, pos, pos + 2);
                Step::Break
            }
            _ => self.goto(LexState::ExprEnd),
        }
    }

    fn expr_endfn(&mut self) -> Step {
        let pos = self.pos();
        if let Some(end) = self.label_end(pos) {
            return self.label(pos, end);
        }
        if let Some(step) = self.skip_trivia() {
            return step;
        }
        self.goto(LexState::ExprEnd)
    }

    fn expr_dot(&mut self, cmd_state: bool) -> Step {
        if let Some(step) = self.skip_trivia() {
            return step;
        }
        let pos = self.pos();
        let c = self.at(pos);
        if c == '\n' && pos < self.len() {
            self.consume_newline();
            return Step::Continue;
        }
        if is_ident_start(c) {
            let end = self.word_end(pos);
            let kind = self.word_kind(pos, end);
            let end = if kind == TokenKind::Fid { end + 1 } else { end };
            self.emit_source(kind, pos, end);
            self.set_pos(end);
            let state = self.arg_or_cmdarg(cmd_state);
            // `recv.meth arg do` passes the block to `meth` like a command.
            self.pending_command = Some(self.emitter.len());
            self.mode = Mode::Expr(state);
            return Step::Break;
        }
        if let Some(op) = operators::scan_method_operator(self.source.chars(), pos) {
            if let Some(kind) = operators::punctuation(op) {
                self.emit(kind, op, pos, pos + op.len());
                self.set_pos(pos + op.len());
                self.mode = Mode::Expr(LexState::ExprArg);
                return Step::Break;
            }
        }
        self.goto(LexState::ExprEnd)
    }

    fn expr_fname(&mut self) -> Step {
        if let Some(step) = self.skip_trivia() {
            return step;
        }
        let pos = self.pos();
        let c = self.at(pos);
        let next = self.at(pos + 1);
        if c == '\n' && pos < self.len() {
            self.consume_newline();
            return Step::Continue;
        }
        if is_ident_start(c) {
            return self.method_name(pos);
        }
        match c {
            ':' if next == ':' => self.goto(LexState::ExprEnd),
            ':' => self.goto(LexState::ExprBeg),
            '%' if next == 's' && self.config.version.at_least(23) => self.percent_literal(pos),
            _ => match operators::scan_method_operator(self.source.chars(), pos)
                .and_then(|op| operators::punctuation(op).map(|kind| (op, kind)))
            {
                Some((op, kind)) => {
                    self.emit(kind, op, pos, pos + op.len());
                    self.set_pos(pos + op.len());
                    self.mode = Mode::Expr(LexState::ExprEndfn);
                    Step::Break
                }
                None => self.goto(LexState::ExprEnd),
            },
        }
    }

    /// A method name after `def`, `alias` or `undef`. `def recv.name` emits
    /// the receiver and the dot, then comes back for the name.
    fn method_name(&mut self, pos: usize) -> Step {
        let after_def = self.emitter.last_kind() == Some(TokenKind::KwDef);
        let end = self.word_end(pos);
        let word = self.text(pos, end);
        let suffixed = match self.at(end) {
            '?' | '!' => true,
            '=' => !matches!(self.at(end + 1), '=' | '~' | '>'),
            _ => false,
        };
        let name_end = if suffixed { end + 1 } else { end };
        let kind = match keywords::lookup(word) {
            Some(keyword) if !suffixed => keyword.begin,
            _ if !suffixed && is_constant_start(self.at(pos)) => TokenKind::Constant,
            _ => TokenKind::Identifier,
        };
        self.emit_source(kind, pos, name_end);
        if after_def && self.at(name_end) == '.' {
            return self.token(TokenKind::Dot, name_end, name_end + 1, LexState::ExprFname);
        }
        self.set_pos(name_end);
        self.mode = Mode::Expr(LexState::ExprEndfn);
        Step::Break
    }

    fn expr_mid(&mut self) -> Step {
        if let Some(step) = self.skip_trivia() {
            return step;
        }
        let pos = self.pos();
        let c = self.at(pos);
        if c == '\n' {
            return self.goto(LexState::ExprEnd);
        }
        if is_ident_start(c) {
            let end = self.word_end(pos);
            let word = self.text(pos, end);
            if keywords::is_modifier(word) && !matches!(self.at(end), '?' | '!' | ':') {
                if let Some(keyword) = keywords::lookup(word) {
                    self.end_command_args();
                    self.command_start = true;
                    return self.token(keyword.end, pos, end, LexState::ExprBeg);
                }
            }
        }
        self.goto(LexState::ExprBeg)
    }

    fn expr_labelarg(&mut self) -> Step {
        if let Some(step) = self.skip_trivia() {
            return step;
        }
        let pos = self.pos();
        if self.at(pos) == '\n' && pos < self.len() {
            if self.config.in_kwarg {
                return self.goto(LexState::ExprEnd);
            }
            self.consume_newline();
            return self.goto(LexState::LineBegin);
        }
        self.goto(LexState::ExprBeg)
    }

    /// After a newline that ended an expression: a following `.name` line
    /// continues it, anything else makes the newline a statement break.
    pub(super) fn leading_dot(&mut self) -> Step {
        let pos = self.pos();
        let mut at = pos;
        while at < self.len() && is_space(self.at(at)) {
            at += 1;
        }
        let c = self.at(at);
        let next = self.at(at + 1);
        if (c == '.' && next != '.') || (c == '&' && next == '.') {
            self.set_pos(at);
            return self.goto(LexState::ExprEnd);
        }
        let newline = self.newline_s;
        self.emit(TokenKind::Nl, "", newline, newline + 1);
        self.end_statement();
        self.command_start = true;
        self.mode = Mode::Expr(LexState::LineBegin);
        Step::Break
    }

    // === After expressions ===

    fn expr_end(&mut self, cmd_state: bool) -> Step {
        if let Some(step) = self.skip_trivia() {
            return step;
        }
        let pos = self.pos();
        if self.is_eof_at(pos) {
            return self.at_eof();
        }
        let c = self.at(pos);
        match c {
            '\n' => {
                self.consume_newline();
                self.mode = Mode::LeadingDot;
                Step::Continue
            }
            '\\' => {
                self.error(DiagnosticCode::BareBackslash, pos, pos + 1);
                self.set_pos(pos + 1);
                Step::Continue
            }
            '0'..='9' => self.number(pos),
            '.' if self.at(pos + 1).is_ascii_digit() => self.dot_number(pos),
            '"' | '\'' | '`' => self.open_quote(c, pos),
            '$' | '@' => match self.variable(pos) {
                Some(end) => {
                    self.set_pos(end);
                    self.mode = Mode::Expr(LexState::ExprEnd);
                    Step::Break
                }
                None => self.unexpected(pos),
            },
            c if is_ident_start(c) => self.end_word(pos, cmd_state),
            _ => self.operator(pos),
        }
    }

    fn number(&mut self, pos: usize) -> Step {
        let scan = numeric::classify(self.source.chars(), pos, self.config.version);
        for error in &scan.errors {
            let mut diagnostic = Diagnostic::error(error.code, self.span(error.start, error.end));
            if let Some(c) = error.character {
                diagnostic = diagnostic.with_arg("character", c.to_string());
            }
            self.diagnostic(diagnostic);
        }
        self.emit(scan.kind.token_kind(), scan.text, pos, scan.end);
        self.set_pos(scan.end);
        self.mode = Mode::Expr(LexState::ExprEnd);
        Step::Break
    }

    /// `.5` is reported and read as `0.5`.
    fn dot_number(&mut self, pos: usize) -> Step {
        let mut end = pos + 1;
        while self.at(end).is_ascii_digit() || self.at(end) == '_' {
            end += 1;
        }
        let digits: String = self.text(pos + 1, end).chars().filter(|&c| c != '_').collect();
        self.error(DiagnosticCode::NoDotDigitLiteral, pos, end);
        self.emit(TokenKind::Float, format!("0.{digits}"), pos, end);
        self.set_pos(end);
        self.mode = Mode::Expr(LexState::ExprEnd);
        Step::Break
    }

    fn end_word(&mut self, pos: usize, cmd_state: bool) -> Step {
        let end = self.word_end(pos);
        let word = self.text(pos, end);
        let keyword = if word == "defined" && self.at(end) == '?' {
            keywords::lookup("defined?").map(|keyword| (keyword, end + 1))
        } else if self.fid_suffix(end)
            || (word == "__ENCODING__" && !self.config.version.at_least(19))
        {
            None
        } else {
            keywords::lookup(word).map(|keyword| (keyword, end))
        };
        if let Some((keyword, end)) = keyword {
            return self.end_keyword(keyword, pos, end);
        }

        let kind = self.word_kind(pos, end);
        let end = if kind == TokenKind::Fid { end + 1 } else { end };
        self.emit_source(kind, pos, end);
        self.set_pos(end);
        let state = if kind == TokenKind::Identifier && self.is_declared(word) {
            if self.config.version.at_least(25) {
                LexState::ExprEndfn
            } else {
                LexState::ExprEnd
            }
        } else {
            self.arg_or_cmdarg(cmd_state)
        };
        self.mode = Mode::Expr(state);
        Step::Break
    }

    fn end_keyword(&mut self, keyword: Keyword, start: usize, end: usize) -> Step {
        let word = self.text(start, end);
        if word == "do" {
            self.emit_do(false, start, end);
            return Step::Break;
        }
        if word == "class" {
            let op = self.blanks_end(end);
            if self.cursor.starts_with_at(op, "<<") {
                self.emit_source(TokenKind::KwClass, start, end);
                self.command_start = true;
                return self.token(TokenKind::Lshft, op, op + 2, LexState::ExprValue);
            }
        }

        let state = match keyword.class {
            KeywordClass::Value => {
                if word == "for" {
                    self.push_cond();
                }
                self.command_start = true;
                LexState::ExprValue
            }
            KeywordClass::Modifier => {
                self.end_command_args();
                self.command_start = true;
                LexState::ExprBeg
            }
            KeywordClass::Mid => {
                if word == "rescue" {
                    self.end_command_args();
                }
                LexState::ExprMid
            }
            KeywordClass::Arg if word == "not" && !self.config.version.at_least(19) => {
                LexState::ExprBeg
            }
            KeywordClass::Arg => LexState::ExprArg,
            KeywordClass::End => LexState::ExprEnd,
            KeywordClass::Fname => LexState::ExprFname,
        };
        self.token(keyword.end, start, end, state)
    }

    fn operator(&mut self, pos: usize) -> Step {
        let Some(op) = operators::scan_operator(self.source.chars(), pos) else {
            return self.unexpected(pos);
        };
        let op = match op {
            "&." if !self.config.version.at_least(23) => "&",
            "->" if !self.config.version.at_least(19) => "-",
            op => op,
        };
        let end = pos + op.len();

        if let Some(base) = op.strip_suffix('=').filter(|base| operators::is_assignable(base)) {
            self.emit(TokenKind::OpAsgn, base, pos, end);
            self.set_pos(end);
            self.mode = Mode::Expr(LexState::ExprBeg);
            return Step::Break;
        }
        if operators::is_assignable(op) && self.at(end) == '=' {
            self.emit(TokenKind::OpAsgn, op, pos, end + 1);
            self.set_pos(end + 1);
            self.mode = Mode::Expr(LexState::ExprBeg);
            return Step::Break;
        }

        match op {
            "->" => {
                self.lambda_stack.push(self.paren_nest);
                self.token(TokenKind::Lambda, pos, end, LexState::ExprEndfn)
            }
            "(" => {
                self.open_bracket();
                self.token(TokenKind::Lparen2, pos, end, LexState::ExprBeg)
            }
            "[" => {
                self.open_bracket();
                self.token(TokenKind::Lbrack2, pos, end, LexState::ExprBeg)
            }
            "{" => self.emit_lbrace(TokenKind::Lcurly, pos),
            ")" | "]" | "}" => self.close(op, pos),
            ";" => {
                self.end_statement();
                self.command_start = true;
                self.token(TokenKind::Semi, pos, end, LexState::ExprValue)
            }
            "?" => self.token(TokenKind::Eh, pos, end, LexState::ExprValue),
            "." | "&." | "::" => match operators::punctuation(op) {
                Some(kind) => self.token(kind, pos, end, LexState::ExprDot),
                None => self.unexpected(pos),
            },
            _ => match operators::punctuation(op) {
                Some(kind) => {
                    self.emit(kind, op, pos, end);
                    self.set_pos(end);
                    self.mode = Mode::Expr(LexState::ExprBeg);
                    Step::Break
                }
                None => self.unexpected(pos),
            },
        }
    }

    fn close(&mut self, op: &str, pos: usize) -> Step {
        if op == "}" {
            let closes_interpolation = self
                .literals
                .last_mut()
                .is_some_and(|literal| literal.in_interpolation() && literal.end_interp_brace());
            if closes_interpolation {
                return self.close_interpolation(pos);
            }
        }
        let paren_arg = self.paren_arg_levels.last() == Some(&self.paren_nest);
        self.close_bracket();
        let after_bracket = if self.config.version.at_least(25) {
            LexState::ExprEnd
        } else {
            LexState::ExprEndarg
        };
        let (kind, state) = match op {
            ")" if paren_arg => {
                self.paren_arg_levels.pop();
                (TokenKind::Rparen, LexState::ExprEndarg)
            }
            ")" => (TokenKind::Rparen, LexState::ExprEndfn),
            "]" => (TokenKind::Rbrack, after_bracket),
            _ => (TokenKind::Rcurly, after_bracket),
        };
        self.token(kind, pos, pos + 1, state)
    }

    #[cold]
    fn unexpected(&mut self, pos: usize) -> Step {
        let character = self.at(pos).escape_debug().to_string();
        self.diagnostic(
            Diagnostic::error(DiagnosticCode::Unexpected, self.span(pos, pos + 1))
                .with_arg("character", character),
        );
        self.set_pos(pos + 1);
        Step::Continue
    }
}
