//! Server-script indentation automaton.
//!
//! Statements end at `;`, so unlike the script automaton there is no pending
//! statement state; only `else`/`elseif`, `catch`/`finally` and the `while`
//! of a `do` loop are decided by the next line. Alternative syntax
//! (`if (...):` ... `endif;`) opens an `AltBlock` closed by the matching
//! end keyword.

use crate::lexer::PhpLexState;
use crate::scanner::PhpScanner;
use core_types::{
    Embeds, Flow, FormatterCore, IndentConfig, Language, LineFormatter, LineOutcome, LineState,
    Scanner, Token, TokenKind,
};

#[cfg(test)]
mod tests;

const MAX_CASCADE: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhpKind {
    TopMost,
    Statement,
    Block,
    /// Braces opened inside an expression: closure bodies, namespaces and
    /// the like.
    FunctionBody,
    DeclarationBody,
    MatchArms,
    ArrayLiteral,
    Paren,
    AlignedParen,
    Condition,
    AlignedCondition,
    Ternary,
    If,
    Substatement,
    MaybeElse,
    Else,
    /// Body of `if (...):`, `foreach (...):` and friends.
    AltBlock,
    Loop,
    Do,
    DoWhile,
    Switch,
    SwitchBlock,
    Case,
    CaseBody,
    Try,
    MaybeCatchOrFinally,
    Catch,
    Finally,
    FunctionDeclaration,
}

impl PhpKind {
    fn owns_brace(self) -> bool {
        matches!(
            self,
            PhpKind::Block
                | PhpKind::FunctionBody
                | PhpKind::DeclarationBody
                | PhpKind::MatchArms
                | PhpKind::SwitchBlock
        )
    }

    fn owns_paren(self) -> bool {
        matches!(
            self,
            PhpKind::Paren | PhpKind::AlignedParen | PhpKind::Condition | PhpKind::AlignedCondition
        )
    }

    fn is_barrier(self) -> bool {
        self.owns_brace()
            || matches!(
                self,
                PhpKind::AltBlock | PhpKind::CaseBody | PhpKind::Substatement | PhpKind::Else
            )
    }

    /// States whose contents sit one level deeper: markup between two
    /// server-script regions is indented once per open body.
    pub fn is_body(self) -> bool {
        matches!(
            self,
            PhpKind::Block
                | PhpKind::FunctionBody
                | PhpKind::DeclarationBody
                | PhpKind::SwitchBlock
                | PhpKind::CaseBody
                | PhpKind::AltBlock
                | PhpKind::Substatement
                | PhpKind::Else
        )
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PhpAutomaton;

impl PhpAutomaton {
    /// Settles states left open by the previous line and computes the indent
    /// of the current one from its first code token.
    pub fn line_indent<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>) -> i32 {
        let Some(first) = first_code_token(core) else {
            let mut probe = core.clone();
            self.settle_pending(&mut probe, None);
            return probe.indent_depth();
        };
        self.settle_pending(core, Some(first));

        let depth = core.indent_depth();
        let unit = core.unit();
        let top = core.top_as::<PhpKind>();
        let saved = core.top().saved_indent_depth;
        match first.kind {
            TokenKind::RightBrace => self
                .find(core, PhpKind::owns_brace, |_| false)
                .map_or(depth, |i| core.depth_of(i) - unit),
            TokenKind::RightBracket => self
                .find(core, |k| k == PhpKind::ArrayLiteral, PhpKind::is_barrier)
                .map_or(depth, |i| core.depth_of(i) - unit),
            TokenKind::RightParen => match self.find(core, PhpKind::owns_paren, PhpKind::is_barrier) {
                Some(i) => match core.kind_as::<PhpKind>(i) {
                    Some(PhpKind::AlignedParen | PhpKind::AlignedCondition) => core.depth_of(i) - 1,
                    _ => core.depth_of(i) - unit,
                },
                None => depth,
            },
            TokenKind::EndKeyword => self
                .find(core, |k| matches!(k, PhpKind::AltBlock | PhpKind::SwitchBlock), |_| false)
                .map_or(depth, |i| core.depth_of(i) - unit),
            TokenKind::Else | TokenKind::ElseIf
                if matches!(top, Some(PhpKind::MaybeElse | PhpKind::AltBlock)) =>
            {
                saved
            }
            TokenKind::Catch | TokenKind::Finally if top == Some(PhpKind::MaybeCatchOrFinally) => {
                saved
            }
            TokenKind::While if top == Some(PhpKind::DoWhile) => saved,
            TokenKind::LeftBrace
                if matches!(
                    top,
                    Some(PhpKind::Substatement | PhpKind::Else | PhpKind::FunctionDeclaration)
                ) =>
            {
                saved
            }
            TokenKind::Case | TokenKind::Default if top == Some(PhpKind::CaseBody) => saved,
            TokenKind::Colon if top == Some(PhpKind::Ternary) => depth - 2,
            _ => depth,
        }
    }

    pub fn step<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>, tk: Token) -> Flow {
        if tk.language != Language::ServerScript
            || tk.kind.is_comment()
            || matches!(tk.kind, TokenKind::ServerScriptOpen | TokenKind::ServerScriptClose)
        {
            return Flow::Advance;
        }
        let Some(top) = core.top_as::<PhpKind>() else {
            log::debug!(target: "php.formatter", "token {:?} outside a server-script state", tk.kind);
            return Flow::Advance;
        };
        match tk.kind {
            TokenKind::RightBrace => return self.close_brace(core),
            TokenKind::RightParen => return self.close_paren(core),
            TokenKind::RightBracket => return self.close_bracket(core),
            TokenKind::EndKeyword => return self.close_alternative(core),
            _ => {}
        }

        match top {
            PhpKind::TopMost
            | PhpKind::Block
            | PhpKind::FunctionBody
            | PhpKind::DeclarationBody
            | PhpKind::CaseBody
            | PhpKind::Substatement
            | PhpKind::Else
            | PhpKind::AltBlock => self.statement(core, top, tk),
            PhpKind::SwitchBlock => match tk.kind {
                TokenKind::Case | TokenKind::Default => {
                    core.push_as(PhpKind::Case, core.line_indent() + core.unit());
                    Flow::Advance
                }
                TokenKind::Semicolon => Flow::Advance,
                _ => self.statement(core, top, tk),
            },
            PhpKind::Case if matches!(tk.kind, TokenKind::Colon | TokenKind::Semicolon) => {
                let label = core.top().saved_indent_depth;
                core.turn_into_as(PhpKind::CaseBody, label + core.unit());
                Flow::Advance
            }
            PhpKind::Statement
            | PhpKind::Paren
            | PhpKind::AlignedParen
            | PhpKind::Condition
            | PhpKind::AlignedCondition
            | PhpKind::ArrayLiteral
            | PhpKind::MatchArms
            | PhpKind::Ternary
            | PhpKind::Case => self.expression(core, top, tk),
            PhpKind::If
            | PhpKind::Loop
            | PhpKind::Switch
            | PhpKind::Catch
            | PhpKind::Try
            | PhpKind::Finally
            | PhpKind::Do
            | PhpKind::FunctionDeclaration => self.head(core, top, tk),
            PhpKind::MaybeElse => {
                let saved = core.top().saved_indent_depth;
                // `else:` belongs to an enclosing alternative-syntax `if`.
                let alternative = opens_alternative(core, tk);
                match tk.kind {
                    TokenKind::Else if !alternative => {
                        core.turn_into_as(PhpKind::Else, saved + core.unit());
                    }
                    TokenKind::ElseIf => core.turn_into_as(PhpKind::If, saved),
                    _ => {
                        self.leave(core, true);
                        return Flow::Reprocess;
                    }
                }
                Flow::Advance
            }
            PhpKind::MaybeCatchOrFinally => {
                let saved = core.top().saved_indent_depth;
                match tk.kind {
                    TokenKind::Catch => core.turn_into_as(PhpKind::Catch, saved),
                    TokenKind::Finally => core.turn_into_as(PhpKind::Finally, saved),
                    _ => {
                        self.leave(core, true);
                        return Flow::Reprocess;
                    }
                }
                Flow::Advance
            }
            PhpKind::DoWhile => match tk.kind {
                TokenKind::While => {
                    let saved = core.top().saved_indent_depth;
                    core.turn_into_as(PhpKind::Statement, saved + core.unit());
                    Flow::Advance
                }
                TokenKind::Semicolon => {
                    self.leave(core, true);
                    Flow::Advance
                }
                _ => {
                    self.leave(core, true);
                    Flow::Reprocess
                }
            },
        }
    }

    fn statement<K: Embeds<PhpKind>>(
        &self,
        core: &mut FormatterCore<K>,
        top: PhpKind,
        tk: Token,
    ) -> Flow {
        let unit = core.unit();
        match tk.kind {
            TokenKind::Semicolon => {
                if matches!(top, PhpKind::Substatement | PhpKind::Else) {
                    self.leave(core, true);
                }
            }
            TokenKind::Colon if matches!(top, PhpKind::Substatement | PhpKind::Else) => {
                let base = core.top().saved_indent_depth;
                core.turn_into_as(PhpKind::AltBlock, base + unit);
            }
            TokenKind::LeftBrace => match top {
                PhpKind::Substatement | PhpKind::Else => {
                    let base = core.top().saved_indent_depth;
                    self.pop(core);
                    core.push_as(PhpKind::Block, base + unit);
                }
                _ => core.push_as(PhpKind::Block, core.line_indent() + unit),
            },
            TokenKind::Else | TokenKind::ElseIf if top == PhpKind::AltBlock => {
                // Next branch of an alternative-syntax `if`.
                self.pop(core);
                if core.top_as::<PhpKind>() != Some(PhpKind::If) {
                    log::debug!(target: "php.formatter", "{:?} without its `if:`", tk.kind);
                    return Flow::Advance;
                }
                if tk.kind == TokenKind::Else {
                    core.push_as(PhpKind::Substatement, core.indent_depth() + unit);
                }
            }
            TokenKind::If => {
                if top == PhpKind::Else && !core.is_first_token() {
                    self.pop(core);
                    core.push_as(PhpKind::If, core.indent_depth());
                } else {
                    core.push_as(PhpKind::If, core.line_indent());
                }
            }
            TokenKind::For | TokenKind::Foreach | TokenKind::While => {
                core.push_as(PhpKind::Loop, core.line_indent());
            }
            TokenKind::Do => {
                let depth = core.line_indent();
                core.push_as(PhpKind::Do, depth);
                core.push_as(PhpKind::Substatement, depth + unit);
            }
            TokenKind::Switch => core.push_as(PhpKind::Switch, core.line_indent()),
            TokenKind::Try => core.push_as(PhpKind::Try, core.line_indent()),
            TokenKind::Function | TokenKind::Class => {
                core.push_as(PhpKind::FunctionDeclaration, core.line_indent() + unit);
            }
            TokenKind::Case | TokenKind::Default if top == PhpKind::CaseBody => {
                self.pop(core);
                return Flow::Reprocess;
            }
            TokenKind::Else | TokenKind::ElseIf | TokenKind::Catch | TokenKind::Finally => {
                log::debug!(target: "php.formatter", "{:?} without its statement in {top:?}", tk.kind);
            }
            _ => {
                core.push_as(PhpKind::Statement, core.line_indent() + unit);
                return Flow::Reprocess;
            }
        }
        Flow::Advance
    }

    fn expression<K: Embeds<PhpKind>>(
        &self,
        core: &mut FormatterCore<K>,
        top: PhpKind,
        tk: Token,
    ) -> Flow {
        let unit = core.unit();
        match tk.kind {
            TokenKind::Semicolon => match top {
                PhpKind::Statement => self.leave(core, true),
                PhpKind::Ternary => {
                    self.pop(core);
                    return Flow::Reprocess;
                }
                _ => {}
            },
            TokenKind::Comma if top == PhpKind::Ternary => {
                self.pop(core);
                return Flow::Reprocess;
            }
            TokenKind::LeftParen => {
                self.open_paren(core, tk, PhpKind::Paren, PhpKind::AlignedParen);
            }
            TokenKind::LeftBracket => {
                core.push_as(PhpKind::ArrayLiteral, core.line_indent() + unit);
            }
            TokenKind::LeftBrace => {
                let kind = if opens_match_arms(core) {
                    PhpKind::MatchArms
                } else {
                    PhpKind::FunctionBody
                };
                core.push_as(kind, core.line_indent() + unit);
            }
            TokenKind::Question => core.push_as(PhpKind::Ternary, core.column(tk.offset) + 2),
            _ => {}
        }
        Flow::Advance
    }

    fn head<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>, top: PhpKind, tk: Token) -> Flow {
        let unit = core.unit();
        match (top, tk.kind) {
            (PhpKind::If | PhpKind::Loop | PhpKind::Switch | PhpKind::Catch, TokenKind::LeftParen) => {
                self.open_paren(core, tk, PhpKind::Condition, PhpKind::AlignedCondition);
            }
            (PhpKind::Switch, TokenKind::LeftBrace | TokenKind::Colon) => {
                core.push_as(PhpKind::SwitchBlock, core.indent_depth() + unit);
            }
            (PhpKind::If, TokenKind::Else) => {
                core.push_as(PhpKind::Substatement, core.indent_depth() + unit);
            }
            // `elseif` keeps the alternative-syntax `if` open.
            (PhpKind::If, TokenKind::ElseIf) => {}
            (
                PhpKind::If | PhpKind::Loop | PhpKind::Catch | PhpKind::Try | PhpKind::Finally,
                TokenKind::LeftBrace,
            ) => core.push_as(PhpKind::Block, core.indent_depth() + unit),
            (PhpKind::FunctionDeclaration, TokenKind::LeftParen) => {
                self.open_paren(core, tk, PhpKind::Paren, PhpKind::AlignedParen);
            }
            (PhpKind::FunctionDeclaration, TokenKind::LeftBrace) => {
                let kind = match core.previous_token().map(|t| t.kind) {
                    None | Some(TokenKind::RightParen) => PhpKind::FunctionBody,
                    Some(_) => PhpKind::DeclarationBody,
                };
                core.push_as(kind, core.line_indent() + unit);
            }
            (PhpKind::FunctionDeclaration, TokenKind::Semicolon) => self.leave(core, true),
            _ => {
                log::trace!(target: "php.formatter", "skipping {:?} in {top:?}", tk.kind);
            }
        }
        Flow::Advance
    }

    fn close_brace<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>) -> Flow {
        let Some(i) = self.find(core, PhpKind::owns_brace, |_| false) else {
            log::debug!(target: "php.formatter", "unmatched `}}`");
            return Flow::Advance;
        };
        self.unwind(core, i);
        match core.top_as::<PhpKind>() {
            Some(PhpKind::Block | PhpKind::SwitchBlock) => self.leave(core, true),
            Some(PhpKind::FunctionBody | PhpKind::DeclarationBody | PhpKind::MatchArms) => {
                self.pop(core);
                // A body closing its statement (`function () {...}`, a class
                // declaration) completes it; no `;` follows.
                if matches!(
                    core.top_as::<PhpKind>(),
                    Some(PhpKind::FunctionDeclaration | PhpKind::Statement)
                ) {
                    self.leave(core, true);
                }
            }
            _ => {
                self.pop(core);
            }
        }
        Flow::Advance
    }

    fn close_paren<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>) -> Flow {
        let Some(i) = self.find(core, PhpKind::owns_paren, PhpKind::is_barrier) else {
            log::debug!(target: "php.formatter", "unmatched `)`");
            return Flow::Advance;
        };
        self.unwind(core, i);
        let closed = core.top_as::<PhpKind>();
        self.pop(core);
        if matches!(closed, Some(PhpKind::Condition | PhpKind::AlignedCondition))
            && matches!(core.top_as::<PhpKind>(), Some(PhpKind::If | PhpKind::Loop))
        {
            core.push_as(PhpKind::Substatement, core.indent_depth() + core.unit());
        }
        Flow::Advance
    }

    fn close_bracket<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>) -> Flow {
        if let Some(i) = self.find(core, |k| k == PhpKind::ArrayLiteral, PhpKind::is_barrier) {
            self.unwind(core, i);
            self.pop(core);
        }
        Flow::Advance
    }

    // `endif`, `endforeach`, ...: closes the alternative-syntax body and the
    // construct that opened it.
    fn close_alternative<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>) -> Flow {
        let Some(i) = self.find(
            core,
            |k| matches!(k, PhpKind::AltBlock | PhpKind::SwitchBlock),
            |_| false,
        ) else {
            log::debug!(target: "php.formatter", "end keyword without an open block");
            return Flow::Advance;
        };
        self.unwind(core, i);
        self.pop(core);
        if matches!(
            core.top_as::<PhpKind>(),
            Some(PhpKind::If | PhpKind::Loop | PhpKind::Switch)
        ) {
            self.pop(core);
        }
        Flow::Advance
    }

    fn open_paren<K: Embeds<PhpKind>>(
        &self,
        core: &mut FormatterCore<K>,
        tk: Token,
        hanging: PhpKind,
        aligned: PhpKind,
    ) {
        if core.is_last_token() {
            core.push_as(hanging, core.line_indent() + core.unit());
        } else {
            core.push_as(aligned, core.column(tk.end()));
        }
    }

    fn settle_pending<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>, first: Option<Token>) {
        let first_kind = first.map(|t| t.kind);
        for _ in 0..MAX_CASCADE {
            let finished = match core.top_as::<PhpKind>() {
                Some(PhpKind::MaybeElse) => match first {
                    Some(tk) if tk.kind == TokenKind::Else => opens_alternative(core, tk),
                    Some(tk) => tk.kind != TokenKind::ElseIf,
                    None => true,
                },
                Some(PhpKind::MaybeCatchOrFinally) => {
                    !matches!(first_kind, Some(TokenKind::Catch | TokenKind::Finally))
                }
                Some(PhpKind::DoWhile) => first_kind != Some(TokenKind::While),
                _ => false,
            };
            if !finished {
                return;
            }
            self.leave(core, true);
        }
    }

    fn leave<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>, statement_done: bool) {
        self.pop(core);
        if !statement_done {
            return;
        }
        for _ in 0..MAX_CASCADE {
            let next = match core.top_as::<PhpKind>() {
                Some(
                    PhpKind::Substatement
                    | PhpKind::Else
                    | PhpKind::Loop
                    | PhpKind::Finally
                    | PhpKind::FunctionDeclaration
                    | PhpKind::Switch
                    | PhpKind::Statement,
                ) => {
                    self.pop(core);
                    continue;
                }
                Some(PhpKind::If) => PhpKind::MaybeElse,
                Some(PhpKind::Try | PhpKind::Catch) => PhpKind::MaybeCatchOrFinally,
                Some(PhpKind::Do) => PhpKind::DoWhile,
                _ => return,
            };
            let saved = core.top().saved_indent_depth;
            core.turn_into_as(next, saved);
            return;
        }
    }

    fn pop<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>) -> bool {
        match core.top_as::<PhpKind>() {
            Some(PhpKind::TopMost) | None => false,
            Some(_) => core.pop().is_some(),
        }
    }

    fn unwind<K: Embeds<PhpKind>>(&self, core: &mut FormatterCore<K>, count: usize) {
        for _ in 0..count {
            self.pop(core);
        }
    }

    fn find<K: Embeds<PhpKind>>(
        &self,
        core: &FormatterCore<K>,
        wanted: impl Fn(PhpKind) -> bool,
        barrier: impl Fn(PhpKind) -> bool,
    ) -> Option<usize> {
        for i in 0..core.stack().len() {
            match core.kind_as::<PhpKind>(i) {
                Some(kind) if wanted(kind) => return Some(i),
                Some(PhpKind::TopMost) | None => return None,
                Some(kind) if barrier(kind) => return None,
                Some(_) => {}
            }
        }
        None
    }
}

/// First token of the line that drives indentation: comments and a leading
/// open bracket do not count.
pub fn first_code_token<K: Embeds<PhpKind>>(core: &FormatterCore<K>) -> Option<Token> {
    core.tokens().iter().copied().find(|t| {
        t.language == Language::ServerScript
            && !t.kind.is_comment()
            && t.kind != TokenKind::ServerScriptOpen
    })
}

// `else:` of an alternative-syntax `if`.
fn opens_alternative<K: Embeds<PhpKind>>(core: &FormatterCore<K>, tk: Token) -> bool {
    core.tokens()
        .iter()
        .find(|t| t.offset > tk.offset && !t.kind.is_comment())
        .is_some_and(|t| t.kind == TokenKind::Colon)
}

// `{` right after `match (...)`.
fn opens_match_arms<K: Embeds<PhpKind>>(core: &FormatterCore<K>) -> bool {
    let before = &core.tokens()[..core.token_index()];
    if before.last().map(|t| t.kind) != Some(TokenKind::RightParen) {
        return false;
    }
    let mut depth = 0usize;
    for (i, t) in before.iter().enumerate().rev() {
        match t.kind {
            TokenKind::RightParen => depth += 1,
            TokenKind::LeftParen => {
                depth -= 1;
                if depth == 0 {
                    return i
                        .checked_sub(1)
                        .and_then(|j| before.get(j))
                        .is_some_and(|k| {
                            k.kind == TokenKind::Keyword
                                && core.token_text(*k).eq_ignore_ascii_case("match")
                        });
                }
            }
            _ => {}
        }
    }
    false
}

/// Standalone server-script formatter.
#[derive(Clone, Debug)]
pub struct PhpFormatter {
    scanner: PhpScanner,
    automaton: PhpAutomaton,
    core: FormatterCore<PhpKind>,
    starts_in_code: bool,
}

impl PhpFormatter {
    /// Formatter for whole files, which start outside code.
    pub fn new(config: IndentConfig) -> Self {
        Self {
            scanner: PhpScanner::new(),
            automaton: PhpAutomaton,
            core: FormatterCore::new(config, PhpKind::TopMost),
            starts_in_code: false,
        }
    }

    /// Formatter for code fragments without an open bracket.
    pub fn for_fragment(config: IndentConfig) -> Self {
        Self {
            starts_in_code: true,
            ..Self::new(config)
        }
    }
}

impl Default for PhpFormatter {
    fn default() -> Self {
        Self::new(IndentConfig::default())
    }
}

impl LineFormatter for PhpFormatter {
    type Kind = PhpKind;
    type Lexer = PhpLexState;

    fn config(&self) -> &IndentConfig {
        self.core.config()
    }

    fn initial_state(&self) -> LineState<PhpKind, PhpLexState> {
        let lexer = if self.starts_in_code {
            PhpLexState::in_code()
        } else {
            PhpLexState::default()
        };
        self.core.initial_state(lexer)
    }

    fn tokenize(&self, text: &str, lexer: &mut PhpLexState) -> Vec<Token> {
        self.scanner.scan_line(text, lexer)
    }

    fn format_line(
        &mut self,
        text: &str,
        begin: &LineState<PhpKind, PhpLexState>,
    ) -> LineOutcome<PhpKind, PhpLexState> {
        let mut lexer = begin.lexer_state.clone();
        let tokens = self.tokenize(text, &mut lexer);
        self.core.restore(begin);
        self.core.begin_line(text, tokens);

        let outside_code = !begin.lexer_state.in_code
            && self.core.tokens().first().is_some_and(|t| t.kind == TokenKind::Text);
        let indent = if begin.lexer_state.preserves_indent() || outside_code {
            self.core.user_indent()
        } else {
            self.automaton.line_indent(&mut self.core)
        };
        self.core.set_line_indent(indent);
        log::trace!(target: "php.formatter", "line indent {indent} for {text:?}");

        while let Some(tk) = self.core.token() {
            let flow = self.automaton.step(&mut self.core, tk);
            self.core.settle(flow);
        }

        LineOutcome {
            tokens: self.core.take_tokens(),
            end: self.core.snapshot(lexer),
            line_indent: self.core.line_indent(),
        }
    }

    fn indent_for_new_line_after(&self, end: &LineState<PhpKind, PhpLexState>) -> i32 {
        if end.lexer_state.preserves_indent() {
            return end.indent_depth;
        }
        let mut probe = self.core.clone();
        probe.restore(end);
        probe.begin_line("", Vec::new());
        self.automaton.line_indent(&mut probe)
    }
}
