//! Script indentation automaton.
//!
//! Each token is replayed against the top of the stack. Statement-level
//! states (`Block`, `FunctionBody`, ...) start statements and control
//! constructs; expression-level states only open and close brackets. A
//! statement that ends without `;` is parked as `StatementMaybeDone` at the
//! end of its line and settled by the first token of the next line.
//!
//! Like the style automaton this one is generic over the host kind, so the
//! markup formatter can run it for `<script>` bodies.

use crate::config::JsConfig;
use crate::lexer::{JsConstruct, JsLexState};
use crate::scanner::JsScanner;
use core_types::{
    Embeds, Flow, FormatterCore, IndentConfig, LineFormatter, LineOutcome, LineState, Scanner,
    Token, TokenKind,
};


// Bound on chained completions triggered by one `leave`.
const MAX_CASCADE: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsKind {
    TopMost,
    Statement,
    /// Statement whose last line ended in an operand; the next line decides.
    StatementMaybeDone,
    Block,
    FunctionBody,
    /// Class, interface or other declaration body.
    DeclarationBody,
    ObjectLiteral,
    ArrayLiteral,
    Paren,
    AlignedParen,
    /// Parenthesized head of `if`, loops, `switch` and `catch`.
    Condition,
    AlignedCondition,
    Ternary,
    If,
    /// Body of a control construct that is not a block yet.
    Substatement,
    MaybeElse,
    Else,
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
    TemplateExpression,
    JsxTag,
    JsxElement,
    JsxClosingTag,
    JsxExpression,
}

impl JsKind {
    fn owns_brace(self) -> bool {
        matches!(
            self,
            JsKind::Block
                | JsKind::FunctionBody
                | JsKind::DeclarationBody
                | JsKind::ObjectLiteral
                | JsKind::SwitchBlock
                | JsKind::JsxExpression
        )
    }

    fn owns_paren(self) -> bool {
        matches!(
            self,
            JsKind::Paren | JsKind::AlignedParen | JsKind::Condition | JsKind::AlignedCondition
        )
    }

    // States a stray `)` or `]` must not unwind.
    fn is_barrier(self) -> bool {
        self.owns_brace()
            || matches!(
                self,
                JsKind::TemplateExpression
                    | JsKind::JsxTag
                    | JsKind::JsxElement
                    | JsKind::JsxClosingTag
                    | JsKind::CaseBody
                    | JsKind::Substatement
                    | JsKind::Else
            )
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JsAutomaton;

impl JsAutomaton {
    /// Settles states left open by the previous line and computes the indent
    /// of the current one from its first token.
    pub fn line_indent<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>) -> i32 {
        let Some(first) = core.first_token() else {
            // Blank lines do not decide a pending statement.
            let mut probe = core.clone();
            self.settle_pending(&mut probe, None);
            return probe.indent_depth();
        };
        self.settle_pending(core, Some(first));

        let depth = core.indent_depth();
        let unit = core.unit();
        let top = core.top_as::<JsKind>();
        let saved = core.top().saved_indent_depth;
        match first.kind {
            TokenKind::RightBrace => self
                .find(core, JsKind::owns_brace, |_| false)
                .map_or(depth, |i| core.depth_of(i) - unit),
            TokenKind::RightBracket => self
                .find(core, |k| k == JsKind::ArrayLiteral, JsKind::is_barrier)
                .map_or(depth, |i| core.depth_of(i) - unit),
            TokenKind::RightParen => match self.find(core, JsKind::owns_paren, JsKind::is_barrier) {
                Some(i) => match core.kind_as::<JsKind>(i) {
                    Some(JsKind::AlignedParen | JsKind::AlignedCondition) => core.depth_of(i) - 1,
                    _ => core.depth_of(i) - unit,
                },
                None => depth,
            },
            TokenKind::TemplateExpressionClose => self
                .find(core, |k| k == JsKind::TemplateExpression, |_| false)
                .map_or(depth, |i| core.depth_of(i) - unit),
            TokenKind::Else if top == Some(JsKind::MaybeElse) => saved,
            TokenKind::Catch | TokenKind::Finally if top == Some(JsKind::MaybeCatchOrFinally) => {
                saved
            }
            TokenKind::While if top == Some(JsKind::DoWhile) => saved,
            TokenKind::LeftBrace
                if matches!(
                    top,
                    Some(JsKind::Substatement | JsKind::Else | JsKind::FunctionDeclaration)
                ) =>
            {
                saved
            }
            TokenKind::Case | TokenKind::Default if top == Some(JsKind::CaseBody) => saved,
            TokenKind::Colon if top == Some(JsKind::Ternary) => depth - 2,
            TokenKind::EndTagOpen if top == Some(JsKind::JsxElement) => depth - unit,
            TokenKind::TagClose | TokenKind::SelfClosingTagClose
                if top == Some(JsKind::JsxTag) =>
            {
                depth - unit
            }
            _ => depth,
        }
    }

    pub fn step<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>, tk: Token) -> Flow {
        if tk.kind.is_comment() {
            return Flow::Advance;
        }
        let Some(top) = core.top_as::<JsKind>() else {
            log::debug!(target: "js.formatter", "script token {:?} outside a script state", tk.kind);
            return Flow::Advance;
        };
        match tk.kind {
            TokenKind::RightBrace => return self.close_brace(core),
            TokenKind::RightParen => return self.close_paren(core),
            TokenKind::RightBracket => return self.close_bracket(core),
            TokenKind::TemplateExpressionClose => return self.close_template(core),
            _ => {}
        }

        match top {
            JsKind::TopMost
            | JsKind::Block
            | JsKind::FunctionBody
            | JsKind::DeclarationBody
            | JsKind::CaseBody
            | JsKind::Substatement
            | JsKind::Else => self.statement(core, top, tk),
            JsKind::SwitchBlock => match tk.kind {
                TokenKind::Case | TokenKind::Default => {
                    core.push_as(JsKind::Case, core.line_indent() + core.unit());
                    Flow::Advance
                }
                TokenKind::Semicolon => Flow::Advance,
                _ => self.statement(core, top, tk),
            },
            JsKind::Case if tk.kind == TokenKind::Colon => {
                let label = core.top().saved_indent_depth;
                core.turn_into_as(JsKind::CaseBody, label + core.unit());
                Flow::Advance
            }
            JsKind::Statement
            | JsKind::StatementMaybeDone
            | JsKind::Paren
            | JsKind::AlignedParen
            | JsKind::Condition
            | JsKind::AlignedCondition
            | JsKind::ArrayLiteral
            | JsKind::ObjectLiteral
            | JsKind::Ternary
            | JsKind::TemplateExpression
            | JsKind::JsxExpression
            | JsKind::Case => self.expression(core, top, tk),
            JsKind::If
            | JsKind::Loop
            | JsKind::Switch
            | JsKind::Catch
            | JsKind::Try
            | JsKind::Finally
            | JsKind::Do
            | JsKind::FunctionDeclaration => self.head(core, top, tk),
            JsKind::MaybeElse => {
                if tk.kind == TokenKind::Else {
                    let saved = core.top().saved_indent_depth;
                    core.turn_into_as(JsKind::Else, saved + core.unit());
                    return Flow::Advance;
                }
                self.leave(core, true);
                Flow::Reprocess
            }
            JsKind::MaybeCatchOrFinally => {
                let saved = core.top().saved_indent_depth;
                match tk.kind {
                    TokenKind::Catch => core.turn_into_as(JsKind::Catch, saved),
                    TokenKind::Finally => core.turn_into_as(JsKind::Finally, saved),
                    _ => {
                        self.leave(core, true);
                        return Flow::Reprocess;
                    }
                }
                Flow::Advance
            }
            JsKind::DoWhile => match tk.kind {
                TokenKind::While => {
                    let saved = core.top().saved_indent_depth;
                    core.turn_into_as(JsKind::Statement, saved + core.unit());
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
            JsKind::JsxTag | JsKind::JsxElement | JsKind::JsxClosingTag => {
                self.markup(core, top, tk)
            }
        }
    }

    /// Parks a statement whose line ended in an operand.
    pub fn end_line<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>, lexer: &JsLexState) {
        if lexer.construct != JsConstruct::Normal {
            return;
        }
        let Some(last) = core.last_token() else {
            return;
        };
        if last.language != core_types::Language::Script || !ends_operand(core, last) {
            return;
        }
        while core.top_as::<JsKind>() == Some(JsKind::Ternary) {
            self.pop(core);
        }
        if core.top_as::<JsKind>() == Some(JsKind::Statement) {
            core.replace_top_as(JsKind::StatementMaybeDone);
        }
    }

    fn statement<K: Embeds<JsKind>>(
        &self,
        core: &mut FormatterCore<K>,
        top: JsKind,
        tk: Token,
    ) -> Flow {
        let unit = core.unit();
        match tk.kind {
            TokenKind::Semicolon => {
                if matches!(top, JsKind::Substatement | JsKind::Else) {
                    self.leave(core, true);
                }
            }
            TokenKind::LeftBrace => match top {
                JsKind::Substatement | JsKind::Else => {
                    let base = core.top().saved_indent_depth;
                    self.pop(core);
                    core.push_as(JsKind::Block, base + unit);
                }
                _ => core.push_as(JsKind::Block, core.line_indent() + unit),
            },
            TokenKind::If => {
                if top == JsKind::Else && !core.is_first_token() {
                    // `else if` continues the chain at the level of the first `if`.
                    self.pop(core);
                    core.push_as(JsKind::If, core.indent_depth());
                } else {
                    core.push_as(JsKind::If, core.line_indent());
                }
            }
            TokenKind::For | TokenKind::Foreach | TokenKind::While => {
                core.push_as(JsKind::Loop, core.line_indent());
            }
            TokenKind::Do => {
                let depth = core.line_indent();
                core.push_as(JsKind::Do, depth);
                core.push_as(JsKind::Substatement, depth + unit);
            }
            TokenKind::Switch => core.push_as(JsKind::Switch, core.line_indent()),
            TokenKind::Try => core.push_as(JsKind::Try, core.line_indent()),
            TokenKind::Function | TokenKind::Class => {
                core.push_as(JsKind::FunctionDeclaration, core.line_indent() + unit);
            }
            TokenKind::Case | TokenKind::Default if top == JsKind::CaseBody => {
                self.pop(core);
                return Flow::Reprocess;
            }
            TokenKind::Else | TokenKind::Catch | TokenKind::Finally => {
                log::debug!(target: "js.formatter", "{:?} without its statement in {top:?}", tk.kind);
            }
            _ => {
                core.push_as(JsKind::Statement, core.line_indent() + unit);
                return Flow::Reprocess;
            }
        }
        Flow::Advance
    }

    fn expression<K: Embeds<JsKind>>(
        &self,
        core: &mut FormatterCore<K>,
        top: JsKind,
        tk: Token,
    ) -> Flow {
        let unit = core.unit();
        match tk.kind {
            TokenKind::Semicolon => match top {
                JsKind::Statement | JsKind::StatementMaybeDone => self.leave(core, true),
                JsKind::Ternary => {
                    self.pop(core);
                    return Flow::Reprocess;
                }
                _ => {}
            },
            TokenKind::Comma if top == JsKind::Ternary => {
                self.pop(core);
                return Flow::Reprocess;
            }
            TokenKind::LeftParen => self.open_paren(core, tk, JsKind::Paren, JsKind::AlignedParen),
            TokenKind::LeftBracket => {
                core.push_as(JsKind::ArrayLiteral, core.line_indent() + unit);
            }
            TokenKind::LeftBrace => {
                let kind = classify_brace(core);
                core.push_as(kind, core.line_indent() + unit);
            }
            TokenKind::Question => core.push_as(JsKind::Ternary, core.column(tk.offset) + 2),
            TokenKind::TemplateExpressionOpen => {
                core.push_as(JsKind::TemplateExpression, core.line_indent() + unit);
            }
            TokenKind::TagOpen => core.push_as(JsKind::JsxTag, core.line_indent() + unit),
            _ => {}
        }
        Flow::Advance
    }

    fn head<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>, top: JsKind, tk: Token) -> Flow {
        let unit = core.unit();
        match (top, tk.kind) {
            (JsKind::If | JsKind::Loop | JsKind::Switch | JsKind::Catch, TokenKind::LeftParen) => {
                self.open_paren(core, tk, JsKind::Condition, JsKind::AlignedCondition);
            }
            (JsKind::Switch, TokenKind::LeftBrace) => {
                core.push_as(JsKind::SwitchBlock, core.indent_depth() + unit);
            }
            (
                JsKind::If | JsKind::Loop | JsKind::Catch | JsKind::Try | JsKind::Finally,
                TokenKind::LeftBrace,
            ) => core.push_as(JsKind::Block, core.indent_depth() + unit),
            (JsKind::FunctionDeclaration, TokenKind::LeftParen) => {
                self.open_paren(core, tk, JsKind::Paren, JsKind::AlignedParen);
            }
            (JsKind::FunctionDeclaration, TokenKind::LeftBrace) => {
                let kind = match core.previous_token().map(|t| t.kind) {
                    None | Some(TokenKind::RightParen) => JsKind::FunctionBody,
                    Some(_) => JsKind::DeclarationBody,
                };
                core.push_as(kind, core.line_indent() + unit);
            }
            // Overload signature or declaration without a body.
            (JsKind::FunctionDeclaration, TokenKind::Semicolon) => self.leave(core, true),
            _ => {
                log::trace!(target: "js.formatter", "skipping {:?} in {top:?}", tk.kind);
            }
        }
        Flow::Advance
    }

    fn markup<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>, top: JsKind, tk: Token) -> Flow {
        let unit = core.unit();
        match (top, tk.kind) {
            (JsKind::JsxTag, TokenKind::TagClose) => core.replace_top_as(JsKind::JsxElement),
            (JsKind::JsxTag, TokenKind::SelfClosingTagClose)
            | (JsKind::JsxClosingTag, TokenKind::TagClose) => {
                self.pop(core);
            }
            (JsKind::JsxTag | JsKind::JsxElement, TokenKind::LeftBrace) => {
                core.push_as(JsKind::JsxExpression, core.line_indent() + unit);
            }
            (JsKind::JsxElement, TokenKind::TagOpen) => {
                core.push_as(JsKind::JsxTag, core.line_indent() + unit);
            }
            (JsKind::JsxElement, TokenKind::EndTagOpen) => {
                let saved = core.top().saved_indent_depth;
                core.turn_into_as(JsKind::JsxClosingTag, saved);
            }
            _ => {}
        }
        Flow::Advance
    }

    fn close_brace<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>) -> Flow {
        let Some(i) = self.find(core, JsKind::owns_brace, |_| false) else {
            log::debug!(target: "js.formatter", "unmatched `}}`");
            return Flow::Advance;
        };
        self.unwind(core, i);
        match core.top_as::<JsKind>() {
            Some(JsKind::Block | JsKind::SwitchBlock) => self.leave(core, true),
            Some(JsKind::FunctionBody | JsKind::DeclarationBody) => {
                self.pop(core);
                if core.top_as::<JsKind>() == Some(JsKind::FunctionDeclaration) {
                    self.leave(core, true);
                }
            }
            _ => {
                self.pop(core);
            }
        }
        Flow::Advance
    }

    fn close_paren<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>) -> Flow {
        let Some(i) = self.find(core, JsKind::owns_paren, JsKind::is_barrier) else {
            log::debug!(target: "js.formatter", "unmatched `)`");
            return Flow::Advance;
        };
        self.unwind(core, i);
        let closed = core.top_as::<JsKind>();
        self.pop(core);
        if matches!(closed, Some(JsKind::Condition | JsKind::AlignedCondition))
            && matches!(core.top_as::<JsKind>(), Some(JsKind::If | JsKind::Loop))
        {
            core.push_as(JsKind::Substatement, core.indent_depth() + core.unit());
        }
        Flow::Advance
    }

    fn close_bracket<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>) -> Flow {
        if let Some(i) = self.find(core, |k| k == JsKind::ArrayLiteral, JsKind::is_barrier) {
            self.unwind(core, i);
            self.pop(core);
        }
        Flow::Advance
    }

    fn close_template<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>) -> Flow {
        if let Some(i) = self.find(core, |k| k == JsKind::TemplateExpression, |_| false) {
            self.unwind(core, i);
            self.pop(core);
        }
        Flow::Advance
    }

    fn open_paren<K: Embeds<JsKind>>(
        &self,
        core: &mut FormatterCore<K>,
        tk: Token,
        hanging: JsKind,
        aligned: JsKind,
    ) {
        if core.is_last_token() {
            core.push_as(hanging, core.line_indent() + core.unit());
        } else {
            core.push_as(aligned, core.column(tk.end()));
        }
    }

    fn settle_pending<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>, first: Option<Token>) {
        let first_kind = first.map(|t| t.kind);
        for _ in 0..MAX_CASCADE {
            let finished = match core.top_as::<JsKind>() {
                Some(JsKind::StatementMaybeDone) => {
                    if first.is_some_and(|t| continues_statement(core, t)) {
                        core.replace_top_as(JsKind::Statement);
                        return;
                    }
                    true
                }
                Some(JsKind::MaybeElse) => first_kind != Some(TokenKind::Else),
                Some(JsKind::MaybeCatchOrFinally) => {
                    !matches!(first_kind, Some(TokenKind::Catch | TokenKind::Finally))
                }
                Some(JsKind::DoWhile) => first_kind != Some(TokenKind::While),
                _ => false,
            };
            if !finished {
                return;
            }
            self.leave(core, true);
        }
    }

    /// Leaves the top state. A finished statement also completes the
    /// constructs waiting on it.
    fn leave<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>, statement_done: bool) {
        self.pop(core);
        if !statement_done {
            return;
        }
        for _ in 0..MAX_CASCADE {
            let next = match core.top_as::<JsKind>() {
                Some(
                    JsKind::Substatement
                    | JsKind::Else
                    | JsKind::Loop
                    | JsKind::Finally
                    | JsKind::FunctionDeclaration
                    | JsKind::Switch
                    | JsKind::Statement
                    | JsKind::StatementMaybeDone,
                ) => {
                    self.pop(core);
                    continue;
                }
                Some(JsKind::If) => JsKind::MaybeElse,
                Some(JsKind::Try | JsKind::Catch) => JsKind::MaybeCatchOrFinally,
                Some(JsKind::Do) => JsKind::DoWhile,
                _ => return,
            };
            let saved = core.top().saved_indent_depth;
            core.turn_into_as(next, saved);
            return;
        }
    }

    // Pops the top script state; the script root stays.
    fn pop<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>) -> bool {
        match core.top_as::<JsKind>() {
            Some(JsKind::TopMost) | None => false,
            Some(_) => core.pop().is_some(),
        }
    }

    fn unwind<K: Embeds<JsKind>>(&self, core: &mut FormatterCore<K>, count: usize) {
        for _ in 0..count {
            self.pop(core);
        }
    }

    // Distance from the top of the nearest script state matching `wanted`,
    // not looking past `barrier` states or the script root.
    fn find<K: Embeds<JsKind>>(
        &self,
        core: &FormatterCore<K>,
        wanted: impl Fn(JsKind) -> bool,
        barrier: impl Fn(JsKind) -> bool,
    ) -> Option<usize> {
        for i in 0..core.stack().len() {
            match core.kind_as::<JsKind>(i) {
                Some(kind) if wanted(kind) => return Some(i),
                Some(JsKind::TopMost) | None => return None,
                Some(kind) if barrier(kind) => return None,
                Some(_) => {}
            }
        }
        None
    }
}

fn classify_brace<K: Embeds<JsKind>>(core: &FormatterCore<K>) -> JsKind {
    match core.previous_token().map(|t| t.kind) {
        Some(TokenKind::RightParen | TokenKind::Arrow) => JsKind::FunctionBody,
        None
        | Some(
            TokenKind::Assign
            | TokenKind::LeftParen
            | TokenKind::LeftBracket
            | TokenKind::LeftBrace
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::Question
            | TokenKind::Operator
            | TokenKind::Return
            | TokenKind::Var
            | TokenKind::TemplateExpressionOpen,
        ) => JsKind::ObjectLiteral,
        Some(_) => JsKind::DeclarationBody,
    }
}

fn ends_operand<K: Embeds<JsKind>>(core: &FormatterCore<K>, tk: Token) -> bool {
    match tk.kind {
        TokenKind::TagClose
        | TokenKind::SelfClosingTagClose
        | TokenKind::Increment
        | TokenKind::Return
        | TokenKind::Break
        | TokenKind::Continue => true,
        TokenKind::Keyword => matches!(
            core.token_text(tk),
            "true" | "false" | "null" | "this" | "super"
        ),
        kind => kind.ends_operand(),
    }
}

fn continues_statement<K: Embeds<JsKind>>(core: &FormatterCore<K>, tk: Token) -> bool {
    match tk.kind {
        TokenKind::Dot
        | TokenKind::Question
        | TokenKind::Colon
        | TokenKind::Comma
        | TokenKind::Assign
        | TokenKind::Arrow => true,
        TokenKind::Operator => !matches!(core.token_text(tk), "!" | "~" | "..."),
        _ => false,
    }
}

/// Standalone script formatter.
#[derive(Clone, Debug)]
pub struct JsFormatter {
    scanner: JsScanner,
    automaton: JsAutomaton,
    core: FormatterCore<JsKind>,
}

impl JsFormatter {
    pub fn new(config: IndentConfig, js: JsConfig) -> Self {
        Self {
            scanner: JsScanner::new(js.dialect),
            automaton: JsAutomaton,
            core: FormatterCore::new(config, JsKind::TopMost),
        }
    }
}

impl Default for JsFormatter {
    fn default() -> Self {
        Self::new(IndentConfig::default(), JsConfig::default())
    }
}

impl LineFormatter for JsFormatter {
    type Kind = JsKind;
    type Lexer = JsLexState;

    fn config(&self) -> &IndentConfig {
        self.core.config()
    }

    fn initial_state(&self) -> LineState<JsKind, JsLexState> {
        self.core.initial_state(JsLexState::default())
    }

    fn tokenize(&self, text: &str, lexer: &mut JsLexState) -> Vec<Token> {
        self.scanner.scan_line(text, lexer)
    }

    fn format_line(
        &mut self,
        text: &str,
        begin: &LineState<JsKind, JsLexState>,
    ) -> LineOutcome<JsKind, JsLexState> {
        let mut lexer = begin.lexer_state;
        let tokens = self.tokenize(text, &mut lexer);
        self.core.restore(begin);
        self.core.begin_line(text, tokens);

        let indent = if begin.lexer_state.preserves_indent() {
            self.core.user_indent()
        } else {
            self.automaton.line_indent(&mut self.core)
        };
        self.core.set_line_indent(indent);
        log::trace!(target: "js.formatter", "line indent {indent} for {text:?}");

        while let Some(tk) = self.core.token() {
            let flow = self.automaton.step(&mut self.core, tk);
            self.core.settle(flow);
        }
        self.automaton.end_line(&mut self.core, &lexer);

        LineOutcome {
            tokens: self.core.take_tokens(),
            end: self.core.snapshot(lexer),
            line_indent: self.core.line_indent(),
        }
    }

    fn indent_for_new_line_after(&self, end: &LineState<JsKind, JsLexState>) -> i32 {
        if end.lexer_state.preserves_indent() {
            return end.indent_depth;
        }
        let mut probe = self.core.clone();
        probe.restore(end);
        probe.begin_line("", Vec::new());
        self.automaton.line_indent(&mut probe)
    }
}
