//! Style indentation automaton.
//!
//! The automaton is generic over the host kind so the markup formatter can run
//! it on its own stack for `<style>` bodies; the standalone [`CssFormatter`]
//! runs it with `K = CssKind`.

use crate::lexer::CssLexState;
use crate::scanner::CssScanner;
use core_types::{
    Embeds, Flow, FormatterCore, IndentConfig, LineFormatter, LineOutcome, LineState, Scanner,
    Token, TokenKind,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CssKind {
    TopMost,
    /// Selector list before its `{`.
    Rule,
    /// At-rule prelude before its `{` or `;`.
    AtRule,
    RuleBody,
    /// `name: value` until `;`.
    Declaration,
    /// `(` that ends its line; contents hang one level in.
    Paren,
    /// `(` followed by more tokens; contents align after it.
    AlignedParen,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CssAutomaton;

impl CssAutomaton {
    /// Indent of the current line, from its first token and the stack.
    pub fn line_indent<K: Embeds<CssKind>>(&self, core: &FormatterCore<K>) -> i32 {
        let depth = core.indent_depth();
        let Some(first) = core.first_token() else {
            return depth;
        };
        let top = core.top_as::<CssKind>();
        match first.kind {
            TokenKind::RightBrace => match self.find(core, |k| k == CssKind::RuleBody) {
                Some(i) => core.depth_of(i) - core.unit(),
                None => depth,
            },
            TokenKind::LeftBrace
                if matches!(top, Some(CssKind::Rule | CssKind::AtRule | CssKind::Declaration)) =>
            {
                core.top().saved_indent_depth
            }
            TokenKind::RightParen => match top {
                Some(CssKind::Paren) => depth - core.unit(),
                Some(CssKind::AlignedParen) => depth - 1,
                _ => depth,
            },
            _ => depth,
        }
    }

    pub fn step<K: Embeds<CssKind>>(&self, core: &mut FormatterCore<K>, tk: Token) -> Flow {
        if tk.kind.is_comment() {
            return Flow::Advance;
        }
        let Some(top) = core.top_as::<CssKind>() else {
            log::debug!(target: "css.formatter", "style token {:?} outside a style state", tk.kind);
            return Flow::Advance;
        };
        let unit = core.unit();

        if tk.kind == TokenKind::RightBrace {
            return match top {
                CssKind::RuleBody => {
                    core.pop();
                    Flow::Advance
                }
                CssKind::TopMost => Flow::Advance,
                _ => {
                    core.pop();
                    Flow::Reprocess
                }
            };
        }

        match top {
            CssKind::TopMost | CssKind::RuleBody => match tk.kind {
                TokenKind::PropertyName => {
                    core.push_as(CssKind::Declaration, core.indent_depth() + unit);
                }
                TokenKind::AtRule => core.push_as(CssKind::AtRule, core.indent_depth() + unit),
                TokenKind::LeftBrace => core.push_as(CssKind::RuleBody, core.indent_depth() + unit),
                TokenKind::LeftParen => self.open_paren(core),
                TokenKind::Semicolon | TokenKind::RightParen | TokenKind::RightBracket => {}
                _ => core.push_as(CssKind::Rule, core.indent_depth()),
            },
            CssKind::Rule | CssKind::AtRule | CssKind::Declaration => match tk.kind {
                TokenKind::LeftBrace => {
                    let base = core.top().saved_indent_depth;
                    core.turn_into_as(CssKind::RuleBody, base + unit);
                }
                TokenKind::Semicolon => {
                    core.pop();
                }
                TokenKind::LeftParen => self.open_paren(core),
                _ => {}
            },
            CssKind::Paren | CssKind::AlignedParen => match tk.kind {
                TokenKind::RightParen => {
                    core.pop();
                }
                TokenKind::LeftParen => self.open_paren(core),
                TokenKind::Semicolon | TokenKind::LeftBrace => {
                    core.pop();
                    return Flow::Reprocess;
                }
                _ => {}
            },
        }
        Flow::Advance
    }

    fn open_paren<K: Embeds<CssKind>>(&self, core: &mut FormatterCore<K>) {
        if core.is_last_token() {
            core.push_as(CssKind::Paren, core.line_indent() + core.unit());
        } else if let Some(tk) = core.token() {
            core.push_as(CssKind::AlignedParen, core.column(tk.end()));
        }
    }

    // Index from the top of the nearest style state matching `pred`, without
    // looking past the style root.
    fn find<K: Embeds<CssKind>>(
        &self,
        core: &FormatterCore<K>,
        pred: impl Fn(CssKind) -> bool,
    ) -> Option<usize> {
        for i in 0..core.stack().len() {
            match core.kind_as::<CssKind>(i) {
                Some(kind) if pred(kind) => return Some(i),
                Some(CssKind::TopMost) | None => return None,
                Some(_) => {}
            }
        }
        None
    }
}

/// Standalone style sheet formatter.
#[derive(Clone, Debug)]
pub struct CssFormatter {
    scanner: CssScanner,
    automaton: CssAutomaton,
    core: FormatterCore<CssKind>,
}

impl CssFormatter {
    pub fn new(config: IndentConfig) -> Self {
        Self {
            scanner: CssScanner::new(),
            automaton: CssAutomaton,
            core: FormatterCore::new(config, CssKind::TopMost),
        }
    }
}

impl Default for CssFormatter {
    fn default() -> Self {
        Self::new(IndentConfig::default())
    }
}

impl LineFormatter for CssFormatter {
    type Kind = CssKind;
    type Lexer = CssLexState;

    fn config(&self) -> &IndentConfig {
        self.core.config()
    }

    fn initial_state(&self) -> LineState<CssKind, CssLexState> {
        self.core.initial_state(CssLexState::default())
    }

    fn tokenize(&self, text: &str, lexer: &mut CssLexState) -> Vec<Token> {
        self.scanner.scan_line(text, lexer)
    }

    fn format_line(
        &mut self,
        text: &str,
        begin: &LineState<CssKind, CssLexState>,
    ) -> LineOutcome<CssKind, CssLexState> {
        let mut lexer = begin.lexer_state;
        let tokens = self.tokenize(text, &mut lexer);
        self.core.restore(begin);
        self.core.begin_line(text, tokens);

        let indent = if begin.lexer_state.preserves_indent() {
            self.core.user_indent()
        } else {
            self.automaton.line_indent(&self.core)
        };
        self.core.set_line_indent(indent);
        log::trace!(target: "css.formatter", "line indent {indent} for {text:?}");

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
}
