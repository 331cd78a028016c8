//! Shared machinery of the indentation automata.
//!
//! Every language formatter owns a [`FormatterCore`]: the state stack, the
//! server-script stashes, the current indent depth and a cursor over the
//! tokens of the line being formatted. The language-specific part is a set of
//! transition rules that inspect `(top state, token)` pairs and call
//! [`FormatterCore::push`], [`FormatterCore::pop`] and
//! [`FormatterCore::turn_into`].
//!
//! Columns are virtual: while a line is formatted, the first non-blank
//! character sits at the line's computed indent and every other offset keeps
//! its visual distance from it. State derived from a line therefore does not
//! depend on how the user happened to indent that line.

use crate::block::LineState;
use crate::config::IndentConfig;
use crate::state::{Embeds, State, StateKind, StateStack};
use crate::token::Token;
use std::fmt::Debug;

/// Upper bound on how often one token may be reprocessed after transitions
/// that do not consume it. Every reprocess pops or replaces a state, so the
/// bound is only hit on a broken rule; the token is then skipped.
pub const MAX_REPROCESS_PER_TOKEN: usize = 64;

/// Outcome of one automaton step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// The token was consumed.
    Advance,
    /// The stack changed and the same token must be looked at again.
    Reprocess,
}

/// Result of formatting one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineOutcome<K, L> {
    pub tokens: Vec<Token>,
    pub end: LineState<K, L>,
    pub line_indent: i32,
}

/// Capability set every language formatter provides to the incremental
/// driver.
pub trait LineFormatter {
    type Kind: StateKind;
    type Lexer: Clone + PartialEq + Default + Debug;

    fn config(&self) -> &IndentConfig;

    /// State the first line of a document is formatted from.
    fn initial_state(&self) -> LineState<Self::Kind, Self::Lexer>;

    fn tokenize(&self, text: &str, lexer: &mut Self::Lexer) -> Vec<Token>;

    /// Tokenizes `text` from `begin`, replays the tokens and reports the
    /// line's indent together with the state carried to the next line.
    fn format_line(
        &mut self,
        text: &str,
        begin: &LineState<Self::Kind, Self::Lexer>,
    ) -> LineOutcome<Self::Kind, Self::Lexer>;

    fn indent_for(&mut self, text: &str, begin: &LineState<Self::Kind, Self::Lexer>) -> i32 {
        self.format_line(text, begin).line_indent
    }

    /// Indent an empty line inserted after a line ending in `end` would get.
    fn indent_for_new_line_after(&self, end: &LineState<Self::Kind, Self::Lexer>) -> i32 {
        end.indent_depth
    }
}

/// Stack, stashes and token cursor shared by all automata.
#[derive(Clone, Debug)]
pub struct FormatterCore<K> {
    config: IndentConfig,
    root: State<K>,
    stack: StateStack<K>,
    stored: StateStack<K>,
    other: StateStack<K>,
    indent_depth: i32,
    text: String,
    tokens: Vec<Token>,
    index: usize,
    reprocessed: usize,
    line_indent: i32,
    first_column: i32,
}

impl<K: StateKind> FormatterCore<K> {
    pub fn new(config: IndentConfig, root: K) -> Self {
        let root = State::new(root, 0);
        Self {
            config,
            root,
            stack: StateStack::with_root(root),
            stored: StateStack::new(),
            other: StateStack::new(),
            indent_depth: 0,
            text: String::new(),
            tokens: Vec::new(),
            index: 0,
            reprocessed: 0,
            line_indent: 0,
            first_column: 0,
        }
    }

    pub fn config(&self) -> &IndentConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: IndentConfig) {
        self.config = config;
    }

    #[inline]
    pub fn unit(&self) -> i32 {
        self.config.unit()
    }

    pub fn root(&self) -> State<K> {
        self.root
    }

    pub fn initial_state<L>(&self, lexer_state: L) -> LineState<K, L> {
        LineState::new(StateStack::with_root(self.root), 0, lexer_state)
    }

    /// Loads the state a line starts from.
    pub fn restore<L>(&mut self, begin: &LineState<K, L>) {
        self.stack.clone_from(&begin.state_stack);
        self.stored.clone_from(&begin.stored_state_stack);
        self.other.clone_from(&begin.other_state_stack);
        self.indent_depth = begin.indent_depth;
        if self.stack.is_empty() {
            log::debug!(target: "core.formatter", "empty begin stack; falling back to root");
            self.stack.push(self.root);
            self.indent_depth = 0;
        }
    }

    pub fn snapshot<L>(&self, lexer_state: L) -> LineState<K, L> {
        LineState {
            state_stack: self.stack.clone(),
            stored_state_stack: self.stored.clone(),
            other_state_stack: self.other.clone(),
            indent_depth: self.indent_depth,
            lexer_state,
        }
    }

    /// Installs the tokens of the next line. The line indent defaults to the
    /// current indent depth until [`FormatterCore::set_line_indent`] is called.
    pub fn begin_line(&mut self, text: &str, tokens: Vec<Token>) {
        self.text.clear();
        self.text.push_str(text);
        self.tokens = tokens;
        self.index = 0;
        self.reprocessed = 0;
        self.first_column = to_i32(tools::text::indentation_columns(text, self.config.tab_size));
        self.line_indent = self.indent_depth;
    }

    pub fn set_line_indent(&mut self, indent: i32) {
        self.line_indent = indent.max(0);
    }

    pub fn line_indent(&self) -> i32 {
        self.line_indent
    }

    /// Visual column of the first non-blank character as the user typed it.
    pub fn user_indent(&self) -> i32 {
        self.first_column
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Virtual column of `offset` once the line is indented to the line indent.
    pub fn column(&self, offset: usize) -> i32 {
        to_i32(tools::text::reindented_column(
            &self.text,
            offset,
            usize::try_from(self.line_indent).unwrap_or_default(),
            self.config.tab_size,
        ))
    }

    /// Visual column of `offset` as the line is currently indented.
    pub fn actual_column(&self, offset: usize) -> i32 {
        to_i32(tools::text::visual_column(
            &self.text,
            offset,
            self.config.tab_size,
        ))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token under the cursor.
    pub fn token(&self) -> Option<Token> {
        self.tokens.get(self.index).copied()
    }

    pub fn token_index(&self) -> usize {
        self.index
    }

    pub fn token_text(&self, token: Token) -> &str {
        token.text(&self.text)
    }

    /// First token of the line that is not a comment.
    pub fn first_token(&self) -> Option<Token> {
        self.tokens.iter().copied().find(|t| !t.kind.is_comment())
    }

    pub fn last_token(&self) -> Option<Token> {
        self.tokens.iter().rev().copied().find(|t| !t.kind.is_comment())
    }

    /// Nearest non-comment token before the cursor on this line.
    pub fn previous_token(&self) -> Option<Token> {
        self.tokens[..self.index.min(self.tokens.len())]
            .iter()
            .rev()
            .copied()
            .find(|t| !t.kind.is_comment())
    }

    /// Nearest non-comment token after the cursor on this line.
    pub fn next_token(&self) -> Option<Token> {
        self.tokens
            .iter()
            .skip(self.index + 1)
            .copied()
            .find(|t| !t.kind.is_comment())
    }

    /// The cursor token is the first structural token on the line.
    pub fn is_first_token(&self) -> bool {
        self.previous_token().is_none()
    }

    /// No structural token follows the cursor on this line.
    pub fn is_last_token(&self) -> bool {
        self.next_token().is_none()
    }

    /// Advances the cursor according to `flow`, skipping a token that keeps
    /// asking to be reprocessed.
    pub fn settle(&mut self, flow: Flow) {
        match flow {
            Flow::Advance => {
                self.index += 1;
                self.reprocessed = 0;
            }
            Flow::Reprocess => {
                self.reprocessed += 1;
                if self.reprocessed > MAX_REPROCESS_PER_TOKEN {
                    log::debug!(
                        target: "core.formatter",
                        "reprocess limit hit at token {} (top {:?}); skipping",
                        self.index,
                        self.top().kind
                    );
                    self.index += 1;
                    self.reprocessed = 0;
                }
            }
        }
    }

    pub fn take_tokens(&mut self) -> Vec<Token> {
        self.index = 0;
        std::mem::take(&mut self.tokens)
    }

    pub fn stack(&self) -> &StateStack<K> {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut StateStack<K> {
        &mut self.stack
    }

    pub fn stored_stack(&self) -> &StateStack<K> {
        &self.stored
    }

    pub fn stored_stack_mut(&mut self) -> &mut StateStack<K> {
        &mut self.stored
    }

    pub fn other_stack(&self) -> &StateStack<K> {
        &self.other
    }

    pub fn other_stack_mut(&mut self) -> &mut StateStack<K> {
        &mut self.other
    }

    pub fn top(&self) -> State<K> {
        self.stack.top().unwrap_or(self.root)
    }

    /// State `from_top` entries below the top; the root past the bottom.
    pub fn state(&self, from_top: usize) -> State<K> {
        self.stack.get(from_top).unwrap_or(self.root)
    }

    pub fn indent_depth(&self) -> i32 {
        self.indent_depth
    }

    pub fn set_indent_depth(&mut self, depth: i32) {
        self.indent_depth = depth;
    }

    /// Indent depth in effect inside the state `from_top` entries below the
    /// top: the live depth for the top itself, otherwise the depth the state
    /// above it saved when it was entered.
    pub fn depth_of(&self, from_top: usize) -> i32 {
        if from_top == 0 {
            self.indent_depth
        } else {
            self.state(from_top - 1).saved_indent_depth
        }
    }

    /// Enters `kind`, saving the current depth and switching to `depth`.
    pub fn push(&mut self, kind: K, depth: i32) {
        log::trace!(
            target: "core.formatter",
            "enter {:?} (saved {}, depth {})",
            kind,
            self.indent_depth,
            depth
        );
        self.stack.push(State::new(kind, self.indent_depth));
        self.indent_depth = depth;
    }

    /// Leaves the top state and restores its saved depth. The root sentinel
    /// is never popped.
    pub fn pop(&mut self) -> Option<State<K>> {
        if self.stack.len() <= 1 {
            log::debug!(target: "core.formatter", "refusing to pop the root state");
            return None;
        }
        let state = self.stack.pop()?;
        log::trace!(
            target: "core.formatter",
            "leave {:?} (depth {} -> {})",
            state.kind,
            self.indent_depth,
            state.saved_indent_depth
        );
        self.indent_depth = state.saved_indent_depth;
        Some(state)
    }

    /// Leaves the top state without completing its parent, then enters `kind`.
    pub fn turn_into(&mut self, kind: K, depth: i32) {
        self.pop();
        self.push(kind, depth);
    }

    /// Reclassifies the top state, keeping its saved and current depth.
    pub fn replace_top(&mut self, kind: K) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(top) = self.stack.top_mut() {
            top.kind = kind;
        }
    }

    /// Number of states below the topmost one matching `pred`, if any.
    pub fn find_from_top(&self, mut pred: impl FnMut(K) -> bool) -> Option<usize> {
        let index = self.stack.rposition(|kind| pred(kind))?;
        Some(self.stack.len() - 1 - index)
    }

    pub fn top_as<T: StateKind>(&self) -> Option<T>
    where
        K: Embeds<T>,
    {
        <K as Embeds<T>>::project(self.top().kind)
    }

    pub fn kind_as<T: StateKind>(&self, from_top: usize) -> Option<T>
    where
        K: Embeds<T>,
    {
        <K as Embeds<T>>::project(self.state(from_top).kind)
    }

    pub fn push_as<T: StateKind>(&mut self, kind: T, depth: i32)
    where
        K: Embeds<T>,
    {
        self.push(<K as Embeds<T>>::wrap(kind), depth);
    }

    pub fn turn_into_as<T: StateKind>(&mut self, kind: T, depth: i32)
    where
        K: Embeds<T>,
    {
        self.turn_into(<K as Embeds<T>>::wrap(kind), depth);
    }

    pub fn replace_top_as<T: StateKind>(&mut self, kind: T)
    where
        K: Embeds<T>,
    {
        self.replace_top(<K as Embeds<T>>::wrap(kind));
    }
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{Flow, FormatterCore, MAX_REPROCESS_PER_TOKEN};
    use crate::{IndentConfig, Language, Token, TokenKind};

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Kind {
        Root,
        Block,
        Paren,
    }

    fn core() -> FormatterCore<Kind> {
        FormatterCore::new(IndentConfig::default(), Kind::Root)
    }

    #[test]
    fn push_and_pop_restore_depth() {
        let mut core = core();
        core.push(Kind::Block, 4);
        core.push(Kind::Paren, 9);
        assert_eq!(core.indent_depth(), 9);
        assert_eq!(core.depth_of(1), 4);
        assert_eq!(core.pop().map(|s| s.kind), Some(Kind::Paren));
        assert_eq!(core.indent_depth(), 4);
        core.pop();
        assert_eq!(core.indent_depth(), 0);
        assert_eq!(core.pop(), None, "root is never popped");
        assert_eq!(core.top().kind, Kind::Root);
    }

    #[test]
    fn turn_into_keeps_the_parent() {
        let mut core = core();
        core.push(Kind::Block, 4);
        core.turn_into(Kind::Paren, 6);
        assert_eq!(core.stack().len(), 2);
        assert_eq!(core.top().saved_indent_depth, 0);
        assert_eq!(core.indent_depth(), 6);
    }

    #[test]
    fn virtual_columns_follow_the_line_indent() {
        let mut core = core();
        let tokens = vec![
            Token::new(6, 3, TokenKind::Identifier, Language::Script),
            Token::new(9, 1, TokenKind::LeftParen, Language::Script),
        ];
        core.begin_line("      foo(", tokens);
        assert_eq!(core.user_indent(), 6);
        core.set_line_indent(4);
        assert_eq!(core.column(9), 7);
        assert_eq!(core.actual_column(9), 9);
    }

    #[test]
    fn tabs_inside_the_line_ignore_the_users_indent() {
        let mut core = core();
        let bar = |offset| Token::new(offset, 3, TokenKind::Identifier, Language::Script);
        core.begin_line(" b,\tbar", vec![bar(4)]);
        core.set_line_indent(9);
        assert_eq!(core.column(4), 12);
        core.begin_line("        b,\tbar", vec![bar(11)]);
        core.set_line_indent(9);
        assert_eq!(core.column(11), 12);
    }

    #[test]
    fn token_neighbours_skip_comments() {
        let mut core = core();
        let tokens = vec![
            Token::new(0, 4, TokenKind::Comment, Language::Script),
            Token::new(5, 1, TokenKind::Identifier, Language::Script),
            Token::new(7, 4, TokenKind::Comment, Language::Script),
        ];
        core.begin_line("/**/ a /**/", tokens);
        assert_eq!(core.first_token().map(|t| t.offset), Some(5));
        assert_eq!(core.last_token().map(|t| t.offset), Some(5));
        core.settle(Flow::Advance);
        assert!(core.is_first_token());
        assert!(core.is_last_token());
    }

    #[test]
    fn endless_reprocessing_skips_the_token() {
        let mut core = core();
        core.begin_line("x", vec![Token::new(0, 1, TokenKind::Identifier, Language::Script)]);
        for _ in 0..MAX_REPROCESS_PER_TOKEN {
            core.settle(Flow::Reprocess);
            assert_eq!(core.token_index(), 0);
        }
        core.settle(Flow::Reprocess);
        assert_eq!(core.token_index(), 1);
        assert_eq!(core.token(), None);
    }

    #[test]
    fn find_from_top_counts_entries_above() {
        let mut core = core();
        core.push(Kind::Block, 4);
        core.push(Kind::Paren, 8);
        assert_eq!(core.find_from_top(|k| k == Kind::Block), Some(1));
        assert_eq!(core.find_from_top(|k| k == Kind::Root), Some(2));
    }
}
