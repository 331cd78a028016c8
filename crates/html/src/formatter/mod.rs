//! Markup indentation automaton and host of the embedded languages.
//!
//! The markup formatter keeps a single stack for every language on a line.
//! Style and script states are pushed on top of the container element that
//! holds them and unwound by the next markup token. Server-script regions
//! work differently: the script inside consecutive `<?php ... ?>` regions
//! forms one program, so on `<?php` the markup suffix of the stack is stashed
//! in `stored_state_stack` and the server-script states suspended by the
//! previous `?>` are restored from `other_state_stack`. On `?>` the two swap
//! back. Markup between two regions is indented once per script block the
//! regions left open (`if (...) { ?> ... <?php }`).

use crate::config::HtmlConfig;
use crate::elements::is_void_element;
use crate::lexer::HtmlLexState;
use crate::scanner::HtmlScanner;
use core_types::{
    Embeds, Flow, FormatterCore, IndentConfig, Language, LineFormatter, LineOutcome, LineState,
    MAX_REPROCESS_PER_TOKEN, Scanner, State, StateStack, Token, TokenKind,
};
use css::{CssAutomaton, CssKind};
use js::{JsAutomaton, JsKind};
use php::{PhpAutomaton, PhpKind};

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkupKind {
    TopMost,
    /// Start tag before its `>`; attribute lines hang one level in.
    Tag,
    /// Start tag whose element does not indent its content.
    FlatTag,
    VoidTag,
    EndTag,
    Element,
    /// Element opened after text on the same line, or a container whose body
    /// keeps the start tag's indent.
    FlatElement,
    /// Markup between server-script regions while a script block is open.
    ServerBlock,
    /// Marks the point a stack suffix was cut at; never survives a step.
    Stashed,
}

impl MarkupKind {
    fn is_tag(self) -> bool {
        matches!(
            self,
            MarkupKind::Tag | MarkupKind::FlatTag | MarkupKind::VoidTag | MarkupKind::EndTag
        )
    }
}

/// State kind of the markup formatter: its own kinds plus the kinds of the
/// automata it hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HtmlKind {
    Markup(MarkupKind),
    Style(CssKind),
    Script(JsKind),
    ServerScript(PhpKind),
}

impl HtmlKind {
    pub const ROOT: HtmlKind = HtmlKind::Markup(MarkupKind::TopMost);

    /// Language whose automaton owns states of this kind.
    pub fn language(self) -> Language {
        match self {
            HtmlKind::Markup(_) => Language::Markup,
            HtmlKind::Style(_) => Language::Style,
            HtmlKind::Script(_) => Language::Script,
            HtmlKind::ServerScript(_) => Language::ServerScript,
        }
    }
}

impl Embeds<MarkupKind> for HtmlKind {
    fn wrap(inner: MarkupKind) -> Self {
        HtmlKind::Markup(inner)
    }

    fn project(self) -> Option<MarkupKind> {
        match self {
            HtmlKind::Markup(kind) => Some(kind),
            _ => None,
        }
    }
}

impl Embeds<CssKind> for HtmlKind {
    fn wrap(inner: CssKind) -> Self {
        HtmlKind::Style(inner)
    }

    fn project(self) -> Option<CssKind> {
        match self {
            HtmlKind::Style(kind) => Some(kind),
            _ => None,
        }
    }
}

impl Embeds<JsKind> for HtmlKind {
    fn wrap(inner: JsKind) -> Self {
        HtmlKind::Script(inner)
    }

    fn project(self) -> Option<JsKind> {
        match self {
            HtmlKind::Script(kind) => Some(kind),
            _ => None,
        }
    }
}

impl Embeds<PhpKind> for HtmlKind {
    fn wrap(inner: PhpKind) -> Self {
        HtmlKind::ServerScript(inner)
    }

    fn project(self) -> Option<PhpKind> {
        match self {
            HtmlKind::ServerScript(kind) => Some(kind),
            _ => None,
        }
    }
}

const SERVER_SCRIPT_ROOT: HtmlKind = HtmlKind::ServerScript(PhpKind::TopMost);
const STASHED: HtmlKind = HtmlKind::Markup(MarkupKind::Stashed);
const SERVER_BLOCK: HtmlKind = HtmlKind::Markup(MarkupKind::ServerBlock);

#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlAutomaton {
    config: HtmlConfig,
    css: CssAutomaton,
    js: JsAutomaton,
    php: PhpAutomaton,
}

impl HtmlAutomaton {
    pub fn new(config: HtmlConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &HtmlConfig {
        &self.config
    }

    /// Indent of the current line. The language of its first token picks the
    /// automaton that decides.
    pub fn line_indent(&self, core: &mut FormatterCore<HtmlKind>) -> i32 {
        let Some(first) = core.first_token() else {
            return match core.top().kind.language() {
                Language::Script => self.js.line_indent(core),
                Language::Style => self.css.line_indent(core),
                Language::ServerScript => self.php.line_indent(core),
                _ => core.indent_depth(),
            };
        };
        match first.language {
            Language::Script => {
                self.enter_embedded(core, Language::Script);
                self.js.line_indent(core)
            }
            Language::Style => {
                self.enter_embedded(core, Language::Style);
                self.css.line_indent(core)
            }
            Language::ServerScript => self.server_script_indent(core, first),
            Language::Markup | Language::None => {
                self.leave_embedded(core);
                self.markup_indent(core, first)
            }
        }
    }

    pub fn step(&self, core: &mut FormatterCore<HtmlKind>, tk: Token) -> Flow {
        match tk.language {
            Language::Script | Language::Style => {
                if core.top().kind.language() != tk.language {
                    self.enter_embedded(core, tk.language);
                    return Flow::Reprocess;
                }
                match tk.language {
                    Language::Script => self.js.step(core, tk),
                    _ => self.css.step(core, tk),
                }
            }
            Language::ServerScript => match tk.kind {
                TokenKind::ServerScriptOpen => {
                    self.enter_server_script(core);
                    Flow::Advance
                }
                TokenKind::ServerScriptClose => {
                    self.leave_server_script(core, tk);
                    Flow::Advance
                }
                _ => self.php.step(core, tk),
            },
            Language::Markup | Language::None => self.markup(core, tk),
        }
    }

    /// Parks a script statement left open at the end of the line.
    pub fn end_line(&self, core: &mut FormatterCore<HtmlKind>, lexer: &HtmlLexState) {
        if core.top().kind.language() == Language::Script {
            self.js.end_line(core, &lexer.js);
        }
    }

    fn markup_indent(&self, core: &FormatterCore<HtmlKind>, first: Token) -> i32 {
        let depth = core.indent_depth();
        let unit = core.unit();
        match first.kind {
            TokenKind::EndTagOpen => match self.find_element(core) {
                Some(i) => match core.kind_as::<MarkupKind>(i) {
                    Some(MarkupKind::Element) => core.depth_of(i) - unit,
                    _ => core.depth_of(i),
                },
                None => depth,
            },
            TokenKind::TagClose | TokenKind::SelfClosingTagClose
                if core.top_as::<MarkupKind>().is_some_and(MarkupKind::is_tag) =>
            {
                depth - unit
            }
            _ => depth,
        }
    }

    fn server_script_indent(&self, core: &mut FormatterCore<HtmlKind>, first: Token) -> i32 {
        match first.kind {
            TokenKind::ServerScriptOpen => {
                let mut probe = core.clone();
                self.enter_server_script(&mut probe);
                self.php.line_indent(&mut probe)
            }
            TokenKind::ServerScriptClose => core
                .find_from_top(|k| k == SERVER_SCRIPT_ROOT)
                .map_or(core.indent_depth(), |i| core.depth_of(i)),
            _ => self.php.line_indent(core),
        }
    }

    fn markup(&self, core: &mut FormatterCore<HtmlKind>, tk: Token) -> Flow {
        self.leave_embedded(core);
        let Some(top) = core.top_as::<MarkupKind>() else {
            log::debug!(target: "html.formatter", "markup token {:?} inside {:?}", tk.kind, core.top().kind);
            return Flow::Advance;
        };
        let unit = core.unit();
        match tk.kind {
            TokenKind::TagOpen | TokenKind::EndTagOpen if top.is_tag() => {
                log::debug!(target: "html.formatter", "tag left unclosed before {:?}", tk.kind);
                core.pop();
                return Flow::Reprocess;
            }
            TokenKind::TagOpen => {
                let kind = self.start_tag_kind(core);
                core.push_as(kind, core.line_indent() + unit);
            }
            TokenKind::EndTagOpen => {
                match self.find_element(core) {
                    Some(i) => {
                        for _ in 0..=i {
                            core.pop();
                        }
                    }
                    None => log::debug!(target: "html.formatter", "end tag without an open element"),
                }
                core.push_as(MarkupKind::EndTag, core.line_indent() + unit);
            }
            TokenKind::TagClose => match top {
                MarkupKind::Tag => {
                    let depth = core.indent_depth();
                    core.turn_into_as(MarkupKind::Element, depth);
                }
                MarkupKind::FlatTag => {
                    let saved = core.top().saved_indent_depth;
                    core.turn_into_as(MarkupKind::FlatElement, saved);
                }
                MarkupKind::VoidTag | MarkupKind::EndTag => {
                    core.pop();
                }
                _ => log::debug!(target: "html.formatter", "stray `>` in {top:?}"),
            },
            TokenKind::SelfClosingTagClose if top.is_tag() => {
                core.pop();
            }
            _ => {}
        }
        Flow::Advance
    }

    // Kind of the start tag at the cursor, from the name that follows it.
    fn start_tag_kind(&self, core: &FormatterCore<HtmlKind>) -> MarkupKind {
        let name = core
            .next_token()
            .filter(|t| t.kind == TokenKind::TagName)
            .map_or("", |t| core.token_text(t));
        if is_void_element(name) {
            return MarkupKind::VoidTag;
        }
        let after_text = core.previous_token().is_some_and(|t| {
            t.language == Language::Markup
                && matches!(t.kind, TokenKind::Text | TokenKind::EntityReference)
        });
        if after_text || !self.config.indents_container(name) {
            MarkupKind::FlatTag
        } else {
            MarkupKind::Tag
        }
    }

    // Nearest open element inside the current server-script block.
    fn find_element(&self, core: &FormatterCore<HtmlKind>) -> Option<usize> {
        for i in 0..core.stack().len() {
            match core.kind_as::<MarkupKind>(i) {
                Some(MarkupKind::Element | MarkupKind::FlatElement) => return Some(i),
                Some(MarkupKind::ServerBlock | MarkupKind::TopMost) | None => return None,
                Some(_) => {}
            }
        }
        None
    }

    fn enter_embedded(&self, core: &mut FormatterCore<HtmlKind>, language: Language) {
        if core.top().kind.language() == language {
            return;
        }
        self.leave_embedded(core);
        let depth = core.indent_depth();
        log::trace!(target: "html.formatter", "entering {language:?} at depth {depth}");
        match language {
            Language::Script => core.push_as(JsKind::TopMost, depth),
            Language::Style => core.push_as(CssKind::TopMost, depth),
            _ => {}
        }
    }

    fn leave_embedded(&self, core: &mut FormatterCore<HtmlKind>) {
        while matches!(core.top().kind, HtmlKind::Script(_) | HtmlKind::Style(_)) {
            if core.pop().is_none() {
                break;
            }
        }
    }

    /// Stashes the markup stack and resumes the suspended server-script
    /// states, shifted so they continue at the current markup depth.
    fn enter_server_script(&self, core: &mut FormatterCore<HtmlKind>) {
        if !core.stored_stack().is_empty() {
            log::debug!(target: "html.formatter", "server-script region opened twice");
            return;
        }
        let depth = core.indent_depth();
        core.push(STASHED, depth);
        let host = core.stack_mut().split_off(1);
        *core.stored_stack_mut() = host;

        let suspended = std::mem::take(core.other_stack_mut());
        match suspended.top() {
            Some(mark) if mark.kind == STASHED => {
                let delta = depth - mark.saved_indent_depth;
                let mut rebased: StateStack<HtmlKind> = suspended
                    .iter()
                    .map(|s| State::new(s.kind, s.saved_indent_depth + delta))
                    .collect();
                core.stack_mut().append(&mut rebased);
                core.pop();
                log::trace!(target: "html.formatter", "resumed server script (shift {delta})");
            }
            _ => core.push(SERVER_SCRIPT_ROOT, depth),
        }
    }

    /// Suspends the server-script states and restores the markup stack.
    fn leave_server_script(&self, core: &mut FormatterCore<HtmlKind>, tk: Token) {
        if core.stored_stack().is_empty() {
            log::debug!(target: "html.formatter", "`?>` outside a server-script region");
            return;
        }
        // `?>` ends an open statement like `;`.
        let semicolon = Token::new(tk.offset, 0, TokenKind::Semicolon, Language::ServerScript);
        for _ in 0..MAX_REPROCESS_PER_TOKEN {
            if !matches!(
                core.top_as::<PhpKind>(),
                Some(PhpKind::Statement | PhpKind::Ternary)
            ) {
                break;
            }
            self.php.step(core, semicolon);
        }

        let levels = if core.stack().len() == 2 && core.top().kind == SERVER_SCRIPT_ROOT {
            core.pop();
            core.other_stack_mut().clear();
            0
        } else {
            let depth = core.indent_depth();
            core.push(STASHED, depth);
            let suspended = core.stack_mut().split_off(1);
            let levels = suspended
                .iter()
                .filter(|s| matches!(s.kind, HtmlKind::ServerScript(k) if k.is_body()))
                .count();
            *core.other_stack_mut() = suspended;
            levels
        };

        let mut host = std::mem::take(core.stored_stack_mut());
        core.stack_mut().append(&mut host);
        if core.top().kind == STASHED {
            core.pop();
        }
        self.reconcile_server_blocks(core, levels);
    }

    // One `ServerBlock` per script block left open by the regions so far.
    fn reconcile_server_blocks(&self, core: &mut FormatterCore<HtmlKind>, levels: usize) {
        let open = core.stack().iter().filter(|s| s.kind == SERVER_BLOCK).count();
        if levels < open {
            // Script and style roots are re-entered lazily on the next line.
            self.leave_embedded(core);
        }
        for _ in levels..open {
            if core.top().kind != SERVER_BLOCK {
                log::debug!(target: "html.formatter", "markup left open inside a server-script block");
                break;
            }
            core.pop();
        }
        for _ in open..levels {
            let depth = core.indent_depth() + core.unit();
            core.push(SERVER_BLOCK, depth);
        }
    }
}

/// Formatter for markup documents with embedded style, script and
/// server-script regions.
#[derive(Clone, Debug)]
pub struct HtmlFormatter {
    scanner: HtmlScanner,
    automaton: HtmlAutomaton,
    core: FormatterCore<HtmlKind>,
}

impl HtmlFormatter {
    pub fn new(config: IndentConfig, html: HtmlConfig) -> Self {
        Self {
            scanner: HtmlScanner::new(),
            automaton: HtmlAutomaton::new(html),
            core: FormatterCore::new(config, HtmlKind::ROOT),
        }
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new(IndentConfig::default(), HtmlConfig::default())
    }
}

impl LineFormatter for HtmlFormatter {
    type Kind = HtmlKind;
    type Lexer = HtmlLexState;

    fn config(&self) -> &IndentConfig {
        self.core.config()
    }

    fn initial_state(&self) -> LineState<HtmlKind, HtmlLexState> {
        self.core.initial_state(HtmlLexState::default())
    }

    fn tokenize(&self, text: &str, lexer: &mut HtmlLexState) -> Vec<Token> {
        self.scanner.scan_line(text, lexer)
    }

    fn format_line(
        &mut self,
        text: &str,
        begin: &LineState<HtmlKind, HtmlLexState>,
    ) -> LineOutcome<HtmlKind, HtmlLexState> {
        let mut lexer = begin.lexer_state.clone();
        let tokens = self.tokenize(text, &mut lexer);
        self.core.restore(begin);
        self.core.begin_line(text, tokens);

        let indent = if begin.lexer_state.preserves_indent() {
            self.core.user_indent()
        } else {
            self.automaton.line_indent(&mut self.core)
        };
        self.core.set_line_indent(indent);
        log::trace!(target: "html.formatter", "line indent {indent} for {text:?}");

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

    fn indent_for_new_line_after(&self, end: &LineState<HtmlKind, HtmlLexState>) -> i32 {
        if end.lexer_state.preserves_indent() {
            return end.indent_depth;
        }
        let mut probe = self.core.clone();
        probe.restore(end);
        probe.begin_line("", Vec::new());
        self.automaton.line_indent(&mut probe)
    }
}
