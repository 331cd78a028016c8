//! Style sheet scanner.
//!
//! Classifies selectors, at-rules, property names and values. Inside a rule
//! body an identifier followed by `:` is a property name unless the rest of
//! the line opens a block, which makes it a nested selector (`a:hover {`).

use crate::lexer::{CssConstruct, CssLexState};
use core_types::{Language, Quote, Scanner, Token, TokenKind};
use tools::ascii::find_pair;
use tools::cursor::Cursor;

#[derive(Clone, Copy, Debug, Default)]
pub struct CssScanner;

impl CssScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Scanner for CssScanner {
    type State = CssLexState;

    fn scan(&self, text: &str, from: &mut usize, state: &mut CssLexState, out: &mut Vec<Token>) {
        let mut c = Cursor::new(text, *from);
        let mut after_property = false;
        loop {
            if state.construct != CssConstruct::Normal {
                c.skip_whitespace();
                if c.is_eof() {
                    break;
                }
            }
            match state.construct {
                CssConstruct::BlockComment => {
                    let start = c.pos();
                    block_comment_body(&mut c, state);
                    push(out, start, c.pos(), TokenKind::Comment);
                    continue;
                }
                CssConstruct::String(quote) => {
                    let start = c.pos();
                    string_body(&mut c, quote, state);
                    push(out, start, c.pos(), TokenKind::String);
                    continue;
                }
                CssConstruct::Normal => {}
            }

            c.skip_whitespace();
            let Some(b) = c.peek() else { break };
            let start = c.pos();
            let selector_context = !state.in_value && !state.in_at_rule;

            let kind = match b {
                b'/' if c.peek_at(1) == Some(b'*') => {
                    c.advance(2);
                    state.construct = CssConstruct::BlockComment;
                    block_comment_body(&mut c, state);
                    TokenKind::Comment
                }
                b'"' | b'\'' => {
                    c.advance(1);
                    let quote = if b == b'"' { Quote::Double } else { Quote::Single };
                    state.construct = CssConstruct::String(quote);
                    string_body(&mut c, quote, state);
                    TokenKind::String
                }
                b'{' => {
                    c.advance(1);
                    state.block_depth = state.block_depth.saturating_add(1);
                    state.in_value = false;
                    state.in_at_rule = false;
                    TokenKind::LeftBrace
                }
                b'}' => {
                    c.advance(1);
                    state.block_depth = state.block_depth.saturating_sub(1);
                    state.in_value = false;
                    state.in_at_rule = false;
                    TokenKind::RightBrace
                }
                b';' => {
                    c.advance(1);
                    state.in_value = false;
                    state.in_at_rule = false;
                    TokenKind::Semicolon
                }
                b':' if after_property || !selector_context => {
                    c.advance(1);
                    if after_property {
                        state.in_value = true;
                    }
                    TokenKind::Colon
                }
                b',' => {
                    c.advance(1);
                    TokenKind::Comma
                }
                b'(' => {
                    c.advance(1);
                    TokenKind::LeftParen
                }
                b')' => {
                    c.advance(1);
                    TokenKind::RightParen
                }
                b'[' if !selector_context => {
                    c.advance(1);
                    TokenKind::LeftBracket
                }
                b']' => {
                    c.advance(1);
                    TokenKind::RightBracket
                }
                b'@' => {
                    c.advance(1);
                    c.eat_while(is_name_byte);
                    state.in_at_rule = true;
                    TokenKind::AtRule
                }
                b'!' => {
                    if c.at_str_ignore_case("!important") {
                        c.advance("!important".len());
                        TokenKind::Important
                    } else {
                        c.advance(1);
                        TokenKind::Operator
                    }
                }
                b'#' if !selector_context => {
                    c.advance(1);
                    c.eat_while(is_name_byte);
                    TokenKind::Number
                }
                b'0'..=b'9' => {
                    number(&mut c);
                    TokenKind::Number
                }
                b'.' if c.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => {
                    number(&mut c);
                    TokenKind::Number
                }
                b'-' | b'+'
                    if !selector_context
                        && c
                            .peek_at(1)
                            .is_some_and(|d| d.is_ascii_digit() || d == b'.') =>
                {
                    c.advance(1);
                    number(&mut c);
                    TokenKind::Number
                }
                b'>' | b'+' | b'~' if selector_context => {
                    c.advance(1);
                    TokenKind::Operator
                }
                _ if is_name_start(b, &c) => {
                    if selector_context {
                        if state.block_depth > 0 && is_property(&c) {
                            c.eat_while(is_name_byte);
                            after_property = true;
                            push(out, start, c.pos(), TokenKind::PropertyName);
                            continue;
                        }
                        selector_run(&mut c);
                        TokenKind::Selector
                    } else {
                        c.eat_while(is_name_byte);
                        let word = &text[start..c.pos()];
                        if word.eq_ignore_ascii_case("url") && c.peek() == Some(b'(') {
                            url_body(&mut c);
                            TokenKind::String
                        } else {
                            TokenKind::Identifier
                        }
                    }
                }
                b'.' | b'#' | b'*' | b'&' | b':' | b'[' | b'%' if selector_context => {
                    selector_run(&mut c);
                    TokenKind::Selector
                }
                b'=' | b'/' | b'*' | b'%' | b'<' | b'>' | b'+' | b'-' | b'~' | b'|' | b'^' | b'$' => {
                    c.advance(1);
                    TokenKind::Operator
                }
                _ => {
                    c.bump();
                    TokenKind::Unknown
                }
            };
            after_property = false;
            push(out, start, c.pos(), kind);
        }
        *from = c.pos();
    }
}

fn push(out: &mut Vec<Token>, start: usize, end: usize, kind: TokenKind) {
    if end > start {
        out.push(Token::new(start, end - start, kind, Language::Style));
    }
}

fn block_comment_body(c: &mut Cursor<'_>, state: &mut CssLexState) {
    match find_pair(c.bytes(), *b"*/", c.pos()) {
        Some(end) => {
            c.set_pos(end + 2);
            state.construct = CssConstruct::Normal;
        }
        None => c.seek_to_end(),
    }
}

fn string_body(c: &mut Cursor<'_>, quote: Quote, state: &mut CssLexState) {
    while let Some(b) = c.peek() {
        c.advance(1);
        if b == b'\\' {
            c.bump();
        } else if b == quote.byte() {
            state.construct = CssConstruct::Normal;
            return;
        }
    }
}

fn url_body(c: &mut Cursor<'_>) {
    let mut escaped = false;
    while let Some(b) = c.peek() {
        c.advance(1);
        match b {
            b'\\' if !escaped => escaped = true,
            b')' if !escaped => return,
            _ => escaped = false,
        }
    }
}

fn number(c: &mut Cursor<'_>) {
    c.eat_while(|b| b.is_ascii_digit() || b == b'.');
    if matches!(c.peek(), Some(b'e' | b'E')) && c.peek_at(1).is_some_and(|d| d.is_ascii_digit()) {
        c.advance(1);
        c.eat_while(|b| b.is_ascii_digit());
    }
    if !c.eat(b'%') {
        c.eat_while(|b| b.is_ascii_alphabetic());
    }
}

fn is_name_byte(b: u8) -> bool {
    tools::ascii::is_word_byte(b) || b == b'-' || b == b'\\'
}

fn is_name_start(b: u8, c: &Cursor<'_>) -> bool {
    b.is_ascii_alphabetic()
        || b == b'_'
        || b >= 0x80
        || b == b'\\'
        || (b == b'-' && c.peek_at(1).is_some_and(|n| n == b'-' || n.is_ascii_alphabetic()))
}

// A name at the cursor is a property if `:` follows and the rest of the
// declaration does not open a block.
fn is_property(c: &Cursor<'_>) -> bool {
    let rest = c.rest();
    let name_len = rest.iter().take_while(|b| is_name_byte(**b)).count();
    let after = &rest[name_len..];
    let colon = after.iter().position(|b| !b.is_ascii_whitespace());
    if colon.map(|i| after[i]) != Some(b':') {
        return false;
    }
    for &b in after {
        match b {
            b';' | b'}' => return true,
            b'{' => return false,
            _ => {}
        }
    }
    true
}

fn selector_run(c: &mut Cursor<'_>) {
    while let Some(b) = c.peek() {
        match b {
            b'(' => skip_balanced(c, b'(', b')'),
            b'[' => skip_balanced(c, b'[', b']'),
            b'\\' => {
                c.advance(1);
                c.bump();
            }
            b'.' | b'#' | b':' | b'*' | b'&' | b'%' | b'-' => c.advance(1),
            _ if tools::ascii::is_word_byte(b) => {
                c.bump();
            }
            _ => break,
        }
    }
}

fn skip_balanced(c: &mut Cursor<'_>, open: u8, close: u8) {
    let mut depth = 0usize;
    while let Some(b) = c.peek() {
        c.bump();
        if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CssScanner;
    use crate::lexer::{CssConstruct, CssLexState};
    use core_types::{Scanner, TokenKind};

    fn kinds(line: &str, state: &mut CssLexState) -> Vec<(TokenKind, String)> {
        CssScanner::new()
            .scan_line(line, state)
            .into_iter()
            .map(|t| (t.kind, t.text(line).to_string()))
            .collect()
    }

    #[test]
    fn rule_with_declaration() {
        let mut state = CssLexState::default();
        let toks = kinds(".a > p:hover, #x { color: red !important; }", &mut state);
        let expected = [
            (TokenKind::Selector, ".a"),
            (TokenKind::Operator, ">"),
            (TokenKind::Selector, "p:hover"),
            (TokenKind::Comma, ","),
            (TokenKind::Selector, "#x"),
            (TokenKind::LeftBrace, "{"),
            (TokenKind::PropertyName, "color"),
            (TokenKind::Colon, ":"),
            (TokenKind::Identifier, "red"),
            (TokenKind::Important, "!important"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RightBrace, "}"),
        ];
        let got: Vec<_> = toks.iter().map(|(k, s)| (*k, s.as_str())).collect();
        assert_eq!(got, expected);
        assert_eq!(state.block_depth, 0);
    }

    #[test]
    fn nested_selector_is_not_a_property() {
        let mut state = CssLexState {
            block_depth: 1,
            ..CssLexState::default()
        };
        let toks = kinds("a:hover { color: blue }", &mut state);
        assert_eq!(toks[0], (TokenKind::Selector, "a:hover".to_string()));
        assert_eq!(toks[2].0, TokenKind::PropertyName);
    }

    #[test]
    fn values_numbers_and_urls() {
        let mut state = CssLexState {
            block_depth: 1,
            ..CssLexState::default()
        };
        let toks = kinds("margin: -1.5em 10% #fff url(a.png);", &mut state);
        let got: Vec<_> = toks.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            got,
            vec![
                TokenKind::PropertyName,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::String,
                TokenKind::Semicolon,
            ]
        );
        assert_eq!(toks[5].1, "url(a.png)");
        assert!(!state.in_value);
    }

    #[test]
    fn comment_spans_lines() {
        let mut state = CssLexState::default();
        let first = kinds("a { /* open", &mut state);
        assert_eq!(first.last().map(|t| t.0), Some(TokenKind::Comment));
        assert_eq!(state.construct, CssConstruct::BlockComment);
        assert!(state.preserves_indent());

        let second = kinds("   still */ b: c;", &mut state);
        assert_eq!(second[0], (TokenKind::Comment, "still */".to_string()));
        assert_eq!(second[1].0, TokenKind::PropertyName);
        assert_eq!(state.construct, CssConstruct::Normal);
    }

    #[test]
    fn at_rule_prelude() {
        let mut state = CssLexState::default();
        let toks = kinds("@media screen and (min-width: 10px) {", &mut state);
        assert_eq!(toks[0], (TokenKind::AtRule, "@media".to_string()));
        assert_eq!(toks[1].0, TokenKind::Identifier);
        assert!(toks.iter().any(|t| t.0 == TokenKind::LeftParen));
        assert_eq!(toks.last().map(|t| t.0), Some(TokenKind::LeftBrace));
        assert!(!state.in_at_rule);
        assert_eq!(state.block_depth, 1);
    }

    #[test]
    fn multi_line_value_stays_a_value() {
        let mut state = CssLexState {
            block_depth: 1,
            ..CssLexState::default()
        };
        kinds("font-family: Georgia,", &mut state);
        assert!(state.in_value);
        let toks = kinds("    serif;", &mut state);
        assert_eq!(toks[0], (TokenKind::Identifier, "serif".to_string()));
    }
}
