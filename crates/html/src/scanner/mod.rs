//! Markup scanner.
//!
//! Lexes tags, attributes, comments, declarations and text, and hands the
//! bodies of `<script>` and `<style>` containers to the script and style
//! scanners it owns. Server-script islands (`<?php ... ?>`) may interrupt any
//! construct, including attribute values and container bodies; the
//! interrupted construct resumes after the island.
//!
//! Every construct is lexed on the line cut at the next `<?`, so the scanners
//! never see past an island; offsets stay valid because the cut is a prefix.

use crate::elements::{character_reference_len, find_close_tag, is_name_byte, is_name_start};
use crate::lexer::{Embedded, HtmlConstruct, HtmlLexState};
use core_types::{Language, Quote, Scanner, Token, TokenKind};
use css::CssScanner;
use js::{Dialect, JsScanner};
use php::PhpScanner;
use tools::ascii::find_pair;
use tools::cursor::Cursor;


#[derive(Clone, Copy, Debug)]
pub struct HtmlScanner {
    css: CssScanner,
    js: JsScanner,
    php: PhpScanner,
}

impl Default for HtmlScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlScanner {
    pub fn new() -> Self {
        Self {
            css: CssScanner::new(),
            js: JsScanner::new(Dialect::Plain),
            php: PhpScanner::embedded(),
        }
    }

    // Runs the container's scanner up to the end tag or the next island.
    fn embedded_body(
        &self,
        kind: Embedded,
        text: &str,
        c: &mut Cursor<'_>,
        limit: usize,
        state: &mut HtmlLexState,
        out: &mut Vec<Token>,
    ) {
        let close = find_close_tag(&c.bytes()[..limit], kind.close_tag(), c.pos());
        let end = close.unwrap_or(limit);
        let body = &text[..end];
        let mut pos = c.pos();
        while pos < end {
            let before = pos;
            match kind {
                Embedded::Script => self.js.scan(body, &mut pos, &mut state.js, out),
                Embedded::Style => self.css.scan(body, &mut pos, &mut state.css, out),
            }
            if pos == before {
                log::debug!(target: "html.scanner", "{kind:?} scanner stalled at {pos}");
                break;
            }
        }
        c.set_pos(end);
        if close.is_some() {
            log::trace!(target: "html.scanner", "leaving {kind:?} body at {end}");
            state.close_embedded();
        }
    }

    fn server_script(
        &self,
        text: &str,
        c: &mut Cursor<'_>,
        state: &mut HtmlLexState,
        out: &mut Vec<Token>,
    ) -> bool {
        let mut pos = c.pos();
        let before = (pos, state.php.in_code);
        self.php.scan(text, &mut pos, &mut state.php, out);
        c.set_pos(pos);
        (pos, state.php.in_code) != before
    }
}

impl Scanner for HtmlScanner {
    type State = HtmlLexState;

    fn scan(&self, text: &str, from: &mut usize, state: &mut HtmlLexState, out: &mut Vec<Token>) {
        let mut c = Cursor::new(text, *from);
        loop {
            if state.php.in_code {
                if !self.server_script(text, &mut c, state, out) || state.php.in_code {
                    break;
                }
                continue;
            }
            if c.is_eof() {
                break;
            }
            let limit = find_pair(c.bytes(), *b"<?", c.pos()).unwrap_or(c.len());
            if limit == c.pos() {
                if !self.server_script(text, &mut c, state, out) {
                    break;
                }
                continue;
            }

            let view = &text[..limit];
            let mut v = Cursor::new(view, c.pos());
            let marker = (state.construct, state.pending, state.embedded);
            match (state.embedded, state.construct) {
                (Some(kind), HtmlConstruct::Text) => {
                    self.embedded_body(kind, text, &mut v, limit, state, out);
                }
                (_, HtmlConstruct::Text) => content(&mut v, state, out),
                (_, HtmlConstruct::Tag) => tag_token(&mut v, state, out),
                (_, HtmlConstruct::AttributeValue(quote)) => {
                    v.skip_whitespace();
                    let start = v.pos();
                    quoted_value(&mut v, quote, state);
                    push(out, start, v.pos(), TokenKind::AttributeValue);
                }
                (_, HtmlConstruct::Comment) => comment_body(&mut v, state, out),
                (_, HtmlConstruct::Declaration) => {
                    v.skip_whitespace();
                    let start = v.pos();
                    declaration_body(&mut v, state);
                    push(out, start, v.pos(), TokenKind::Doctype);
                }
            }
            if v.pos() == c.pos() && marker == (state.construct, state.pending, state.embedded) {
                // Nothing consumed and nothing changed; skip one character.
                v.bump();
            }
            c.set_pos(v.pos());
        }
        *from = c.pos();
    }
}

fn push(out: &mut Vec<Token>, start: usize, end: usize, kind: TokenKind) {
    if end > start {
        out.push(Token::new(start, end - start, kind, Language::Markup));
    }
}

// Element content: text, character references and the start of tags,
// comments and declarations.
fn content(c: &mut Cursor<'_>, state: &mut HtmlLexState, out: &mut Vec<Token>) {
    c.skip_whitespace();
    let start = c.pos();
    let Some(b) = c.peek() else {
        return;
    };
    match b {
        b'<' if c.at_str("<!--") => {
            c.advance(4);
            push(out, start, c.pos(), TokenKind::CommentOpen);
            state.construct = HtmlConstruct::Comment;
        }
        b'<' if c.peek_at(1) == Some(b'!') => {
            state.construct = HtmlConstruct::Declaration;
            declaration_body(c, state);
            push(out, start, c.pos(), TokenKind::Doctype);
        }
        b'<' if c.peek_at(1) == Some(b'/') && c.peek_at(2).is_some_and(is_name_start) => {
            c.advance(2);
            push(out, start, c.pos(), TokenKind::EndTagOpen);
            let name = c.pos();
            c.eat_while(is_name_byte);
            push(out, name, c.pos(), TokenKind::TagName);
            state.construct = HtmlConstruct::Tag;
        }
        b'<' if c.peek_at(1).is_some_and(is_name_start) => {
            c.advance(1);
            push(out, start, c.pos(), TokenKind::TagOpen);
            let name = c.pos();
            c.eat_while(is_name_byte);
            push(out, name, c.pos(), TokenKind::TagName);
            let name = std::str::from_utf8(&c.bytes()[name..c.pos()]).unwrap_or("");
            state.pending = Embedded::from_tag_name(name);
            state.construct = HtmlConstruct::Tag;
        }
        b'&' => match character_reference_len(c.bytes(), start) {
            Some(len) => {
                c.advance(len);
                push(out, start, c.pos(), TokenKind::EntityReference);
            }
            None => {
                c.advance(1);
                text_run(c, start, out);
            }
        },
        _ => {
            c.bump();
            text_run(c, start, out);
        }
    }
}

// Text up to the next `<` or `&`, without trailing blanks.
fn text_run(c: &mut Cursor<'_>, start: usize, out: &mut Vec<Token>) {
    while let Some(b) = c.peek() {
        if b == b'<' || b == b'&' {
            break;
        }
        c.bump();
    }
    let run = &c.bytes()[start..c.pos()];
    let trimmed = run.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(0, |i| i + 1);
    push(out, start, start + trimmed, TokenKind::Text);
}

fn tag_token(c: &mut Cursor<'_>, state: &mut HtmlLexState, out: &mut Vec<Token>) {
    c.skip_whitespace();
    let start = c.pos();
    let Some(b) = c.peek() else {
        return;
    };
    let kind = match b {
        b'>' => {
            c.advance(1);
            state.construct = HtmlConstruct::Text;
            if let Some(kind) = state.pending.take() {
                log::trace!(target: "html.scanner", "entering {kind:?} body");
                state.open_embedded(kind);
            }
            TokenKind::TagClose
        }
        b'/' if c.peek_at(1) == Some(b'>') => {
            c.advance(2);
            state.construct = HtmlConstruct::Text;
            state.pending = None;
            TokenKind::SelfClosingTagClose
        }
        // A tag that was never closed.
        b'<' => {
            state.construct = HtmlConstruct::Text;
            state.pending = None;
            return;
        }
        b'"' | b'\'' => {
            let quote = if b == b'"' { Quote::Double } else { Quote::Single };
            c.advance(1);
            quoted_value(c, quote, state);
            TokenKind::AttributeValue
        }
        b'=' => {
            c.advance(1);
            TokenKind::Delimiter
        }
        _ if out
            .last()
            .is_some_and(|t| t.kind == TokenKind::Delimiter && t.language == Language::Markup) =>
        {
            // Unquoted value.
            c.eat_while(|b| !b.is_ascii_whitespace() && b != b'>');
            TokenKind::AttributeValue
        }
        _ if is_name_byte(b) || b == b'@' => {
            c.advance(1);
            c.eat_while(|b| is_name_byte(b) || b == b'@');
            TokenKind::AttributeName
        }
        _ => {
            c.bump();
            TokenKind::Unknown
        }
    };
    push(out, start, c.pos(), kind);
}

fn quoted_value(c: &mut Cursor<'_>, quote: Quote, state: &mut HtmlLexState) {
    state.construct = HtmlConstruct::AttributeValue(quote);
    if c.seek(quote.byte()) {
        c.advance(1);
        state.construct = HtmlConstruct::Tag;
    }
}

fn comment_body(c: &mut Cursor<'_>, state: &mut HtmlLexState, out: &mut Vec<Token>) {
    c.skip_whitespace();
    let start = c.pos();
    match tools::ascii::find_ignore_ascii_case(c.bytes(), b"-->", start) {
        Some(end) => {
            let body = &c.bytes()[start..end];
            let trimmed = body.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(0, |i| i + 1);
            push(out, start, start + trimmed, TokenKind::Comment);
            c.set_pos(end + 3);
            push(out, end, end + 3, TokenKind::CommentClose);
            state.construct = HtmlConstruct::Text;
        }
        None => {
            c.seek_to_end();
            push(out, start, c.pos(), TokenKind::Comment);
        }
    }
}

fn declaration_body(c: &mut Cursor<'_>, state: &mut HtmlLexState) {
    if c.seek(b'>') {
        c.advance(1);
        state.construct = HtmlConstruct::Text;
    }
}
