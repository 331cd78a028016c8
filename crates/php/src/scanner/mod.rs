//! Server-script scanner.

use crate::keywords;
use crate::lexer::{PhpConstruct, PhpLexState};
use core_types::{Language, Quote, Scanner, Token, TokenKind};
use tools::ascii::find_pair;
use tools::cursor::Cursor;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug)]
pub struct PhpScanner {
    /// Emit the text outside code as markup text. A markup host lexes that
    /// text itself, so the embedded scanner stops at `?>` instead.
    standalone: bool,
}

impl Default for PhpScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PhpScanner {
    pub fn new() -> Self {
        Self { standalone: true }
    }

    pub fn embedded() -> Self {
        Self { standalone: false }
    }

    pub fn is_standalone(&self) -> bool {
        self.standalone
    }

    fn code_token(
        &self,
        c: &mut Cursor<'_>,
        text: &str,
        state: &mut PhpLexState,
        out: &mut Vec<Token>,
    ) {
        let Some(b) = c.peek() else {
            return;
        };
        let start = c.pos();
        let kind = match b {
            b'?' if c.peek_at(1) == Some(b'>') => {
                c.advance(2);
                state.in_code = false;
                TokenKind::ServerScriptClose
            }
            b'#' if c.peek_at(1) == Some(b'[') => {
                c.advance(1);
                TokenKind::Delimiter
            }
            b'#' => {
                line_comment(c);
                TokenKind::Comment
            }
            b'/' if c.peek_at(1) == Some(b'/') => {
                line_comment(c);
                TokenKind::Comment
            }
            b'/' if c.peek_at(1) == Some(b'*') => {
                c.advance(2);
                state.construct = PhpConstruct::BlockComment;
                block_comment_body(c, state);
                TokenKind::Comment
            }
            b'\'' => {
                c.advance(1);
                state.construct = PhpConstruct::String(Quote::Single);
                plain_string_body(c, state);
                TokenKind::String
            }
            b'"' | b'`' => {
                c.advance(1);
                let quote = if b == b'"' { Quote::Double } else { Quote::Backtick };
                state.construct = PhpConstruct::String(quote);
                interpolated_body(c, start, Some(quote), state, out);
                return;
            }
            b'<' if c.at_str("<<<") => match heredoc_start(c) {
                Some((tag, nowdoc)) => {
                    let tag = text.get(tag.0..tag.1).unwrap_or("");
                    state.open_heredoc(tag, nowdoc);
                    TokenKind::HeredocStart
                }
                None => {
                    c.advance(2);
                    TokenKind::Operator
                }
            },
            b'$' if c.peek_at(1).is_some_and(|n| is_ident_start(n) || n == b'$') => {
                c.advance(1);
                c.eat(b'$');
                c.eat_while(is_ident_byte);
                TokenKind::Variable
            }
            b'{' => {
                c.advance(1);
                TokenKind::LeftBrace
            }
            b'}' => {
                c.advance(1);
                TokenKind::RightBrace
            }
            b'(' => {
                c.advance(1);
                TokenKind::LeftParen
            }
            b')' => {
                c.advance(1);
                TokenKind::RightParen
            }
            b'[' => {
                c.advance(1);
                TokenKind::LeftBracket
            }
            b']' => {
                c.advance(1);
                TokenKind::RightBracket
            }
            b';' => {
                c.advance(1);
                TokenKind::Semicolon
            }
            b',' => {
                c.advance(1);
                TokenKind::Comma
            }
            b'.' if c.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => {
                number(c);
                TokenKind::Number
            }
            b'0'..=b'9' => {
                number(c);
                TokenKind::Number
            }
            b'\\' if c.peek_at(1).is_some_and(is_ident_start) => {
                c.advance(1);
                self.word(c, text, out)
            }
            _ if is_ident_start(b) => self.word(c, text, out),
            _ if is_operator_byte(b) => operator(c),
            _ => {
                c.bump();
                TokenKind::Unknown
            }
        };
        push(out, start, c.pos(), kind);
    }

    fn word(&self, c: &mut Cursor<'_>, text: &str, out: &[Token]) -> TokenKind {
        let start = c.pos();
        c.eat_while(|b| is_ident_byte(b) || b == b'\\');
        let word = text.get(start..c.pos()).unwrap_or("");
        let member = out.last().is_some_and(|t| t.kind == TokenKind::Dot);
        if member || word.contains('\\') {
            return TokenKind::Identifier;
        }
        keywords::lookup(word).unwrap_or(TokenKind::Identifier)
    }
}

impl Scanner for PhpScanner {
    type State = PhpLexState;

    fn scan(&self, text: &str, from: &mut usize, state: &mut PhpLexState, out: &mut Vec<Token>) {
        let mut c = Cursor::new(text, *from);
        loop {
            if !state.in_code {
                if c.at_str("<?") {
                    let start = c.pos();
                    open_bracket(&mut c);
                    state.in_code = true;
                    push(out, start, c.pos(), TokenKind::ServerScriptOpen);
                    continue;
                }
                if !self.standalone || c.is_eof() {
                    break;
                }
                markup_text(&mut c, out);
                continue;
            }

            match state.construct {
                PhpConstruct::Normal => {}
                PhpConstruct::BlockComment => {
                    c.skip_whitespace();
                    if c.is_eof() {
                        break;
                    }
                    let start = c.pos();
                    block_comment_body(&mut c, state);
                    push(out, start, c.pos(), TokenKind::Comment);
                    continue;
                }
                PhpConstruct::String(Quote::Single) => {
                    c.skip_whitespace();
                    if c.is_eof() {
                        break;
                    }
                    let start = c.pos();
                    plain_string_body(&mut c, state);
                    push(out, start, c.pos(), TokenKind::String);
                    continue;
                }
                PhpConstruct::String(quote) => {
                    c.skip_whitespace();
                    if c.is_eof() {
                        break;
                    }
                    let start = c.pos();
                    interpolated_body(&mut c, start, Some(quote), state, out);
                    continue;
                }
                PhpConstruct::Heredoc { nowdoc } => {
                    c.skip_whitespace();
                    if c.is_eof() {
                        break;
                    }
                    heredoc_line(&mut c, nowdoc, state, out);
                    continue;
                }
            }

            c.skip_whitespace();
            if c.is_eof() {
                break;
            }
            self.code_token(&mut c, text, state, out);
            if !state.in_code && !self.standalone {
                break;
            }
        }
        *from = c.pos();
    }
}

fn push(out: &mut Vec<Token>, start: usize, end: usize, kind: TokenKind) {
    if end > start {
        let language = if kind == TokenKind::Text {
            Language::Markup
        } else {
            Language::ServerScript
        };
        out.push(Token::new(start, end - start, kind, language));
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_byte(b: u8) -> bool {
    tools::ascii::is_word_byte(b)
}

fn is_operator_byte(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'=' | b'!' | b'<' | b'>' | b'&' | b'|' | b'^' | b'~'
            | b'?' | b':' | b'.' | b'@'
    )
}

fn operator(c: &mut Cursor<'_>) -> TokenKind {
    const OPERATORS: &[(&str, TokenKind)] = &[
        ("<=>", TokenKind::Operator),
        ("===", TokenKind::Operator),
        ("!==", TokenKind::Operator),
        ("**=", TokenKind::Assign),
        ("...", TokenKind::Operator),
        ("<<=", TokenKind::Assign),
        (">>=", TokenKind::Assign),
        ("??=", TokenKind::Assign),
        ("?->", TokenKind::Dot),
        ("->", TokenKind::Dot),
        ("::", TokenKind::Dot),
        ("=>", TokenKind::Arrow),
        ("==", TokenKind::Operator),
        ("!=", TokenKind::Operator),
        ("<>", TokenKind::Operator),
        ("<=", TokenKind::Operator),
        (">=", TokenKind::Operator),
        ("&&", TokenKind::Operator),
        ("||", TokenKind::Operator),
        ("??", TokenKind::Operator),
        ("?:", TokenKind::Operator),
        ("++", TokenKind::Increment),
        ("--", TokenKind::Increment),
        ("+=", TokenKind::Assign),
        ("-=", TokenKind::Assign),
        ("*=", TokenKind::Assign),
        ("/=", TokenKind::Assign),
        (".=", TokenKind::Assign),
        ("%=", TokenKind::Assign),
        ("&=", TokenKind::Assign),
        ("|=", TokenKind::Assign),
        ("^=", TokenKind::Assign),
        ("**", TokenKind::Operator),
        ("<<", TokenKind::Operator),
        (">>", TokenKind::Operator),
    ];
    for (op, kind) in OPERATORS {
        if c.eat_str(op) {
            return *kind;
        }
    }
    let b = c.peek();
    c.advance(1);
    match b {
        Some(b'=') => TokenKind::Assign,
        Some(b'?') => TokenKind::Question,
        Some(b':') => TokenKind::Colon,
        _ => TokenKind::Operator,
    }
}

// `<?php` needs a following blank or the line end; otherwise `<?` alone.
fn open_bracket(c: &mut Cursor<'_>) {
    c.advance(2);
    if c.at_str_ignore_case("php")
        && c.peek_at(3).is_none_or(|b| b.is_ascii_whitespace())
    {
        c.advance(3);
    } else {
        c.eat(b'=');
    }
}

fn markup_text(c: &mut Cursor<'_>, out: &mut Vec<Token>) {
    c.skip_whitespace();
    let start = c.pos();
    let end = find_pair(c.bytes(), *b"<?", start).unwrap_or(c.len());
    c.set_pos(end);
    let run = &c.bytes()[start..end];
    let trimmed = run.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(0, |i| i + 1);
    push(out, start, start + trimmed, TokenKind::Text);
}

// Line comments stop before `?>`.
fn line_comment(c: &mut Cursor<'_>) {
    match find_pair(c.bytes(), *b"?>", c.pos()) {
        Some(end) => c.set_pos(end),
        None => c.seek_to_end(),
    }
}

fn block_comment_body(c: &mut Cursor<'_>, state: &mut PhpLexState) {
    match find_pair(c.bytes(), *b"*/", c.pos()) {
        Some(end) => {
            c.set_pos(end + 2);
            state.construct = PhpConstruct::Normal;
        }
        None => c.seek_to_end(),
    }
}

fn plain_string_body(c: &mut Cursor<'_>, state: &mut PhpLexState) {
    while let Some(b) = c.peek() {
        c.advance(1);
        if b == b'\\' {
            c.bump();
        } else if b == b'\'' {
            state.construct = PhpConstruct::Normal;
            return;
        }
    }
}

/// String body with `$name` interpolation, emitted as string segments around
/// variable tokens. `quote` is `None` for heredoc lines, which run to the end
/// of the line.
fn interpolated_body(
    c: &mut Cursor<'_>,
    mut segment: usize,
    quote: Option<Quote>,
    state: &mut PhpLexState,
    out: &mut Vec<Token>,
) {
    while let Some(b) = c.peek() {
        match b {
            b'\\' => {
                c.advance(1);
                c.bump();
            }
            b'$' if c.peek_at(1).is_some_and(is_ident_start) => {
                push(out, segment, c.pos(), TokenKind::String);
                let start = c.pos();
                c.advance(1);
                c.eat_while(is_ident_byte);
                push(out, start, c.pos(), TokenKind::Variable);
                segment = c.pos();
            }
            _ if quote.is_some_and(|q| q.byte() == b) => {
                c.advance(1);
                state.construct = PhpConstruct::Normal;
                break;
            }
            _ => {
                c.bump();
            }
        }
    }
    push(out, segment, c.pos(), TokenKind::String);
}

// `<<<TAG`, `<<<"TAG"` or `<<<'TAG'` (nowdoc). Returns the tag span.
fn heredoc_start(c: &mut Cursor<'_>) -> Option<((usize, usize), bool)> {
    let bytes = c.bytes();
    let mut i = c.pos() + 3;
    while bytes.get(i).is_some_and(|b| *b == b' ' || *b == b'\t') {
        i += 1;
    }
    let quote = bytes.get(i).copied().filter(|b| *b == b'"' || *b == b'\'');
    if quote.is_some() {
        i += 1;
    }
    let tag_start = i;
    if !bytes.get(i).copied().is_some_and(is_ident_start) {
        return None;
    }
    while bytes.get(i).copied().is_some_and(is_ident_byte) {
        i += 1;
    }
    let tag_end = i;
    if let Some(q) = quote {
        if bytes.get(i) != Some(&q) {
            return None;
        }
        i += 1;
    }
    c.set_pos(i);
    Some(((tag_start, tag_end), quote == Some(b'\'')))
}

// One line inside a heredoc: either the closing tag or a body line.
fn heredoc_line(c: &mut Cursor<'_>, nowdoc: bool, state: &mut PhpLexState, out: &mut Vec<Token>) {
    let start = c.pos();
    let tag = state.heredoc_tag.as_deref().unwrap_or("");
    let closes = !tag.is_empty()
        && c.at_str(tag)
        && !c.peek_at(tag.len()).is_some_and(is_ident_byte);
    if closes {
        c.advance(tag.len());
        state.close_heredoc();
        push(out, start, c.pos(), TokenKind::HeredocEnd);
        return;
    }
    if nowdoc {
        c.seek_to_end();
        push(out, start, c.pos(), TokenKind::String);
    } else {
        interpolated_body(c, start, None, state, out);
    }
}

fn number(c: &mut Cursor<'_>) {
    if c.peek() == Some(b'0') && matches!(c.peek_at(1), Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O')) {
        c.advance(2);
        c.eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
        return;
    }
    c.eat_while(|b| b.is_ascii_digit() || b == b'_');
    if c.peek() == Some(b'.') && c.peek_at(1).is_some_and(|d| d.is_ascii_digit()) {
        c.advance(1);
        c.eat_while(|b| b.is_ascii_digit() || b == b'_');
    }
    if matches!(c.peek(), Some(b'e' | b'E')) {
        let digit_at = if matches!(c.peek_at(1), Some(b'+' | b'-')) { 2 } else { 1 };
        if c.peek_at(digit_at).is_some_and(|d| d.is_ascii_digit()) {
            c.advance(digit_at);
            c.eat_while(|b| b.is_ascii_digit());
        }
    }
}
