//! Script scanner for plain scripts and the two element-aware dialects.
//!
//! Outside markup the scanner is a conventional script lexer. Regular
//! expression literals are recognized only where an operand is expected
//! (`regexp_allowed`); a `<` in operand position opens an element in the
//! markup dialects, and the typed dialect first checks whether it opens a
//! generic argument list instead.

use crate::config::Dialect;
use crate::keywords;
use crate::lexer::{JsConstruct, JsLexState, JsxMode};
use core_types::{Language, Quote, Scanner, Token, TokenKind};
use tools::cursor::Cursor;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, Default)]
pub struct JsScanner {
    dialect: Dialect,
}

impl JsScanner {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn script_token(
        &self,
        c: &mut Cursor<'_>,
        text: &str,
        state: &mut JsLexState,
        out: &mut Vec<Token>,
    ) -> Option<TokenKind> {
        let b = c.peek()?;
        let start = c.pos();
        let kind = match b {
            b'/' if c.peek_at(1) == Some(b'/') => {
                c.seek_to_end();
                return Some(TokenKind::Comment);
            }
            b'/' if c.peek_at(1) == Some(b'*') => {
                c.advance(2);
                block_comment_body(c, state);
                return Some(TokenKind::Comment);
            }
            b'/' if state.regexp_allowed => {
                regexp(c);
                TokenKind::RegExp
            }
            b'"' | b'\'' => {
                c.advance(1);
                let quote = if b == b'"' { Quote::Double } else { Quote::Single };
                string_body(c, quote, state);
                TokenKind::String
            }
            b'`' => {
                c.advance(1);
                state.construct = JsConstruct::Template;
                template_body(c, start, state, out);
                return None;
            }
            b'{' => {
                c.advance(1);
                state.generic_depth = 0;
                open_brace(state);
                TokenKind::LeftBrace
            }
            b'}' => {
                c.advance(1);
                state.generic_depth = 0;
                close_brace(state)
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
                state.generic_depth = 0;
                TokenKind::Semicolon
            }
            b',' => {
                c.advance(1);
                TokenKind::Comma
            }
            b':' => {
                c.advance(1);
                TokenKind::Colon
            }
            b'?' => {
                if c.at_str("?.") && !c.peek_at(2).is_some_and(|d| d.is_ascii_digit()) {
                    c.advance(2);
                    TokenKind::Dot
                } else if c.at_str("??") {
                    operator(c)
                } else {
                    c.advance(1);
                    TokenKind::Question
                }
            }
            b'.' if c.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => {
                number(c);
                TokenKind::Number
            }
            b'.' if c.at_str("...") => {
                c.advance(3);
                TokenKind::Operator
            }
            b'.' => {
                c.advance(1);
                TokenKind::Dot
            }
            b'<' => self.less_than(c, state, out),
            b'>' if state.generic_depth > 0 => {
                c.advance(1);
                state.generic_depth -= 1;
                TokenKind::GenericClose
            }
            b'0'..=b'9' => {
                number(c);
                TokenKind::Number
            }
            b'#' if c.peek_at(1).is_some_and(is_ident_start) => {
                c.advance(1);
                c.eat_while(is_ident_byte);
                TokenKind::Identifier
            }
            b'@' => {
                c.advance(1);
                TokenKind::Delimiter
            }
            _ if is_ident_start(b) => return Some(self.word(c, text, state, out)),
            _ if is_operator_byte(b) => operator(c),
            _ => {
                c.bump();
                TokenKind::Unknown
            }
        };
        state.regexp_allowed = !(kind.ends_operand() || kind == TokenKind::Increment);
        Some(kind)
    }

    fn word(
        &self,
        c: &mut Cursor<'_>,
        text: &str,
        state: &mut JsLexState,
        out: &[Token],
    ) -> TokenKind {
        let start = c.pos();
        c.eat_while(is_ident_byte);
        let word = text.get(start..c.pos()).unwrap_or("");
        let after_dot = out
            .last()
            .is_some_and(|t| t.kind == TokenKind::Dot && t.language == Language::Script);
        let keyword = if after_dot {
            None
        } else {
            keywords::lookup(word, self.dialect.has_types())
        };
        match keyword {
            Some((kind, operand)) => {
                state.regexp_allowed = !operand;
                kind
            }
            None => {
                state.regexp_allowed = false;
                TokenKind::Identifier
            }
        }
    }

    fn less_than(&self, c: &mut Cursor<'_>, state: &mut JsLexState, out: &[Token]) -> TokenKind {
        if self.dialect.has_types() && opens_generic(c, state, out) {
            c.advance(1);
            state.generic_depth = state.generic_depth.saturating_add(1);
            return TokenKind::GenericOpen;
        }
        if self.dialect.has_markup()
            && state.regexp_allowed
            && starts_element(c)
            && state.push_markup(JsxMode::Tag)
        {
            c.advance(1);
            return TokenKind::TagOpen;
        }
        operator(c)
    }

    // One token in markup mode. Returns `false` at the end of the text.
    fn markup_token(
        &self,
        c: &mut Cursor<'_>,
        text: &str,
        mode: JsxMode,
        state: &mut JsLexState,
        out: &mut Vec<Token>,
    ) -> bool {
        c.skip_whitespace();
        let Some(b) = c.peek() else {
            return false;
        };
        let start = c.pos();
        let kind = match mode {
            JsxMode::Tag => match b {
                b'>' => {
                    c.advance(1);
                    state.set_markup_mode(JsxMode::Children);
                    TokenKind::TagClose
                }
                b'/' if c.peek_at(1) == Some(b'>') => {
                    c.advance(2);
                    state.pop_markup();
                    element_closed(state);
                    TokenKind::SelfClosingTagClose
                }
                b'{' => {
                    c.advance(1);
                    open_expression(state);
                    TokenKind::LeftBrace
                }
                b'"' | b'\'' => {
                    c.advance(1);
                    let quote = if b == b'"' { Quote::Double } else { Quote::Single };
                    if !attribute_value_body(c, quote) {
                        state.push_markup(JsxMode::AttributeValue(quote));
                    }
                    TokenKind::AttributeValue
                }
                b'=' => {
                    c.advance(1);
                    TokenKind::Assign
                }
                _ if is_markup_name_byte(b) => {
                    c.eat_while(is_markup_name_byte);
                    if out.last().is_some_and(|t| t.kind == TokenKind::TagOpen) {
                        TokenKind::TagName
                    } else {
                        TokenKind::AttributeName
                    }
                }
                _ => {
                    c.bump();
                    TokenKind::Unknown
                }
            },
            JsxMode::ClosingTag => match b {
                b'>' => {
                    c.advance(1);
                    state.pop_markup();
                    element_closed(state);
                    TokenKind::TagClose
                }
                _ if is_markup_name_byte(b) => {
                    c.eat_while(is_markup_name_byte);
                    TokenKind::TagName
                }
                _ => {
                    c.bump();
                    TokenKind::Unknown
                }
            },
            JsxMode::AttributeValue(quote) => {
                if attribute_value_body(c, quote) {
                    state.pop_markup();
                }
                TokenKind::AttributeValue
            }
            JsxMode::Children => match b {
                b'<' if c.peek_at(1) == Some(b'/') => {
                    c.advance(2);
                    state.set_markup_mode(JsxMode::ClosingTag);
                    TokenKind::EndTagOpen
                }
                b'<' => {
                    c.advance(1);
                    if state.push_markup(JsxMode::Tag) {
                        TokenKind::TagOpen
                    } else {
                        TokenKind::Unknown
                    }
                }
                b'{' => {
                    c.advance(1);
                    open_expression(state);
                    TokenKind::LeftBrace
                }
                _ => {
                    let end = c
                        .rest()
                        .iter()
                        .position(|&b| b == b'<' || b == b'{')
                        .map_or(c.len(), |rel| c.pos() + rel);
                    c.set_pos(end);
                    let run = text.get(start..end).unwrap_or("");
                    push(out, start, start + run.trim_end().len(), TokenKind::Text);
                    return true;
                }
            },
            JsxMode::Expression(_) => return true,
        };
        push(out, start, c.pos(), kind);
        true
    }
}

impl Scanner for JsScanner {
    type State = JsLexState;

    fn scan(&self, text: &str, from: &mut usize, state: &mut JsLexState, out: &mut Vec<Token>) {
        let mut c = Cursor::new(text, *from);
        loop {
            if state.construct != JsConstruct::Normal {
                c.skip_whitespace();
                if c.is_eof() {
                    break;
                }
                let start = c.pos();
                match state.construct {
                    JsConstruct::BlockComment => {
                        block_comment_body(&mut c, state);
                        push(out, start, c.pos(), TokenKind::Comment);
                    }
                    JsConstruct::String(quote) => {
                        string_body(&mut c, quote, state);
                        push(out, start, c.pos(), TokenKind::String);
                        state.regexp_allowed = false;
                    }
                    JsConstruct::Template => template_body(&mut c, start, state, out),
                    JsConstruct::Normal => {}
                }
                continue;
            }

            if self.dialect.has_markup() {
                if let Some(
                    mode @ (JsxMode::Tag
                    | JsxMode::ClosingTag
                    | JsxMode::AttributeValue(_)
                    | JsxMode::Children),
                ) = state.markup_mode()
                {
                    if !self.markup_token(&mut c, text, mode, state, out) {
                        break;
                    }
                    continue;
                }
            }

            c.skip_whitespace();
            if c.is_eof() {
                break;
            }
            let start = c.pos();
            if let Some(kind) = self.script_token(&mut c, text, state, out) {
                push(out, start, c.pos(), kind);
            }
        }
        *from = c.pos();
    }
}

fn push(out: &mut Vec<Token>, start: usize, end: usize, kind: TokenKind) {
    if end > start {
        out.push(Token::new(start, end - start, kind, Language::Script));
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

fn is_ident_byte(b: u8) -> bool {
    tools::ascii::is_word_byte(b) || b == b'$'
}

fn is_markup_name_byte(b: u8) -> bool {
    is_ident_byte(b) || matches!(b, b'-' | b':' | b'.')
}

fn is_operator_byte(b: u8) -> bool {
    matches!(
        b,
        b'=' | b'!' | b'<' | b'>' | b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'|' | b'^' | b'~'
    )
}

fn operator(c: &mut Cursor<'_>) -> TokenKind {
    const OPERATORS: &[(&str, TokenKind)] = &[
        (">>>=", TokenKind::Assign),
        ("===", TokenKind::Operator),
        ("!==", TokenKind::Operator),
        ("**=", TokenKind::Assign),
        ("<<=", TokenKind::Assign),
        (">>=", TokenKind::Assign),
        (">>>", TokenKind::Operator),
        ("&&=", TokenKind::Assign),
        ("||=", TokenKind::Assign),
        ("??=", TokenKind::Assign),
        ("=>", TokenKind::Arrow),
        ("==", TokenKind::Operator),
        ("!=", TokenKind::Operator),
        ("<=", TokenKind::Operator),
        (">=", TokenKind::Operator),
        ("&&", TokenKind::Operator),
        ("||", TokenKind::Operator),
        ("??", TokenKind::Operator),
        ("++", TokenKind::Increment),
        ("--", TokenKind::Increment),
        ("+=", TokenKind::Assign),
        ("-=", TokenKind::Assign),
        ("*=", TokenKind::Assign),
        ("/=", TokenKind::Assign),
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
    if b == Some(b'=') {
        TokenKind::Assign
    } else {
        TokenKind::Operator
    }
}

fn open_brace(state: &mut JsLexState) {
    if let Some(level) = state.innermost_template() {
        level.braces = level.braces.saturating_add(1);
    } else if let Some(JsxMode::Expression(n)) = state.markup_mode() {
        state.set_markup_mode(JsxMode::Expression(n.saturating_add(1)));
    }
}

fn close_brace(state: &mut JsLexState) -> TokenKind {
    match state.innermost_template().map(|level| level.braces) {
        Some(0) => {
            state.pop_template();
            state.construct = JsConstruct::Template;
            return TokenKind::TemplateExpressionClose;
        }
        Some(_) => {
            if let Some(level) = state.innermost_template() {
                level.braces -= 1;
            }
            return TokenKind::RightBrace;
        }
        None => {}
    }
    match state.markup_mode() {
        Some(JsxMode::Expression(0)) => state.pop_markup(),
        Some(JsxMode::Expression(n)) => state.set_markup_mode(JsxMode::Expression(n - 1)),
        _ => {}
    }
    TokenKind::RightBrace
}

fn open_expression(state: &mut JsLexState) {
    if state.push_markup(JsxMode::Expression(0)) {
        state.regexp_allowed = true;
    }
}

// A complete element is an operand of the surrounding script.
fn element_closed(state: &mut JsLexState) {
    if matches!(state.markup_mode(), None | Some(JsxMode::Expression(_))) {
        state.regexp_allowed = false;
    }
}

fn starts_element(c: &Cursor<'_>) -> bool {
    c.peek_at(1)
        .is_some_and(|b| b == b'>' || b.is_ascii_alphabetic() || b == b'_' || b == b'$')
}

// `<` right after a name opens type arguments when a type list follows;
// in operand position only `<T,` and `<T extends` do.
fn opens_generic(c: &Cursor<'_>, state: &JsLexState, out: &[Token]) -> bool {
    let rest = c.rest().get(1..).unwrap_or(&[]);
    let after_name = out
        .last()
        .is_some_and(|t| t.kind == TokenKind::Identifier && t.end() == c.pos());
    if after_name {
        looks_like_type_arguments(rest)
    } else if state.regexp_allowed {
        looks_like_type_parameters(rest)
    } else {
        false
    }
}

fn skip_spaces(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
        i += 1;
    }
    i
}

fn ident_len(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i) {
        Some(&b) if is_ident_start(b) => bytes[i..].iter().take_while(|b| is_ident_byte(**b)).count(),
        _ => 0,
    }
}

fn looks_like_type_arguments(rest: &[u8]) -> bool {
    let mut i = skip_spaces(rest, 0);
    loop {
        let len = ident_len(rest, i);
        if len == 0 {
            return false;
        }
        i += len;
        if rest.get(i) == Some(&b'.') {
            i += 1;
        } else {
            break;
        }
    }
    i = skip_spaces(rest, i);
    match rest.get(i) {
        Some(b',' | b'>' | b'<' | b'[') => true,
        Some(&op @ (b'|' | b'&')) => rest.get(i + 1) != Some(&op),
        _ => rest[i..].starts_with(b"extends "),
    }
}

fn looks_like_type_parameters(rest: &[u8]) -> bool {
    let i = skip_spaces(rest, 0);
    let len = ident_len(rest, i);
    if len == 0 {
        return false;
    }
    let i = skip_spaces(rest, i + len);
    rest.get(i) == Some(&b',') || rest[i..].starts_with(b"extends ")
}

fn block_comment_body(c: &mut Cursor<'_>, state: &mut JsLexState) {
    match tools::ascii::find_pair(c.bytes(), [b'*', b'/'], c.pos()) {
        Some(i) => {
            c.set_pos(i + 2);
            state.construct = JsConstruct::Normal;
        }
        None => {
            c.seek_to_end();
            state.construct = JsConstruct::BlockComment;
        }
    }
}

fn string_body(c: &mut Cursor<'_>, quote: Quote, state: &mut JsLexState) {
    let q = quote.byte();
    loop {
        match c.peek() {
            None => {
                state.construct = JsConstruct::String(quote);
                return;
            }
            Some(b'\\') => {
                c.advance(1);
                c.bump();
            }
            Some(b) if b == q => {
                c.advance(1);
                state.construct = JsConstruct::Normal;
                return;
            }
            Some(_) => {
                c.bump();
            }
        }
    }
}

fn template_body(c: &mut Cursor<'_>, start: usize, state: &mut JsLexState, out: &mut Vec<Token>) {
    loop {
        match c.peek() {
            None => {
                push(out, start, c.pos(), TokenKind::TemplateString);
                return;
            }
            Some(b'\\') => {
                c.advance(1);
                c.bump();
            }
            Some(b'`') => {
                c.advance(1);
                push(out, start, c.pos(), TokenKind::TemplateString);
                state.construct = JsConstruct::Normal;
                state.regexp_allowed = false;
                return;
            }
            Some(b'$') if c.peek_at(1) == Some(b'{') => {
                if !state.push_template() {
                    c.advance(2);
                    continue;
                }
                push(out, start, c.pos(), TokenKind::TemplateString);
                let open = c.pos();
                c.advance(2);
                push(out, open, c.pos(), TokenKind::TemplateExpressionOpen);
                state.construct = JsConstruct::Normal;
                state.regexp_allowed = true;
                return;
            }
            Some(_) => {
                c.bump();
            }
        }
    }
}

fn regexp(c: &mut Cursor<'_>) {
    c.advance(1);
    let mut in_class = false;
    while let Some(b) = c.peek() {
        match b {
            b'\\' => {
                c.advance(1);
                c.bump();
            }
            b'[' => {
                in_class = true;
                c.advance(1);
            }
            b']' => {
                in_class = false;
                c.advance(1);
            }
            b'/' if !in_class => {
                c.advance(1);
                c.eat_while(|f| f.is_ascii_alphabetic());
                return;
            }
            _ => {
                c.bump();
            }
        }
    }
}

fn number(c: &mut Cursor<'_>) {
    let digits = |b: u8| b.is_ascii_digit() || b == b'_';
    if c.peek() == Some(b'0') && matches!(c.peek_at(1), Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O')) {
        c.advance(2);
        c.eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
    } else {
        c.eat_while(digits);
        if c.peek() == Some(b'.') && c.peek_at(1) != Some(b'.') {
            c.advance(1);
            c.eat_while(digits);
        }
        if matches!(c.peek(), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(c.peek_at(1), Some(b'+' | b'-')));
            if c.peek_at(1 + sign).is_some_and(|d| d.is_ascii_digit()) {
                c.advance(1 + sign);
                c.eat_while(digits);
            }
        }
    }
    c.eat(b'n');
}

fn attribute_value_body(c: &mut Cursor<'_>, quote: Quote) -> bool {
    if c.seek(quote.byte()) {
        c.advance(1);
        true
    } else {
        false
    }
}
