use crate::Token;
use std::fmt::Debug;

/// Single-pass, line-at-a-time lexer.
///
/// `scan` consumes `text` from `*from`, appending tokens to `out` and updating
/// `state` so the next call (on this line or the next) resumes where this one
/// stopped. The end of `text` plays the role of the line terminator. A scanner
/// may return before the end of `text` when it reaches the boundary of the
/// region it lexes (a server-script close bracket, for example); callers loop
/// until `from` reaches the end.
pub trait Scanner {
    type State: Clone + PartialEq + Default + Debug;

    fn scan(&self, text: &str, from: &mut usize, state: &mut Self::State, out: &mut Vec<Token>);

    /// Tokenizes a whole line.
    fn scan_line(&self, text: &str, state: &mut Self::State) -> Vec<Token> {
        let mut out = Vec::new();
        let mut from = 0;
        while from < text.len() {
            let before = (from, state.clone());
            self.scan(text, &mut from, state, &mut out);
            if from == before.0 && *state == before.1 {
                log::debug!(target: "core.scanner", "no progress at offset {from}; stopping line");
                break;
            }
        }
        out
    }
}

/// Quote character that opened a string-like construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quote {
    Single,
    Double,
    Backtick,
}

impl Quote {
    pub fn from_byte(b: u8) -> Option<Quote> {
        match b {
            b'\'' => Some(Quote::Single),
            b'"' => Some(Quote::Double),
            b'`' => Some(Quote::Backtick),
            _ => None,
        }
    }

    pub fn byte(self) -> u8 {
        match self {
            Quote::Single => b'\'',
            Quote::Double => b'"',
            Quote::Backtick => b'`',
        }
    }
}
