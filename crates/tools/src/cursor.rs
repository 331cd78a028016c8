//! Byte cursor over one line.
//!
//! Scanners only ever stop on ASCII bytes or at the end of the text, so every
//! position they hand out is a UTF-8 boundary as long as non-ASCII bytes are
//! consumed as part of a larger run.

use memchr::memchr;

#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, pos: usize) -> Self {
        let bytes = text.as_bytes();
        Self {
            bytes,
            pos: pos.min(bytes.len()),
        }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.bytes.len());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    pub fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    /// Byte just before the cursor.
    pub fn prev(&self) -> Option<u8> {
        self.pos.checked_sub(1).and_then(|i| self.bytes.get(i).copied())
    }

    /// Consumes one byte, or a whole character if it starts a multi-byte
    /// sequence.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b >= 0x80 {
            while self.peek().is_some_and(|c| (0x80..0xC0).contains(&c)) {
                self.pos += 1;
            }
        }
        Some(b)
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn at_str(&self, s: &str) -> bool {
        self.rest().starts_with(s.as_bytes())
    }

    pub fn at_str_ignore_case(&self, s: &str) -> bool {
        crate::ascii::starts_with_ignore_ascii_case_at(self.bytes, self.pos, s.as_bytes())
    }

    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.at_str(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes bytes while `pred` holds and returns how many were consumed.
    pub fn eat_while(&mut self, mut pred: impl FnMut(u8) -> bool) -> usize {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    pub fn skip_whitespace(&mut self) -> usize {
        self.eat_while(|b| b.is_ascii_whitespace())
    }

    /// Moves to the next occurrence of `b`, or to the end.
    pub fn seek(&mut self, b: u8) -> bool {
        match memchr(b, self.rest()) {
            Some(rel) => {
                self.pos += rel;
                true
            }
            None => {
                self.pos = self.bytes.len();
                false
            }
        }
    }

    pub fn seek_to_end(&mut self) {
        self.pos = self.bytes.len();
    }

    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// First non-whitespace byte at or after the cursor, without moving.
    pub fn peek_non_whitespace(&self) -> Option<u8> {
        self.rest()
            .iter()
            .copied()
            .find(|b| !b.is_ascii_whitespace())
    }
}
