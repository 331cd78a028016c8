//! ASCII case-insensitive searching.

use memchr::{memchr, memchr2};

#[inline]
pub fn starts_with_ignore_ascii_case_at(haystack: &[u8], at: usize, needle: &[u8]) -> bool {
    haystack
        .get(at..at.saturating_add(needle.len()))
        .is_some_and(|window| window.eq_ignore_ascii_case(needle))
}

/// Offset of the first case-insensitive occurrence of `needle` in
/// `haystack[from..]`.
pub fn find_ignore_ascii_case(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    let n = needle.len();
    if n == 0 {
        return Some(from.min(haystack.len()));
    }
    let first = needle[0];
    let (a, b) = if first.is_ascii_alphabetic() {
        (first.to_ascii_lowercase(), first.to_ascii_uppercase())
    } else {
        (first, first)
    };
    let mut i = from;
    while i + n <= haystack.len() {
        let rel = if a == b {
            memchr(a, &haystack[i..])?
        } else {
            memchr2(a, b, &haystack[i..])?
        };
        i += rel;
        if i + n > haystack.len() {
            return None;
        }
        if haystack[i..i + n].eq_ignore_ascii_case(needle) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Offset of the first occurrence of the two-byte sequence `pair` in
/// `haystack[from..]`.
pub fn find_pair(haystack: &[u8], pair: [u8; 2], from: usize) -> Option<usize> {
    let mut i = from;
    while i + 1 < haystack.len() {
        let rel = memchr(pair[0], &haystack[i..])?;
        i += rel;
        if haystack.get(i + 1) == Some(&pair[1]) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Letters, digits, `_` and any non-ASCII byte.
#[inline]
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}
