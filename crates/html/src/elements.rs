//! Markup vocabulary: void elements, container close tags and character
//! references.

use memchr::memchr;

const MAX_NAME_LEN: usize = 32;
const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Elements that never have content or an end tag.
pub fn is_void_element(name: &str) -> bool {
    const VOID: &[&str] = &[
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ];
    name.len() <= 6 && VOID.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Tag and attribute name characters (ASCII `[A-Za-z0-9:_.-]` plus any
/// non-ASCII byte).
#[inline]
pub fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'_' | b'-' | b'.') || b >= 0x80
}

#[inline]
pub fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b >= 0x80
}

/// Offset of the container's end tag (`</script`, `</style`) in
/// `haystack[from..]`.
///
/// The name must be followed by whitespace, `/`, `>` or the end of the line;
/// the `>` itself may sit on a later line.
pub fn find_close_tag(haystack: &[u8], close_tag: &[u8], from: usize) -> Option<usize> {
    debug_assert!(close_tag.starts_with(b"</"));
    let n = close_tag.len();
    let mut i = from;
    while i + n <= haystack.len() {
        // `<` cannot appear inside a UTF-8 continuation byte.
        let rel = memchr(b'<', &haystack[i..])?;
        i += rel;
        if i + n > haystack.len() {
            return None;
        }
        if haystack[i + 1] == b'/' && haystack[i..i + n].eq_ignore_ascii_case(close_tag) {
            match haystack.get(i + n) {
                None => return Some(i),
                Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(i),
                Some(_) => {}
            }
        }
        i += 1;
    }
    None
}

/// Length of the character reference starting at `bytes[at]` (`&amp;`,
/// `&#123;`, `&#x1F4A9;`), if it is well formed and `;`-terminated.
pub fn character_reference_len(bytes: &[u8], at: usize) -> Option<usize> {
    if bytes.get(at) != Some(&b'&') {
        return None;
    }
    let (digits_start, max, accept): (usize, usize, fn(u8) -> bool) =
        match (bytes.get(at + 1), bytes.get(at + 2)) {
            (Some(b'#'), Some(b'x' | b'X')) => (at + 3, MAX_HEX_DIGITS, |b| b.is_ascii_hexdigit()),
            (Some(b'#'), _) => (at + 2, MAX_DEC_DIGITS, |b| b.is_ascii_digit()),
            (Some(b), _) if b.is_ascii_alphabetic() => {
                (at + 1, MAX_NAME_LEN, |b| b.is_ascii_alphanumeric())
            }
            _ => return None,
        };
    let mut j = digits_start;
    while j < bytes.len() && j - digits_start <= max {
        let b = bytes[j];
        if b == b';' {
            return (j > digits_start).then_some(j + 1 - at);
        }
        if !accept(b) {
            return None;
        }
        j += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_elements_ignore_case() {
        assert!(is_void_element("br"));
        assert!(is_void_element("IMG"));
        assert!(!is_void_element("div"));
        assert!(!is_void_element("imgs"));
    }

    #[test]
    fn close_tag_needs_a_name_boundary() {
        let line = b"x = '</scripts>'; </SCRIPT >";
        assert_eq!(find_close_tag(line, b"</script", 0), Some(18));
        assert_eq!(find_close_tag(b"a </style", b"</style", 0), Some(2));
        assert_eq!(find_close_tag(b"</sty", b"</style", 0), None);
    }

    #[test]
    fn character_references() {
        assert_eq!(character_reference_len(b"&amp; x", 0), Some(5));
        assert_eq!(character_reference_len(b"a&#123;", 1), Some(6));
        assert_eq!(character_reference_len(b"&#x1F4A9;", 0), Some(9));
        assert_eq!(character_reference_len(b"& b", 0), None);
        assert_eq!(character_reference_len(b"&amp", 0), None);
        assert_eq!(character_reference_len(b"&#;", 0), None);
        assert_eq!(character_reference_len(b"&#x1234567;", 0), None);
    }
}
