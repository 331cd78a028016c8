//! Sorted keyword tables.
//!
//! Tables are `static` slices of `(word, value)` pairs sorted by word, looked
//! up with a binary search.

pub fn lookup<T: Copy>(table: &[(&str, T)], word: &str) -> Option<T> {
    table
        .binary_search_by(|(candidate, _)| (*candidate).cmp(word))
        .ok()
        .map(|i| table[i].1)
}

/// Lookup for case-insensitive languages. `table` must hold lowercase words.
pub fn lookup_ignore_ascii_case<T: Copy>(table: &[(&str, T)], word: &str) -> Option<T> {
    const MAX_KEYWORD_LEN: usize = 32;
    if word.len() > MAX_KEYWORD_LEN || !word.is_ascii() {
        return None;
    }
    let mut buf = [0u8; MAX_KEYWORD_LEN];
    let lowered = &mut buf[..word.len()];
    lowered.copy_from_slice(word.as_bytes());
    lowered.make_ascii_lowercase();
    let lowered = std::str::from_utf8(lowered).ok()?;
    lookup(table, lowered)
}

/// `true` if `table` is strictly sorted, which [`lookup`] relies on.
pub fn is_sorted<T>(table: &[(&str, T)]) -> bool {
    table.windows(2).all(|pair| pair[0].0 < pair[1].0)
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: &[(&str, u8)] = &[("case", 1), ("else", 2), ("if", 3), ("while", 4)];

    #[test]
    fn exact_lookup() {
        assert!(is_sorted(TABLE));
        assert_eq!(lookup(TABLE, "if"), Some(3));
        assert_eq!(lookup(TABLE, "IF"), None);
        assert_eq!(lookup(TABLE, "iff"), None);
    }

    #[test]
    fn case_insensitive_lookup() {
        assert_eq!(lookup_ignore_ascii_case(TABLE, "WHILE"), Some(4));
        assert_eq!(lookup_ignore_ascii_case(TABLE, "Else"), Some(2));
        assert_eq!(lookup_ignore_ascii_case(TABLE, "ÉLSE"), None);
    }

    #[test]
    fn unsorted_tables_are_detected() {
        assert!(!is_sorted(&[("b", ()), ("a", ())]));
    }
}
