//! Reserved words. The flag marks words that complete an operand, after which
//! a `/` divides.

use core_types::TokenKind;

pub(crate) type Keyword = (TokenKind, bool);

const fn kw(kind: TokenKind) -> Keyword {
    (kind, false)
}

const VALUE: Keyword = (TokenKind::Keyword, true);
const OTHER: Keyword = (TokenKind::Keyword, false);

pub(crate) static KEYWORDS: &[(&str, Keyword)] = &[
    ("async", OTHER),
    ("await", OTHER),
    ("break", kw(TokenKind::Break)),
    ("case", kw(TokenKind::Case)),
    ("catch", kw(TokenKind::Catch)),
    ("class", kw(TokenKind::Class)),
    ("const", kw(TokenKind::Var)),
    ("continue", kw(TokenKind::Continue)),
    ("debugger", OTHER),
    ("default", kw(TokenKind::Default)),
    ("delete", OTHER),
    ("do", kw(TokenKind::Do)),
    ("else", kw(TokenKind::Else)),
    ("enum", OTHER),
    ("export", OTHER),
    ("extends", OTHER),
    ("false", VALUE),
    ("finally", kw(TokenKind::Finally)),
    ("for", kw(TokenKind::For)),
    ("function", kw(TokenKind::Function)),
    ("if", kw(TokenKind::If)),
    ("import", OTHER),
    ("in", OTHER),
    ("instanceof", OTHER),
    ("let", kw(TokenKind::Var)),
    ("new", OTHER),
    ("null", VALUE),
    ("of", OTHER),
    ("return", kw(TokenKind::Return)),
    ("static", OTHER),
    ("super", VALUE),
    ("switch", kw(TokenKind::Switch)),
    ("this", VALUE),
    ("throw", kw(TokenKind::Throw)),
    ("true", VALUE),
    ("try", kw(TokenKind::Try)),
    ("typeof", OTHER),
    ("var", kw(TokenKind::Var)),
    ("void", OTHER),
    ("while", kw(TokenKind::While)),
    ("with", OTHER),
    ("yield", OTHER),
];

/// Extra words of the typed dialect.
pub(crate) static TYPE_KEYWORDS: &[(&str, Keyword)] = &[
    ("abstract", OTHER),
    ("as", OTHER),
    ("declare", OTHER),
    ("implements", OTHER),
    ("interface", OTHER),
    ("keyof", OTHER),
    ("namespace", OTHER),
    ("private", OTHER),
    ("protected", OTHER),
    ("public", OTHER),
    ("readonly", OTHER),
    ("satisfies", OTHER),
    ("type", OTHER),
];

pub(crate) fn lookup(word: &str, typed: bool) -> Option<Keyword> {
    tools::keywords::lookup(KEYWORDS, word).or_else(|| {
        if typed {
            tools::keywords::lookup(TYPE_KEYWORDS, word)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_sorted() {
        assert!(tools::keywords::is_sorted(KEYWORDS));
        assert!(tools::keywords::is_sorted(TYPE_KEYWORDS));
    }

    #[test]
    fn structural_words_map_to_their_kinds() {
        assert_eq!(lookup("if", false), Some((TokenKind::If, false)));
        assert_eq!(lookup("const", false), Some((TokenKind::Var, false)));
        assert_eq!(lookup("this", false), Some((TokenKind::Keyword, true)));
        assert_eq!(lookup("interface", false), None);
        assert_eq!(lookup("interface", true), Some((TokenKind::Keyword, false)));
        assert_eq!(lookup("If", true), None);
    }
}
