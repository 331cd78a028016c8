//! Reserved words, matched case-insensitively.

use core_types::TokenKind;

pub(crate) static KEYWORDS: &[(&str, TokenKind)] = &[
    ("abstract", TokenKind::Keyword),
    ("and", TokenKind::Operator),
    ("array", TokenKind::Keyword),
    ("as", TokenKind::Keyword),
    ("break", TokenKind::Break),
    ("callable", TokenKind::Keyword),
    ("case", TokenKind::Case),
    ("catch", TokenKind::Catch),
    ("class", TokenKind::Class),
    ("clone", TokenKind::Keyword),
    ("const", TokenKind::Var),
    ("continue", TokenKind::Continue),
    ("declare", TokenKind::Keyword),
    ("default", TokenKind::Default),
    ("do", TokenKind::Do),
    ("echo", TokenKind::Keyword),
    ("else", TokenKind::Else),
    ("elseif", TokenKind::ElseIf),
    ("empty", TokenKind::Keyword),
    ("enddeclare", TokenKind::EndKeyword),
    ("endfor", TokenKind::EndKeyword),
    ("endforeach", TokenKind::EndKeyword),
    ("endif", TokenKind::EndKeyword),
    ("endswitch", TokenKind::EndKeyword),
    ("endwhile", TokenKind::EndKeyword),
    ("enum", TokenKind::Class),
    ("extends", TokenKind::Keyword),
    ("false", TokenKind::Keyword),
    ("final", TokenKind::Keyword),
    ("finally", TokenKind::Finally),
    ("fn", TokenKind::Keyword),
    ("for", TokenKind::For),
    ("foreach", TokenKind::Foreach),
    ("function", TokenKind::Function),
    ("global", TokenKind::Var),
    ("goto", TokenKind::Keyword),
    ("if", TokenKind::If),
    ("implements", TokenKind::Keyword),
    ("include", TokenKind::Keyword),
    ("include_once", TokenKind::Keyword),
    ("instanceof", TokenKind::Operator),
    ("insteadof", TokenKind::Keyword),
    ("interface", TokenKind::Class),
    ("isset", TokenKind::Keyword),
    ("list", TokenKind::Keyword),
    ("match", TokenKind::Keyword),
    ("namespace", TokenKind::Keyword),
    ("new", TokenKind::Keyword),
    ("null", TokenKind::Keyword),
    ("or", TokenKind::Operator),
    ("print", TokenKind::Keyword),
    ("private", TokenKind::Keyword),
    ("protected", TokenKind::Keyword),
    ("public", TokenKind::Keyword),
    ("readonly", TokenKind::Keyword),
    ("require", TokenKind::Keyword),
    ("require_once", TokenKind::Keyword),
    ("return", TokenKind::Return),
    ("static", TokenKind::Keyword),
    ("switch", TokenKind::Switch),
    ("throw", TokenKind::Throw),
    ("trait", TokenKind::Class),
    ("true", TokenKind::Keyword),
    ("try", TokenKind::Try),
    ("unset", TokenKind::Keyword),
    ("use", TokenKind::Keyword),
    ("var", TokenKind::Var),
    ("while", TokenKind::While),
    ("xor", TokenKind::Operator),
    ("yield", TokenKind::Keyword),
];

pub(crate) fn lookup(word: &str) -> Option<TokenKind> {
    tools::keywords::lookup_ignore_ascii_case(KEYWORDS, word)
}
