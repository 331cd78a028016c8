use super::PhpScanner;
use crate::lexer::{PhpConstruct, PhpLexState};
use core_types::{Language, Quote, Scanner, TokenKind};

fn scan(scanner: PhpScanner, line: &str, state: &mut PhpLexState) -> Vec<(TokenKind, String)> {
    scanner
        .scan_line(line, state)
        .into_iter()
        .map(|t| (t.kind, t.text(line).to_string()))
        .collect()
}

fn kinds(line: &str) -> Vec<TokenKind> {
    let mut state = PhpLexState::in_code();
    scan(PhpScanner::new(), line, &mut state)
        .into_iter()
        .map(|(kind, _)| kind)
        .collect()
}

#[test]
fn control_keywords_ignore_case() {
    use TokenKind::*;
    assert_eq!(
        kinds("IF ($a) { Echo $b; } ElseIf ($c): endif;"),
        vec![
            If, LeftParen, Variable, RightParen, LeftBrace, Keyword, Variable, Semicolon,
            RightBrace, ElseIf, LeftParen, Variable, RightParen, Colon, EndKeyword, Semicolon,
        ]
    );
}

#[test]
fn members_and_namespaces_are_names() {
    use TokenKind::*;
    assert_eq!(
        kinds("$this->class = \\Foo\\Bar::new(...$xs);"),
        vec![
            Variable, Dot, Identifier, Assign, Identifier, Dot, Identifier, LeftParen, Operator,
            Variable, RightParen, Semicolon,
        ]
    );
}

#[test]
fn arrows_and_comparison_operators() {
    use TokenKind::*;
    assert_eq!(
        kinds("$m = ['a' => $x <=> $y, $i++];"),
        vec![
            Variable, Assign, LeftBracket, String, Arrow, Variable, Operator, Variable, Comma,
            Variable, Increment, RightBracket, Semicolon,
        ]
    );
}

#[test]
fn double_quoted_strings_interpolate_variables() {
    let mut state = PhpLexState::in_code();
    let toks = scan(PhpScanner::new(), "echo \"Hi $name, \\$no\";", &mut state);
    assert_eq!(
        toks,
        vec![
            (TokenKind::Keyword, "echo".to_string()),
            (TokenKind::String, "\"Hi ".to_string()),
            (TokenKind::Variable, "$name".to_string()),
            (TokenKind::String, ", \\$no\"".to_string()),
            (TokenKind::Semicolon, ";".to_string()),
        ]
    );
}

#[test]
fn single_quoted_string_spans_lines() {
    let mut state = PhpLexState::in_code();
    scan(PhpScanner::new(), "$s = 'one $x", &mut state);
    assert_eq!(state.construct, PhpConstruct::String(Quote::Single));
    assert!(state.preserves_indent());
    let toks = scan(PhpScanner::new(), "  two'; {", &mut state);
    assert_eq!(toks[0], (TokenKind::String, "two'".to_string()));
    assert_eq!(toks[2].0, TokenKind::LeftBrace);
    assert_eq!(state.construct, PhpConstruct::Normal);
}

#[test]
fn heredoc_tag_travels_with_the_state() {
    let scanner = PhpScanner::new();
    let mut state = PhpLexState::in_code();
    let start = scan(scanner, "$q = <<<SQL", &mut state);
    assert_eq!(start.last().map(|t| t.0), Some(TokenKind::HeredocStart));
    assert_eq!(state.heredoc_tag.as_deref(), Some("SQL"));

    let body = scan(scanner, "  SELECT $col FROM t; SQLX", &mut state);
    assert!(body.iter().any(|t| t.0 == TokenKind::Variable));
    assert!(body.iter().all(|t| t.0 != TokenKind::Semicolon));

    let end = scan(scanner, "  SQL;", &mut state);
    assert_eq!(end[0], (TokenKind::HeredocEnd, "SQL".to_string()));
    assert_eq!(end[1].0, TokenKind::Semicolon);
    assert_eq!(state, PhpLexState::in_code());
}

#[test]
fn nowdoc_does_not_interpolate() {
    let scanner = PhpScanner::new();
    let mut state = PhpLexState::in_code();
    scan(scanner, "$t = <<<'EOT'", &mut state);
    assert_eq!(state.construct, PhpConstruct::Heredoc { nowdoc: true });
    let body = scan(scanner, "$not_a_var", &mut state);
    assert_eq!(body, vec![(TokenKind::String, "$not_a_var".to_string())]);
}

#[test]
fn comments_and_attributes() {
    use TokenKind::*;
    assert_eq!(kinds("# note"), vec![Comment]);
    assert_eq!(kinds("#[Attr] // trailing"), vec![Delimiter, LeftBracket, Identifier, RightBracket, Comment]);
    let mut state = PhpLexState::in_code();
    scan(PhpScanner::new(), "/* open", &mut state);
    assert_eq!(state.construct, PhpConstruct::BlockComment);
    let rest = scan(PhpScanner::new(), " close */ $x;", &mut state);
    assert_eq!(rest[0], (Comment, "close */".to_string()));
    assert_eq!(rest[1].0, Variable);
}

#[test]
fn standalone_mode_passes_markup_through() {
    let mut state = PhpLexState::default();
    let toks = PhpScanner::new().scan_line("<p>Hi</p> <?php echo 1; ?> tail", &mut state);
    let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Text,
            TokenKind::ServerScriptOpen,
            TokenKind::Keyword,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::ServerScriptClose,
            TokenKind::Text,
        ]
    );
    assert_eq!(toks[0].language, Language::Markup);
    assert_eq!(toks[1].language, Language::ServerScript);
    assert!(!state.in_code);
}

#[test]
fn line_comment_ends_at_close_bracket() {
    let mut state = PhpLexState::default();
    let toks = scan(PhpScanner::new(), "<?php // note ?><b>", &mut state);
    assert_eq!(toks[1], (TokenKind::Comment, "// note ".to_string()));
    assert_eq!(toks[2].0, TokenKind::ServerScriptClose);
    assert_eq!(toks[3], (TokenKind::Text, "<b>".to_string()));
}

#[test]
fn embedded_scanner_stops_after_the_region() {
    let line = "<?= $x ?></p>";
    let mut state = PhpLexState::default();
    let mut out = Vec::new();
    let mut from = 0;
    PhpScanner::embedded().scan(line, &mut from, &mut state, &mut out);
    assert_eq!(from, "<?= $x ?>".len());
    assert_eq!(out.len(), 3);
    assert!(!state.in_code);

    // Outside code and not at an open bracket there is nothing to do.
    let before = from;
    PhpScanner::embedded().scan(line, &mut from, &mut state, &mut out);
    assert_eq!(from, before);
}

#[test]
fn open_bracket_variants() {
    for (line, open) in [("<?php", "<?php"), ("<?PHP echo", "<?PHP"), ("<?=1", "<?="), ("<? x", "<?")] {
        let mut state = PhpLexState::default();
        let toks = scan(PhpScanner::new(), line, &mut state);
        assert_eq!(toks[0], (TokenKind::ServerScriptOpen, open.to_string()), "{line:?}");
        assert!(state.in_code);
    }
}

#[test]
fn tokens_are_ordered_and_inside_the_line() {
    let lines = [
        "<?php $a = \"x {$b['k']} y\"; // c ?> <div>",
        "echo <<<EOT",
        "$x?->y ?? 0x1F + 1_000.5e-3 . 'é';",
        "?>é<?= ü ?>",
    ];
    for line in lines {
        for mut state in [PhpLexState::default(), PhpLexState::in_code()] {
            let toks = PhpScanner::new().scan_line(line, &mut state);
            let mut last_end = 0;
            for t in toks {
                assert!(t.offset >= last_end, "{line:?}: {t:?}");
                assert!(t.end() <= line.len());
                assert!(line.is_char_boundary(t.offset) && line.is_char_boundary(t.end()));
                last_end = t.end();
            }
        }
    }
}
