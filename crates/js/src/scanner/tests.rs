use super::JsScanner;
use crate::config::Dialect;
use crate::lexer::{JsConstruct, JsLexState, JsxMode};
use core_types::{Quote, Scanner, TokenKind};

fn scan(dialect: Dialect, line: &str, state: &mut JsLexState) -> Vec<(TokenKind, String)> {
    JsScanner::new(dialect)
        .scan_line(line, state)
        .into_iter()
        .map(|t| (t.kind, t.text(line).to_string()))
        .collect()
}

fn kinds(dialect: Dialect, line: &str) -> Vec<TokenKind> {
    let mut state = JsLexState::default();
    scan(dialect, line, &mut state)
        .into_iter()
        .map(|(kind, _)| kind)
        .collect()
}

#[test]
fn statement_with_structural_keywords() {
    use TokenKind::*;
    assert_eq!(
        kinds(Dialect::Plain, "if (a === b) { x += 1; } else return;"),
        vec![
            If, LeftParen, Identifier, Operator, Identifier, RightParen, LeftBrace, Identifier,
            Assign, Number, Semicolon, RightBrace, Else, Return, Semicolon,
        ]
    );
}

#[test]
fn slash_after_operand_divides() {
    use TokenKind::*;
    assert_eq!(
        kinds(Dialect::Plain, "a = b / c / d;"),
        vec![Identifier, Assign, Identifier, Operator, Identifier, Operator, Identifier, Semicolon]
    );
    let mut state = JsLexState::default();
    let toks = scan(Dialect::Plain, "x = /ab+[/]c/gi.test(s)", &mut state);
    assert_eq!(toks[2], (RegExp, "/ab+[/]c/gi".to_string()));
    assert_eq!(toks[3].0, Dot);
}

#[test]
fn keywords_after_a_dot_are_names() {
    use TokenKind::*;
    assert_eq!(
        kinds(Dialect::Plain, "p.catch(e)?.finally"),
        vec![Identifier, Dot, Identifier, LeftParen, Identifier, RightParen, Dot, Identifier]
    );
}

#[test]
fn numeric_literals() {
    let mut state = JsLexState::default();
    let toks = scan(Dialect::Plain, "0xFF_FFn 1_000.5e-3 .5 0b101 7n", &mut state);
    let texts: Vec<_> = toks.iter().map(|(_, t)| t.as_str()).collect();
    assert_eq!(texts, ["0xFF_FFn", "1_000.5e-3", ".5", "0b101", "7n"]);
    assert!(toks.iter().all(|(k, _)| *k == TokenKind::Number));
}

#[test]
fn arrows_increments_and_spread() {
    use TokenKind::*;
    assert_eq!(
        kinds(Dialect::Plain, "f = (...xs) => i++ ?? y"),
        vec![
            Identifier, Assign, LeftParen, Operator, Identifier, RightParen, Arrow, Identifier,
            Increment, Operator, Identifier,
        ]
    );
}

#[test]
fn template_with_nested_expressions() {
    use TokenKind::*;
    let mut state = JsLexState::default();
    let toks = scan(Dialect::Plain, "s = `a ${b + `c ${d}`} e`;", &mut state);
    let kinds: Vec<_> = toks.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            Identifier,
            Assign,
            TemplateString,
            TemplateExpressionOpen,
            Identifier,
            Operator,
            TemplateString,
            TemplateExpressionOpen,
            Identifier,
            TemplateExpressionClose,
            TemplateString,
            TemplateExpressionClose,
            TemplateString,
            Semicolon,
        ]
    );
    assert_eq!(state, JsLexState::default());
}

#[test]
fn template_spans_lines() {
    let mut state = JsLexState::default();
    scan(Dialect::Plain, "const t = `first", &mut state);
    assert_eq!(state.construct, JsConstruct::Template);
    let toks = scan(Dialect::Plain, "  second ${x} third`;", &mut state);
    assert_eq!(toks[0], (TokenKind::TemplateString, "second ".to_string()));
    assert_eq!(toks.last().map(|t| t.0), Some(TokenKind::Semicolon));
    assert_eq!(state.construct, JsConstruct::Normal);
    assert_eq!(state.template_depth(), 0);
}

#[test]
fn braces_inside_template_expressions_are_counted() {
    let mut state = JsLexState::default();
    let toks = scan(Dialect::Plain, "`${ {a: 1}.a }`", &mut state);
    let closes = toks
        .iter()
        .filter(|(k, _)| *k == TokenKind::TemplateExpressionClose)
        .count();
    assert_eq!(closes, 1);
    assert_eq!(state.construct, JsConstruct::Normal);
}

#[test]
fn unterminated_string_swallows_following_lines() {
    let mut state = JsLexState::default();
    let first = scan(Dialect::Plain, "let s = \"abc", &mut state);
    assert_eq!(first.last().map(|t| t.0), Some(TokenKind::String));
    assert_eq!(state.construct, JsConstruct::String(Quote::Double));
    assert!(state.preserves_indent());

    let second = scan(Dialect::Plain, "{ } ;", &mut state);
    assert_eq!(second, vec![(TokenKind::String, "{ } ;".to_string())]);

    let third = scan(Dialect::Plain, "def\"; {", &mut state);
    assert_eq!(third[0], (TokenKind::String, "def\"".to_string()));
    assert_eq!(third[1].0, TokenKind::Semicolon);
    assert_eq!(third[2].0, TokenKind::LeftBrace);
    assert_eq!(state.construct, JsConstruct::Normal);
}

#[test]
fn block_comment_spans_lines() {
    let mut state = JsLexState::default();
    let first = scan(Dialect::Plain, "x; /* a", &mut state);
    assert_eq!(first.last().map(|t| t.0), Some(TokenKind::Comment));
    assert_eq!(state.construct, JsConstruct::BlockComment);
    let second = scan(Dialect::Plain, "   b */ y", &mut state);
    assert_eq!(second[0], (TokenKind::Comment, "b */".to_string()));
    assert_eq!(second[1].0, TokenKind::Identifier);
}

#[test]
fn line_comment_keeps_regexp_flag() {
    let mut state = JsLexState::default();
    scan(Dialect::Plain, "x = // value follows", &mut state);
    assert!(state.regexp_allowed);
    let toks = scan(Dialect::Plain, "/re/", &mut state);
    assert_eq!(toks[0].0, TokenKind::RegExp);
}

#[test]
fn element_with_attributes_and_children() {
    use TokenKind::*;
    let mut state = JsLexState::default();
    let toks = scan(
        Dialect::Jsx,
        "const a = <div className=\"x\" on={f}>Hi {name}</div>;",
        &mut state,
    );
    let kinds: Vec<_> = toks.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            Var, Identifier, Assign, TagOpen, TagName, AttributeName, Assign, AttributeValue,
            AttributeName, Assign, LeftBrace, Identifier, RightBrace, TagClose, Text, LeftBrace,
            Identifier, RightBrace, EndTagOpen, TagName, TagClose, Semicolon,
        ]
    );
    assert_eq!(toks[14], (Text, "Hi".to_string()));
    assert_eq!(state.markup_depth(), 0);
}

#[test]
fn element_children_span_lines() {
    let mut state = JsLexState::default();
    scan(Dialect::Jsx, "return (<ul>", &mut state);
    assert_eq!(state.markup_mode(), Some(JsxMode::Children));
    let item = scan(Dialect::Jsx, "  <li>one two</li>", &mut state);
    assert_eq!(item[0].0, TokenKind::TagOpen);
    assert_eq!(item[3], (TokenKind::Text, "one two".to_string()));
    assert_eq!(state.markup_depth(), 1);
    let close = scan(Dialect::Jsx, "</ul>);", &mut state);
    assert_eq!(close[0].0, TokenKind::EndTagOpen);
    assert_eq!(close.last().map(|t| t.0), Some(TokenKind::Semicolon));
    assert_eq!(state.markup_depth(), 0);
}

#[test]
fn fragments_and_self_closing_tags() {
    use TokenKind::*;
    assert_eq!(
        kinds(Dialect::Jsx, "x = <><br/></>"),
        vec![
            Identifier, Assign, TagOpen, TagClose, TagOpen, TagName, SelfClosingTagClose,
            EndTagOpen, TagClose,
        ]
    );
}

#[test]
fn multi_line_attribute_value() {
    let mut state = JsLexState::default();
    scan(Dialect::Jsx, "x = <a title=\"one", &mut state);
    assert_eq!(
        state.markup_mode(),
        Some(JsxMode::AttributeValue(Quote::Double))
    );
    assert!(state.preserves_indent());
    let rest = scan(Dialect::Jsx, "two\">", &mut state);
    assert_eq!(rest[0], (TokenKind::AttributeValue, "two\"".to_string()));
    assert_eq!(rest[1].0, TokenKind::TagClose);
}

#[test]
fn less_than_between_operands_is_a_comparison() {
    use TokenKind::*;
    assert_eq!(
        kinds(Dialect::Jsx, "if (a < b) {}"),
        vec![If, LeftParen, Identifier, Operator, Identifier, RightParen, LeftBrace, RightBrace]
    );
    assert_eq!(
        kinds(Dialect::Plain, "x = <div>"),
        vec![Identifier, Assign, Operator, Identifier, Operator]
    );
}

#[test]
fn typed_dialect_recognizes_generics() {
    use TokenKind::*;
    assert_eq!(
        kinds(Dialect::Tsx, "const [n] = useState<number>(0);"),
        vec![
            Var, LeftBracket, Identifier, RightBracket, Assign, Identifier, GenericOpen,
            Identifier, GenericClose, LeftParen, Number, RightParen, Semicolon,
        ]
    );
    assert_eq!(
        kinds(Dialect::Tsx, "m: Map<string, Array<number>>"),
        vec![
            Identifier, Colon, Identifier, GenericOpen, Identifier, Comma, Identifier,
            GenericOpen, Identifier, GenericClose, GenericClose,
        ]
    );
    assert_eq!(kinds(Dialect::Tsx, "f = <T,>(x: T) => x")[2], GenericOpen);
    assert_eq!(kinds(Dialect::Tsx, "f = <T extends U>(x: T) => x")[2], GenericOpen);
}

#[test]
fn typed_dialect_still_sees_comparisons_and_elements() {
    use TokenKind::*;
    assert_eq!(
        kinds(Dialect::Tsx, "for (; i<arr.length;) {}")[4],
        Operator
    );
    assert_eq!(kinds(Dialect::Tsx, "x = <Foo bar />")[2], TagOpen);
    assert_eq!(kinds(Dialect::Tsx, "interface P {}")[0], Keyword);
    assert_eq!(kinds(Dialect::Jsx, "interface P {}")[0], Identifier);
}

#[test]
fn template_inside_element_expression() {
    let mut state = JsLexState::default();
    let toks = scan(Dialect::Jsx, "x = <a href={`/${id}`}>go</a>;", &mut state);
    assert_eq!(toks.last().map(|t| t.0), Some(TokenKind::Semicolon));
    assert_eq!(state.markup_depth(), 0);
    assert_eq!(state.template_depth(), 0);
}

#[test]
fn tokens_are_ordered_and_inside_the_line() {
    let lines = [
        "const a = <div>{`x ${y}`}</div>; // done",
        "x = /[/]/.test(\"a\\\"b\") ? 1e3 : 0x1;",
        "f<T>(a) < b >> c >>> d",
        "é = 'ü' + `ö`;",
    ];
    for dialect in [Dialect::Plain, Dialect::Jsx, Dialect::Tsx] {
        for line in lines {
            let mut state = JsLexState::default();
            let toks = JsScanner::new(dialect).scan_line(line, &mut state);
            let mut last_end = 0;
            for t in toks {
                assert!(t.offset >= last_end, "{dialect:?} {line:?}: {t:?}");
                assert!(t.end() <= line.len());
                assert!(line.is_char_boundary(t.offset) && line.is_char_boundary(t.end()));
                last_end = t.end();
            }
        }
    }
}
