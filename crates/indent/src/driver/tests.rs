use super::{IndentDriver, LineEdit};
use crate::IndentError;
use core_types::{IndentConfig, LineFormatter, TokenKind};
use js::{JsConfig, JsFormatter};
use text_buffer::{Document, TextLines};

const SOURCE: &str = "function f() {\nvar a = 1;\nvar b = 2;\nreturn a;\n}";

fn driver() -> IndentDriver<JsFormatter> {
    IndentDriver::new(JsFormatter::new(IndentConfig::default(), JsConfig::default()))
}

fn all_indents(driver: &mut IndentDriver<JsFormatter>, doc: &Document) -> Vec<i32> {
    (0..doc.line_count())
        .map(|line| driver.indent_for(doc, line).unwrap())
        .collect()
}

// Formats every line from scratch, without a cache.
fn full_recompute(doc: &Document) -> Vec<i32> {
    let mut f = JsFormatter::default();
    let mut state = f.initial_state();
    let mut out = Vec::new();
    for line in doc.lines() {
        let outcome = f.format_line(line, &state);
        out.push(outcome.line_indent);
        state = outcome.end;
    }
    out
}

#[test]
fn indents_match_a_full_recompute() {
    let doc = Document::from_text(SOURCE);
    let mut d = driver();
    assert_eq!(all_indents(&mut d, &doc), vec![0, 4, 4, 4, 0]);
    assert_eq!(all_indents(&mut d, &doc), full_recompute(&doc));
}

#[test]
fn repeated_queries_hit_the_cache() {
    let doc = Document::from_text(SOURCE);
    let mut d = driver();
    d.indent_for(&doc, 4).unwrap();
    assert_eq!(d.stats().lines_recomputed, 5);
    d.reset_stats();
    d.indent_for(&doc, 4).unwrap();
    assert_eq!(d.stats().lines_recomputed, 0);
    assert_eq!(d.stats().cache_hits, 5);
}

#[test]
fn edit_without_nesting_change_recomputes_one_line() {
    let mut doc = Document::from_text(SOURCE);
    let mut d = driver();
    d.indent_for(&doc, 4).unwrap();
    doc.set_line(2, "var b = 3;").unwrap();
    d.reset_stats();
    assert_eq!(d.indent_for(&doc, 4), Ok(0));
    assert_eq!(d.stats().lines_recomputed, 1);
    assert_eq!(d.stats().invalidations, 0);
}

#[test]
fn nesting_change_flows_to_later_lines() {
    let mut doc = Document::from_text(SOURCE);
    let mut d = driver();
    d.indent_for(&doc, 4).unwrap();
    doc.insert_line(2, "if (a) {").unwrap();
    let indents = all_indents(&mut d, &doc);
    assert_eq!(indents, full_recompute(&doc));
    assert_eq!(indents, vec![0, 4, 4, 8, 8, 4]);
}

#[test]
fn querying_a_line_leaves_later_lines_alone() {
    let doc = Document::from_text(SOURCE);
    let mut d = driver();
    d.indent_for(&doc, 1).unwrap();
    assert_eq!(d.stats().lines_recomputed, 2);
    assert_eq!(d.cached_lines(), 2);
}

#[test]
fn single_line_update_reports_end_state_changes() {
    let mut doc = Document::from_text(SOURCE);
    let mut d = driver();
    d.indent_for(&doc, 4).unwrap();

    doc.set_line(1, "var a = 2;").unwrap();
    assert_eq!(d.update_line_state_change(&doc, 1), Ok(false));

    doc.set_line(1, "var a = [").unwrap();
    d.reset_stats();
    assert_eq!(d.update_line_state_change(&doc, 1), Ok(true));
    assert_eq!(d.stats().lines_recomputed, 1);
    assert_eq!(d.stats().invalidations, 1);
    assert_eq!(all_indents(&mut d, &doc), full_recompute(&doc));
}

#[test]
fn out_of_range_lines_are_errors() {
    let doc = Document::from_text("a\nb");
    let mut d = driver();
    let err = IndentError::LineOutOfRange {
        line: 2,
        line_count: 2,
    };
    assert_eq!(d.indent_for(&doc, 2), Err(err));
    assert_eq!(d.update_line_state_change(&doc, 2), Err(err));
    assert!(d.tokens_for(&doc, 7).is_err());
    assert_eq!(err.to_string(), "line 2 out of range (document has 2 lines)");
}

#[test]
fn new_line_indent_after_an_open_block() {
    let doc = Document::from_text("if (a) {\nb();");
    let mut d = driver();
    assert_eq!(d.indent_for_new_line_after(&doc, 0), Ok(4));
    assert_eq!(d.indent_for_new_line_after(&doc, 1), Ok(4));
}

#[test]
fn tokens_come_from_the_cached_begin_state() {
    let doc = Document::from_text("/* open\nstill */ x;");
    let mut d = driver();
    let tokens = d.tokens_for(&doc, 1).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Semicolon));
    assert!(d.block_data(&doc, 1).unwrap().lexer_state_valid);
}

#[test]
fn reindent_produces_edits_for_misindented_lines() {
    let doc = Document::from_text("function f() {\n  a();\n    b();\n\n}");
    let mut d = driver();
    let edits = d.reindent_lines(&doc, 0..doc.line_count()).unwrap();
    assert_eq!(
        edits,
        vec![LineEdit {
            line: 1,
            text: "    a();".to_string()
        }]
    );
    assert!(d.reindent_lines(&doc, 2..2).unwrap().is_empty());
}

#[test]
fn prune_drops_removed_lines() {
    let mut doc = Document::from_text(SOURCE);
    let mut d = driver();
    d.indent_for(&doc, 4).unwrap();
    doc.remove_line(2).unwrap();
    doc.remove_line(2).unwrap();
    assert_eq!(d.prune(&doc), 2);
    assert_eq!(d.cached_lines(), 3);
    assert_eq!(all_indents(&mut d, &doc), vec![0, 4, 0]);
}

#[test]
fn replacing_the_formatter_drops_the_cache() {
    let doc = Document::from_text(SOURCE);
    let mut d = driver();
    d.indent_for(&doc, 4).unwrap();
    d.set_formatter(JsFormatter::new(
        IndentConfig::with_indent_size(2),
        JsConfig::default(),
    ));
    assert_eq!(d.cached_lines(), 0);
    assert_eq!(all_indents(&mut d, &doc), vec![0, 2, 2, 2, 0]);
}
