use polyindent::{Document, DocumentLanguage, Indenter, Language, TextLines};
use std::env;
use test_support::perf;

struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n.max(1) as u64) as usize
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn all_indents(indenter: &mut Indenter, doc: &Document) -> Vec<i32> {
    (0..doc.line_count())
        .map(|line| indenter.indent_for(doc, line).unwrap())
        .collect()
}

fn fresh_indents(language: DocumentLanguage, doc: &Document) -> Vec<i32> {
    all_indents(&mut Indenter::new(language), doc)
}

// Applies one random line edit using lines taken from `pool`.
fn random_edit(rng: &mut XorShift, doc: &mut Document, pool: &[&str]) {
    let line = rng.below(doc.line_count());
    let text = pool[rng.below(pool.len())];
    match rng.below(4) {
        0 if doc.line_count() > 1 => doc.remove_line(line).unwrap(),
        1 => {
            doc.insert_line(line, text).unwrap();
        }
        _ => doc.set_line(line, text).unwrap(),
    }
}

fn check_edits_match_full_recompute(language: DocumentLanguage, source: &str, seed: u64) {
    let pool: Vec<&str> = source.lines().collect();
    let mut doc = Document::from_text(source);
    let mut indenter = Indenter::new(language);
    let mut rng = XorShift(seed);
    let edits = env_u64("POLYINDENT_EDIT_RUNS", 40);
    for step in 0..edits {
        random_edit(&mut rng, &mut doc, &pool);
        if step % 8 == 0 {
            indenter.prune(&doc);
        }
        let incremental = all_indents(&mut indenter, &doc);
        let full = fresh_indents(language, &doc);
        assert_eq!(
            incremental, full,
            "{language} diverged after edit {step} (seed {seed:#x})\n{}",
            doc.text()
        );
    }
}

#[test]
fn random_edits_match_full_recompute() {
    let seed = env_u64("POLYINDENT_EDIT_SEED", 0xC0FFEE);
    let cases = [
        (DocumentLanguage::Php, perf::mixed_document(3)),
        (DocumentLanguage::Html, perf::markup_document(4)),
        (DocumentLanguage::Js, perf::script_document(4)),
        (DocumentLanguage::Css, perf::style_document(4)),
    ];
    for (language, source) in cases {
        check_edits_match_full_recompute(language, &source, seed);
    }
}

#[test]
fn editing_one_line_recomputes_only_that_line() {
    let source = perf::mixed_document(4);
    let mut doc = Document::from_text(&source);
    let mut indenter = Indenter::new(DocumentLanguage::Php);
    let last = doc.line_count() - 1;
    indenter.indent_for(&doc, last).unwrap();
    indenter.reset_stats();

    let line = doc
        .lines()
        .position(|l| l == "color: red;")
        .expect("style rule in the mixed document");
    doc.set_line(line, "color: blue;").unwrap();
    assert!(!indenter.update_line_state_change(&doc, line).unwrap());
    indenter.indent_for(&doc, last).unwrap();

    let stats = indenter.stats();
    assert_eq!(stats.lines_recomputed, 1);
    assert_eq!(stats.invalidations, 0);
}

#[test]
fn opening_a_block_reindents_the_lines_below() {
    let mut doc = Document::from_text("<script>\nvar a = 1;\nb();\nc();\n</script>");
    let mut indenter = Indenter::new(DocumentLanguage::Html);
    assert_eq!(all_indents(&mut indenter, &doc), vec![0, 4, 4, 4, 0]);
    indenter.reset_stats();

    doc.set_line(1, "if (a) {").unwrap();
    assert!(indenter.update_line_state_change(&doc, 1).unwrap());
    assert_eq!(all_indents(&mut indenter, &doc), vec![0, 4, 8, 8, 0]);
    // The edited line plus the three below it whose begin state moved.
    assert_eq!(indenter.stats().lines_recomputed, 4);
}

#[test]
fn removed_lines_are_pruned() {
    let mut doc = Document::from_text(&perf::markup_document(2));
    let mut indenter = Indenter::new(DocumentLanguage::Html);
    let last = doc.line_count() - 1;
    indenter.indent_for(&doc, last).unwrap();
    let before = indenter.cached_lines();
    doc.remove_line(2).unwrap();
    doc.remove_line(2).unwrap();
    assert_eq!(indenter.prune(&doc), 2);
    assert_eq!(indenter.cached_lines(), before - 2);
}

#[test]
fn tokens_follow_the_language_of_their_region() {
    let doc = Document::from_text(&perf::mixed_document(1));
    let mut indenter = Indenter::new(DocumentLanguage::Php);
    let language_of_line = |indenter: &mut Indenter, needle: &str| {
        let line = doc.lines().position(|l| l.starts_with(needle)).unwrap();
        let tokens = indenter.tokens_for(&doc, line).unwrap();
        tokens.first().map(|t| t.language)
    };
    assert_eq!(language_of_line(&mut indenter, ".box"), Some(Language::Style));
    assert_eq!(language_of_line(&mut indenter, "function f"), Some(Language::Script));
    assert_eq!(language_of_line(&mut indenter, "<tr>"), Some(Language::Markup));
    assert_eq!(
        language_of_line(&mut indenter, "<?php foreach"),
        Some(Language::ServerScript)
    );
}

#[test]
fn new_line_indent_inside_nested_regions() {
    let doc = Document::from_text("<div>\n<script>\nfunction f() {");
    let mut indenter = Indenter::new(DocumentLanguage::Html);
    assert_eq!(indenter.indent_for_new_line_after(&doc, 2).unwrap(), 12);
    assert_eq!(indenter.indent_for_new_line_after(&doc, 0).unwrap(), 4);
}

// Tokens of line `n` come from line `n - 1`'s lexer state alone, so cutting
// the document after `n` must not change them.
#[test]
fn tokens_do_not_depend_on_later_lines() {
    let cases = [
        (DocumentLanguage::Php, perf::mixed_document(2)),
        (DocumentLanguage::Js, perf::script_document(2)),
    ];
    for (language, source) in cases {
        let doc = Document::from_text(&source);
        let mut indenter = Indenter::new(language);
        let lines: Vec<&str> = doc.lines().collect();
        for n in 0..lines.len() {
            let whole = indenter.tokens_for(&doc, n).unwrap();
            let prefix = Document::from_text(&lines[..=n].join("\n"));
            let truncated = Indenter::new(language).tokens_for(&prefix, n).unwrap();
            assert_eq!(whole, truncated, "{language} line {n}: {:?}", lines[n]);
        }
    }
}
