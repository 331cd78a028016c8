#![no_main]

use libfuzzer_sys::fuzz_target;
use polyindent::{Document, DocumentLanguage, Indenter, TextLines};

fn indents(indenter: &mut Indenter, doc: &Document) -> Vec<i32> {
    (0..doc.line_count())
        .filter_map(|line| indenter.indent_for(doc, line).ok())
        .collect()
}

// The first byte picks the language and the edited line; the rest is split
// in two halves: the initial text and the replacement for that line.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let language = DocumentLanguage::ALL[selector as usize % DocumentLanguage::ALL.len()];
    let split = text
        .char_indices()
        .map(|(i, _)| i)
        .nth(text.chars().count() / 2)
        .unwrap_or(text.len());
    let (initial, replacement) = text.split_at(split);

    let mut doc = Document::from_text(initial);
    let mut indenter = Indenter::new(language);
    let _ = indents(&mut indenter, &doc);

    let line = selector as usize % doc.line_count();
    let replacement = replacement.split('\n').next().unwrap_or_default();
    if doc.set_line(line, replacement).is_err() {
        return;
    }
    let _ = indenter.update_line_state_change(&doc, line);
    let incremental = indents(&mut indenter, &doc);
    let full = indents(&mut Indenter::new(language), &doc);
    assert_eq!(incremental, full);
});
