#![no_main]

use core_types::{Scanner, Token};
use css::{CssLexState, CssScanner};
use html::{HtmlLexState, HtmlScanner};
use js::{Dialect, JsLexState, JsScanner};
use libfuzzer_sys::fuzz_target;
use php::{PhpLexState, PhpScanner};

fn check(line: &str, tokens: &[Token]) {
    let mut last_end = 0;
    for t in tokens {
        assert!(t.offset >= last_end, "{line:?}: {t:?}");
        assert!(t.end() <= line.len(), "{line:?}: {t:?}");
        assert!(line.is_char_boundary(t.offset) && line.is_char_boundary(t.end()));
        last_end = t.end();
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let html = HtmlScanner::new();
    let css = CssScanner::new();
    let js = [Dialect::Plain, Dialect::Jsx, Dialect::Tsx].map(JsScanner::new);
    let php = PhpScanner::new();

    let mut html_state = HtmlLexState::default();
    let mut css_state = CssLexState::default();
    let mut js_states = [JsLexState::default(); 3];
    let mut php_state = PhpLexState::default();
    for line in text.split('\n') {
        check(line, &html.scan_line(line, &mut html_state));
        check(line, &css.scan_line(line, &mut css_state));
        for (scanner, state) in js.iter().zip(js_states.iter_mut()) {
            check(line, &scanner.scan_line(line, state));
        }
        check(line, &php.scan_line(line, &mut php_state));
    }
});
