use crate::error::Error;
use crate::language::DocumentLanguage;
use core_types::{IndentConfig, Token};
use css::CssFormatter;
use html::{HtmlConfig, HtmlFormatter};
use indent::{DriverStats, IndentDriver, LineEdit};
use js::{Dialect, JsConfig, JsFormatter};
use php::PhpFormatter;
use std::ops::Range;
use text_buffer::{Document, TextLines};

/// Settings an [`Indenter`] is built from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub indent: IndentConfig,
    pub html: HtmlConfig,
}

impl Options {
    pub fn with_indent(indent: IndentConfig) -> Self {
        Self {
            indent,
            ..Self::default()
        }
    }
}

enum Driver {
    Markup(IndentDriver<HtmlFormatter>),
    Style(IndentDriver<CssFormatter>),
    Script(IndentDriver<JsFormatter>),
    ServerScript(IndentDriver<PhpFormatter>),
}

macro_rules! with_driver {
    ($driver:expr, $d:ident => $body:expr) => {
        match $driver {
            Driver::Markup($d) => $body,
            Driver::Style($d) => $body,
            Driver::Script($d) => $body,
            Driver::ServerScript($d) => $body,
        }
    };
}

impl Driver {
    fn build(language: DocumentLanguage, options: Options) -> Self {
        let indent = options.indent;
        let script = |dialect| {
            let js = JsConfig::with_dialect(dialect);
            Driver::Script(IndentDriver::new(JsFormatter::new(indent, js)))
        };
        match language {
            DocumentLanguage::Html | DocumentLanguage::Php => {
                Driver::Markup(IndentDriver::new(HtmlFormatter::new(indent, options.html)))
            }
            DocumentLanguage::PhpScript => {
                Driver::ServerScript(IndentDriver::new(PhpFormatter::new(indent)))
            }
            DocumentLanguage::Css => Driver::Style(IndentDriver::new(CssFormatter::new(indent))),
            DocumentLanguage::Js => script(Dialect::Plain),
            DocumentLanguage::Jsx => script(Dialect::Jsx),
            DocumentLanguage::Tsx => script(Dialect::Tsx),
        }
    }
}

/// Incremental indenter for one document.
///
/// Holds the formatter for the document's language and the per-line cache.
/// The document itself stays with the caller and is passed to every query;
/// after an edit, queries pick up changed lines through their revisions.
///
/// ```
/// use polyindent::{DocumentLanguage, Indenter};
/// use polyindent::Document;
///
/// let doc = Document::from_text("<ul>\n<li>a</li>\n</ul>");
/// let mut indenter = Indenter::new(DocumentLanguage::Html);
/// assert_eq!(indenter.indent_for(&doc, 1).unwrap(), 4);
/// ```
pub struct Indenter {
    language: DocumentLanguage,
    options: Options,
    driver: Driver,
}

impl Indenter {
    pub fn new(language: DocumentLanguage) -> Self {
        Self::with_options(language, Options::default())
    }

    pub fn with_options(language: DocumentLanguage, options: Options) -> Self {
        log::debug!(target: "polyindent", "{language} indenter, {:?}", options.indent);
        Self {
            language,
            options,
            driver: Driver::build(language, options),
        }
    }

    pub fn language(&self) -> DocumentLanguage {
        self.language
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Applies new settings; every cached line is recomputed on the next query.
    pub fn set_options(&mut self, options: Options) {
        if options == self.options {
            return;
        }
        self.options = options;
        let indent = options.indent;
        match &mut self.driver {
            Driver::Markup(d) => d.set_formatter(HtmlFormatter::new(indent, options.html)),
            Driver::Style(d) => d.set_formatter(CssFormatter::new(indent)),
            Driver::Script(d) => {
                let dialect = match self.language {
                    DocumentLanguage::Jsx => Dialect::Jsx,
                    DocumentLanguage::Tsx => Dialect::Tsx,
                    _ => Dialect::Plain,
                };
                d.set_formatter(JsFormatter::new(indent, JsConfig::with_dialect(dialect)));
            }
            Driver::ServerScript(d) => d.set_formatter(PhpFormatter::new(indent)),
        }
    }

    pub fn indent_for(&mut self, doc: &impl TextLines, line: usize) -> Result<i32, Error> {
        Ok(with_driver!(&mut self.driver, d => d.indent_for(doc, line))?)
    }

    pub fn indent_for_new_line_after(
        &mut self,
        doc: &impl TextLines,
        line: usize,
    ) -> Result<i32, Error> {
        Ok(with_driver!(&mut self.driver, d => d.indent_for_new_line_after(doc, line))?)
    }

    pub fn tokens_for(&mut self, doc: &impl TextLines, line: usize) -> Result<Vec<Token>, Error> {
        Ok(with_driver!(&mut self.driver, d => d.tokens_for(doc, line))?)
    }

    pub fn update_state_until(&mut self, doc: &impl TextLines, line: usize) -> Result<(), Error> {
        Ok(with_driver!(&mut self.driver, d => d.update_state_until(doc, line))?)
    }

    /// See [`IndentDriver::update_line_state_change`].
    pub fn update_line_state_change(
        &mut self,
        doc: &impl TextLines,
        line: usize,
    ) -> Result<bool, Error> {
        Ok(with_driver!(&mut self.driver, d => d.update_line_state_change(doc, line))?)
    }

    pub fn reindent_lines(
        &mut self,
        doc: &impl TextLines,
        lines: Range<usize>,
    ) -> Result<Vec<LineEdit>, Error> {
        Ok(with_driver!(&mut self.driver, d => d.reindent_lines(doc, lines))?)
    }

    /// Reindents `lines` of `doc` in place; returns how many lines changed.
    pub fn reindent_range(
        &mut self,
        doc: &mut Document,
        lines: Range<usize>,
    ) -> Result<usize, Error> {
        let edits = self.reindent_lines(doc, lines)?;
        apply_edits(doc, &edits)?;
        Ok(edits.len())
    }

    pub fn prune(&mut self, doc: &impl TextLines) -> usize {
        with_driver!(&mut self.driver, d => d.prune(doc))
    }

    pub fn invalidate_all(&mut self) {
        with_driver!(&mut self.driver, d => d.invalidate_all())
    }

    pub fn stats(&self) -> DriverStats {
        with_driver!(&self.driver, d => d.stats())
    }

    pub fn reset_stats(&mut self) {
        with_driver!(&mut self.driver, d => d.reset_stats())
    }

    pub fn cached_lines(&self) -> usize {
        with_driver!(&self.driver, d => d.cached_lines())
    }
}

pub fn apply_edits(doc: &mut Document, edits: &[LineEdit]) -> Result<(), Error> {
    for edit in edits {
        doc.set_line(edit.line, &edit.text)?;
    }
    Ok(())
}

/// Reindents every line of `text`.
pub fn reindent_text(
    language: DocumentLanguage,
    options: Options,
    text: &str,
) -> Result<String, Error> {
    let mut doc = Document::from_text(text);
    let mut indenter = Indenter::with_options(language, options);
    let count = doc.line_count();
    indenter.reindent_range(&mut doc, 0..count)?;
    Ok(doc.text())
}

#[cfg(test)]
mod tests {
    use super::{Indenter, Options, reindent_text};
    use crate::DocumentLanguage;
    use core_types::IndentConfig;
    use text_buffer::Document;

    #[test]
    fn every_language_gets_a_driver() {
        let doc = Document::from_text("a\nb");
        for language in DocumentLanguage::ALL {
            let mut indenter = Indenter::new(language);
            indenter.indent_for(&doc, 1).unwrap();
            assert_eq!(indenter.cached_lines(), 2, "{language}");
        }
    }

    #[test]
    fn options_change_recomputes() {
        let doc = Document::from_text("a {\ncolor: red;\n}");
        let mut indenter = Indenter::new(DocumentLanguage::Css);
        assert_eq!(indenter.indent_for(&doc, 1).unwrap(), 4);
        indenter.set_options(Options::with_indent(IndentConfig::with_indent_size(2)));
        assert_eq!(indenter.indent_for(&doc, 1).unwrap(), 2);
        assert_eq!(indenter.options().indent.indent_size, 2);
    }

    #[test]
    fn out_of_range_is_reported() {
        let doc = Document::from_text("x");
        let mut indenter = Indenter::new(DocumentLanguage::Js);
        let err = indenter.indent_for(&doc, 3).unwrap_err();
        assert_eq!(err.to_string(), "line 3 out of range (document has 1 lines)");
    }

    #[test]
    fn whole_text() {
        let out = reindent_text(
            DocumentLanguage::Js,
            Options::default(),
            "if (a) {\n  b();\n}\n",
        )
        .unwrap();
        assert_eq!(out, "if (a) {\n    b();\n}\n");
    }
}
