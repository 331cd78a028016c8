use core_types::Quote;
use css::CssLexState;
use js::JsLexState;
use php::PhpLexState;

/// Markup construct open at the end of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HtmlConstruct {
    /// Element content.
    #[default]
    Text,
    /// Attributes of a start or end tag, before its `>`.
    Tag,
    AttributeValue(Quote),
    /// Inside `<!-- ... -->`.
    Comment,
    /// Inside `<!DOCTYPE ...>` or another `<!` declaration.
    Declaration,
}

/// Language of a `<script>` or `<style>` body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Embedded {
    Script,
    Style,
}

impl Embedded {
    pub fn from_tag_name(name: &str) -> Option<Embedded> {
        if name.eq_ignore_ascii_case("script") {
            Some(Embedded::Script)
        } else if name.eq_ignore_ascii_case("style") {
            Some(Embedded::Style)
        } else {
            None
        }
    }

    pub fn close_tag(self) -> &'static [u8] {
        match self {
            Embedded::Script => b"</script",
            Embedded::Style => b"</style",
        }
    }
}

/// Persisted markup scanner state, including the states of the scanners it
/// delegates embedded regions to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HtmlLexState {
    pub construct: HtmlConstruct,
    /// Start tag of a script or style container whose `>` has not been seen.
    pub pending: Option<Embedded>,
    /// Body of a script or style container.
    pub embedded: Option<Embedded>,
    pub css: CssLexState,
    pub js: JsLexState,
    /// Server-script islands; `php.in_code` marks an open region.
    pub php: PhpLexState,
}

impl HtmlLexState {
    pub fn in_server_script(&self) -> bool {
        self.php.in_code
    }

    /// Lines starting in this state keep the indentation the user typed.
    pub fn preserves_indent(&self) -> bool {
        if self.php.in_code {
            return self.php.preserves_indent();
        }
        match self.construct {
            HtmlConstruct::Comment
            | HtmlConstruct::AttributeValue(_)
            | HtmlConstruct::Declaration => true,
            HtmlConstruct::Text | HtmlConstruct::Tag => match self.embedded {
                Some(Embedded::Script) => self.js.preserves_indent(),
                Some(Embedded::Style) => self.css.preserves_indent(),
                None => false,
            },
        }
    }

    /// Enters the body of a container; its scanner starts from scratch.
    pub(crate) fn open_embedded(&mut self, kind: Embedded) {
        self.embedded = Some(kind);
        match kind {
            Embedded::Script => self.js = JsLexState::default(),
            Embedded::Style => self.css = CssLexState::default(),
        }
    }

    pub(crate) fn close_embedded(&mut self) {
        self.embedded = None;
        self.js = JsLexState::default();
        self.css = CssLexState::default();
    }
}
