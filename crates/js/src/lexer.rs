use core_types::Quote;

/// Deepest `${` nesting tracked inside template literals.
pub const MAX_TEMPLATE_DEPTH: usize = 8;
/// Deepest markup nesting tracked by the element-aware dialects.
pub const MAX_MARKUP_DEPTH: usize = 16;

/// Multi-line construct open at the end of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsConstruct {
    #[default]
    Normal,
    BlockComment,
    String(Quote),
    /// Literal text of a template string.
    Template,
}

/// What the scanner is looking at inside a markup element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsxMode {
    /// Between `<name` and `>`.
    Tag,
    /// Between `</` and `>`.
    ClosingTag,
    AttributeValue(Quote),
    /// Element content.
    Children,
    /// Script inside `{}`; counts the unmatched `{` opened inside it.
    Expression(u8),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateLevel {
    /// Unmatched `{` inside this `${ }`.
    pub braces: u8,
    /// Markup depth when the `${` opened.
    pub markup_depth: u8,
}

/// Persisted script scanner state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsLexState {
    pub construct: JsConstruct,
    /// A `/` here starts a regular expression rather than a division.
    pub regexp_allowed: bool,
    /// Open generic argument lists (typed dialect only).
    pub generic_depth: u8,
    templates: [TemplateLevel; MAX_TEMPLATE_DEPTH],
    template_depth: u8,
    markup: [JsxMode; MAX_MARKUP_DEPTH],
    markup_depth: u8,
}

impl Default for JsLexState {
    fn default() -> Self {
        Self {
            construct: JsConstruct::Normal,
            regexp_allowed: true,
            generic_depth: 0,
            templates: [TemplateLevel::default(); MAX_TEMPLATE_DEPTH],
            template_depth: 0,
            markup: [JsxMode::Children; MAX_MARKUP_DEPTH],
            markup_depth: 0,
        }
    }
}

impl JsLexState {
    /// Lines starting in this state keep the indentation the user typed.
    pub fn preserves_indent(&self) -> bool {
        self.construct != JsConstruct::Normal
            || matches!(self.markup_mode(), Some(JsxMode::AttributeValue(_)))
    }

    pub fn template_depth(&self) -> usize {
        usize::from(self.template_depth)
    }

    pub fn markup_depth(&self) -> usize {
        usize::from(self.markup_depth)
    }

    pub fn markup_mode(&self) -> Option<JsxMode> {
        let depth = self.markup_depth();
        depth.checked_sub(1).map(|i| self.markup[i])
    }

    /// Enters a `${ }`. Returns `false` when nesting is too deep to track.
    pub(crate) fn push_template(&mut self) -> bool {
        let depth = self.template_depth();
        if depth >= MAX_TEMPLATE_DEPTH {
            log::debug!(target: "js.scanner", "template nesting deeper than {MAX_TEMPLATE_DEPTH}");
            return false;
        }
        self.templates[depth] = TemplateLevel {
            braces: 0,
            markup_depth: self.markup_depth,
        };
        self.template_depth += 1;
        true
    }

    pub(crate) fn pop_template(&mut self) {
        self.template_depth = self.template_depth.saturating_sub(1);
        let depth = self.template_depth();
        self.templates[depth] = TemplateLevel::default();
    }

    /// Innermost `${ }` when it is nested deeper than any markup expression.
    pub(crate) fn innermost_template(&mut self) -> Option<&mut TemplateLevel> {
        let depth = self.template_depth().checked_sub(1)?;
        let markup_depth = self.markup_depth;
        let level = &mut self.templates[depth];
        (level.markup_depth == markup_depth).then_some(level)
    }

    pub(crate) fn push_markup(&mut self, mode: JsxMode) -> bool {
        let depth = self.markup_depth();
        if depth >= MAX_MARKUP_DEPTH {
            log::debug!(target: "js.scanner", "markup nesting deeper than {MAX_MARKUP_DEPTH}");
            return false;
        }
        self.markup[depth] = mode;
        self.markup_depth += 1;
        true
    }

    pub(crate) fn pop_markup(&mut self) {
        self.markup_depth = self.markup_depth.saturating_sub(1);
        let depth = self.markup_depth();
        self.markup[depth] = JsxMode::Children;
    }

    pub(crate) fn set_markup_mode(&mut self, mode: JsxMode) {
        if let Some(i) = self.markup_depth().checked_sub(1) {
            self.markup[i] = mode;
        }
    }
}
