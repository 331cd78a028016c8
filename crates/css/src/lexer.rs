use core_types::Quote;

// Multi-line construct open at the end of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CssConstruct {
    #[default]
    Normal,
    BlockComment,
    String(Quote),
}

/// Persisted style scanner state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CssLexState {
    pub construct: CssConstruct,
    /// Open `{` count; selects between selector and declaration lexing.
    pub block_depth: u16,
    /// Inside a property value (after `name:` until `;`, `{` or `}`).
    pub in_value: bool,
    /// Inside an at-rule prelude (after `@name` until `;` or `{`).
    pub in_at_rule: bool,
}

impl CssLexState {
    /// Lines starting in this state keep the indentation the user typed.
    pub fn preserves_indent(&self) -> bool {
        self.construct != CssConstruct::Normal
    }
}
