use core_types::Quote;

/// Multi-line construct open at the end of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhpConstruct {
    #[default]
    Normal,
    BlockComment,
    String(Quote),
    /// Body of a heredoc, or of a nowdoc when `nowdoc` is set.
    Heredoc { nowdoc: bool },
}

/// Persisted server-script scanner state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhpLexState {
    /// Between an open bracket (`<?php`, `<?=`, `<?`) and `?>`.
    pub in_code: bool,
    pub construct: PhpConstruct,
    /// Closing identifier of the open heredoc or nowdoc.
    pub heredoc_tag: Option<Box<str>>,
}

impl PhpLexState {
    /// State of a line that starts inside code, as for a file fragment
    /// without an open bracket.
    pub fn in_code() -> Self {
        Self {
            in_code: true,
            ..Self::default()
        }
    }

    /// Lines starting in this state keep the indentation the user typed.
    pub fn preserves_indent(&self) -> bool {
        self.in_code && self.construct != PhpConstruct::Normal
    }

    pub(crate) fn open_heredoc(&mut self, tag: &str, nowdoc: bool) {
        self.construct = PhpConstruct::Heredoc { nowdoc };
        self.heredoc_tag = Some(tag.into());
    }

    pub(crate) fn close_heredoc(&mut self) {
        self.construct = PhpConstruct::Normal;
        self.heredoc_tag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{PhpConstruct, PhpLexState};

    #[test]
    fn heredoc_tag_is_part_of_the_state() {
        let mut a = PhpLexState::in_code();
        let mut b = PhpLexState::in_code();
        a.open_heredoc("EOT", false);
        b.open_heredoc("SQL", false);
        assert_ne!(a, b);
        assert!(a.preserves_indent());
        a.close_heredoc();
        assert_eq!(a, PhpLexState::in_code());
        assert_eq!(a.construct, PhpConstruct::Normal);
    }

    #[test]
    fn text_outside_code_is_not_preserved() {
        let state = PhpLexState {
            construct: PhpConstruct::BlockComment,
            ..PhpLexState::default()
        };
        assert!(!state.preserves_indent());
    }
}
