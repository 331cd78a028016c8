//! Per-line formatting snapshots.

use crate::state::{StateKind, StateStack};

/// Everything that carries over a line boundary.
///
/// `stored_state_stack` holds the host suffix stashed while a server-script
/// region is open. `other_state_stack` holds server-script states suspended
/// while markup between two regions is formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineState<K, L> {
    pub state_stack: StateStack<K>,
    pub stored_state_stack: StateStack<K>,
    pub other_state_stack: StateStack<K>,
    /// Indent depth in effect for the next line, before line-specific
    /// adjustments.
    pub indent_depth: i32,
    pub lexer_state: L,
}

impl<K: StateKind, L> LineState<K, L> {
    pub fn new(state_stack: StateStack<K>, indent_depth: i32, lexer_state: L) -> Self {
        Self {
            state_stack,
            stored_state_stack: StateStack::new(),
            other_state_stack: StateStack::new(),
            indent_depth,
            lexer_state,
        }
    }
}

/// Cache entry for one line.
///
/// `begin` is the state the line was formatted from and `end` the state it
/// produced. The entry is only trusted while `revision` matches the line's
/// edit revision, `begin` matches the previous line's `end`, and
/// `lexer_state_valid` is set.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockData<K, L> {
    pub revision: u64,
    pub begin: LineState<K, L>,
    pub end: LineState<K, L>,
    /// Indent column computed for the line itself.
    pub line_indent: i32,
    pub lexer_state_valid: bool,
}

impl<K: StateKind, L: PartialEq> BlockData<K, L> {
    /// Indent depth carried to the next line.
    pub fn indent_depth(&self) -> i32 {
        self.end.indent_depth
    }

    pub fn lexer_state(&self) -> &L {
        &self.end.lexer_state
    }

    pub fn is_valid_for(&self, revision: u64, previous_end: &LineState<K, L>) -> bool {
        self.lexer_state_valid && self.revision == revision && self.begin == *previous_end
    }

    pub fn invalidate(&mut self) {
        self.lexer_state_valid = false;
    }
}
