//! Formatter state stack.

use std::fmt::Debug;

/// Tag type of a formatter state.
///
/// Every formatter defines its own small enum of state kinds; this trait is
/// the set of capabilities the shared machinery needs from it.
pub trait StateKind: Copy + Eq + Debug {}

impl<T: Copy + Eq + Debug> StateKind for T {}

/// Projection of an embedded automaton's kinds into a host kind.
///
/// The markup formatter keeps one stack for every language on a line. Its kind
/// wraps the style, script and server-script kinds, and the embedded automata
/// read and write that stack through this trait instead of owning a stack of
/// their own.
pub trait Embeds<T: StateKind>: StateKind {
    fn wrap(inner: T) -> Self;
    fn project(self) -> Option<T>;
}

impl<T: StateKind> Embeds<T> for T {
    #[inline]
    fn wrap(inner: T) -> Self {
        inner
    }

    #[inline]
    fn project(self) -> Option<T> {
        Some(self)
    }
}

/// One entry of the nesting stack.
///
/// `saved_indent_depth` is the indent depth that was current when the state
/// was entered; leaving the state restores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State<K> {
    pub kind: K,
    pub saved_indent_depth: i32,
}

impl<K> State<K> {
    pub const fn new(kind: K, saved_indent_depth: i32) -> Self {
        Self {
            kind,
            saved_indent_depth,
        }
    }
}

/// LIFO sequence of states, bottom first.
///
/// The stack itself does not protect its bottom entry; the formatter core
/// refuses to pop the root sentinel, while stashed suffixes (which have no
/// root) use the same type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateStack<K> {
    items: Vec<State<K>>,
}

impl<K> Default for StateStack<K> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<K: StateKind> StateStack<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: State<K>) -> Self {
        Self { items: vec![root] }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, state: State<K>) {
        self.items.push(state);
    }

    pub fn pop(&mut self) -> Option<State<K>> {
        self.items.pop()
    }

    pub fn top(&self) -> Option<State<K>> {
        self.items.last().copied()
    }

    pub fn top_mut(&mut self) -> Option<&mut State<K>> {
        self.items.last_mut()
    }

    /// State `from_top` entries below the top (`0` is the top).
    pub fn get(&self, from_top: usize) -> Option<State<K>> {
        let len = self.items.len();
        if from_top >= len {
            return None;
        }
        self.items.get(len - 1 - from_top).copied()
    }

    /// State at absolute position `index` (`0` is the bottom).
    pub fn at(&self, index: usize) -> Option<State<K>> {
        self.items.get(index).copied()
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Removes and returns every state at or above `index`.
    pub fn split_off(&mut self, index: usize) -> StateStack<K> {
        let index = index.min(self.items.len());
        StateStack {
            items: self.items.split_off(index),
        }
    }

    /// Moves every state of `other` on top of this stack, leaving `other` empty.
    pub fn append(&mut self, other: &mut StateStack<K>) {
        self.items.append(&mut other.items);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Absolute index of the topmost state matching `pred`.
    pub fn rposition(&self, mut pred: impl FnMut(K) -> bool) -> Option<usize> {
        self.items.iter().rposition(|state| pred(state.kind))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, State<K>> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[State<K>] {
        &self.items
    }
}

impl<K> FromIterator<State<K>> for StateStack<K> {
    fn from_iter<I: IntoIterator<Item = State<K>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
