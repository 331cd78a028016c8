//! Per-line storage owned outside the document.

use crate::id::LineId;
use std::collections::HashMap;

/// Values attached to lines by identity.
///
/// Entries survive insertions and removals of other lines because they are
/// keyed by [`LineId`], not by line number. Entries of removed lines linger
/// until [`SideTable::retain_lines`] drops them.
#[derive(Clone, Debug)]
pub struct SideTable<T> {
    entries: HashMap<LineId, T>,
}

impl<T> Default for SideTable<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> SideTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: LineId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: LineId) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    /// Stores `value` for `id` and returns the previous entry.
    pub fn insert(&mut self, id: LineId, value: T) -> Option<T> {
        self.entries.insert(id, value)
    }

    pub fn remove(&mut self, id: LineId) -> Option<T> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: LineId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keeps only entries whose line is still alive; returns how many were
    /// dropped.
    pub fn retain_lines(&mut self, mut alive: impl FnMut(LineId) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, _| alive(*id));
        before - self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LineId, &T)> + '_ {
        self.entries.iter().map(|(id, value)| (*id, value))
    }
}

#[cfg(test)]
mod tests {
    use super::SideTable;
    use crate::LineId;

    #[test]
    fn insert_replace_remove() {
        let mut table = SideTable::new();
        let id = LineId::from_raw(7);
        assert_eq!(table.insert(id, 1), None);
        assert_eq!(table.insert(id, 2), Some(1));
        assert_eq!(table.get(id), Some(&2));
        if let Some(v) = table.get_mut(id) {
            *v = 3;
        }
        assert_eq!(table.remove(id), Some(3));
        assert!(table.is_empty());
    }

    #[test]
    fn retain_drops_dead_lines() {
        let mut table = SideTable::new();
        for raw in 0..5 {
            table.insert(LineId::from_raw(raw), raw);
        }
        let dropped = table.retain_lines(|id| id.as_raw() % 2 == 0);
        assert_eq!(dropped, 2);
        assert_eq!(table.len(), 3);
        assert!(!table.contains(LineId::from_raw(1)));
    }
}
