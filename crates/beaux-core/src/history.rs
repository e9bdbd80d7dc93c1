//! Bounded undo/redo history over full state snapshots.
//!
//! The sequence holds at most [`HISTORY_CAPACITY`] entries, evicting the
//! oldest on overflow. A cursor marks the current entry; undo/redo move the
//! cursor without mutating the sequence, and a push after an undo truncates
//! everything past the cursor before appending.

pub const HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
}

impl<T: Clone> History<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    /// The entry at the cursor, if any entry exists.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    /// Appends a new entry and moves the cursor onto it. Any redo future is
    /// discarded first; the oldest entry is evicted at capacity.
    pub fn push(&mut self, entry: T) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps the cursor back and returns the entry there; `None` at the
    /// boundary (no new entry is recorded either way).
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Steps the cursor forward and returns the entry there; `None` at the
    /// boundary.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_undo_redo_walks_the_cursor() {
        let mut h = History::new();
        h.push(1);
        h.push(2);
        h.push(3);
        assert_eq!(h.undo(), Some(&2));
        assert_eq!(h.undo(), Some(&1));
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), Some(&2));
        assert_eq!(h.redo(), Some(&3));
        assert_eq!(h.redo(), None);
    }

    #[test]
    fn push_after_undo_truncates_the_future() {
        let mut h = History::new();
        h.push(1);
        h.push(2);
        h.push(3);
        h.undo();
        h.undo();
        h.push(9);
        assert!(!h.can_redo());
        assert_eq!(h.current(), Some(&9));
        assert_eq!(h.undo(), Some(&1));
    }

    #[test]
    fn capacity_evicts_the_oldest_entry() {
        let mut h = History::new();
        for i in 0..25 {
            h.push(i);
        }
        assert_eq!(h.len(), HISTORY_CAPACITY);
        assert_eq!(h.current(), Some(&24));
        // Walk all the way back: the oldest surviving entry is 5.
        let mut last = None;
        while h.can_undo() {
            last = h.undo().copied();
        }
        assert_eq!(last, Some(5));
    }

    #[test]
    fn boundary_undo_redo_do_not_disturb_the_cursor() {
        let mut h = History::new();
        h.push("a");
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), None);
        assert_eq!(h.current(), Some(&"a"));
    }
}
