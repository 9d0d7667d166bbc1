//! Snapshot history.
//!
//! Undo/redo keeps whole-document snapshots rather than inverse
//! operations: every entry is an independent deep copy, so restoring one
//! can never revive state a later edit mutated. Memory cost is document
//! size × depth, bounded by the snapshot cap.

use mailsmith_document::EmailDocument;

/// Maximum retained snapshots. Oldest entries are dropped first when the
/// cap is exceeded.
pub const MAX_SNAPSHOTS: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<EmailDocument>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// History seeded with one entry at position 0.
    pub fn new(initial: EmailDocument) -> Self {
        Self::with_capacity(initial, MAX_SNAPSHOTS)
    }

    pub fn with_capacity(initial: EmailDocument, capacity: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Record a new snapshot after the cursor. Drops any redo tail, then
    /// the oldest entries past capacity; the cursor shifts with them so
    /// redo never points past the end.
    pub fn push(&mut self, snapshot: EmailDocument) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.capacity {
            let excess = self.snapshots.len() - self.capacity;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. `None` at the oldest retained entry.
    pub fn undo(&mut self) -> Option<&EmailDocument> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Step forward one snapshot. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&EmailDocument> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsmith_document::EmailDocument;

    fn doc_with_marker(marker: &str) -> EmailDocument {
        EmailDocument {
            canvas_color: marker.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_seeded_with_single_entry() {
        let history = History::new(EmailDocument::default());
        assert_eq!(history.len(), 1);
        assert_eq!(history.position(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = History::new(doc_with_marker("0"));
        history.push(doc_with_marker("1"));
        history.push(doc_with_marker("2"));

        assert_eq!(history.undo().unwrap().canvas_color, "1");
        assert_eq!(history.undo().unwrap().canvas_color, "0");
        assert!(history.undo().is_none());

        assert_eq!(history.redo().unwrap().canvas_color, "1");
        assert_eq!(history.redo().unwrap().canvas_color, "2");
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_push_clears_redo_tail() {
        let mut history = History::new(doc_with_marker("0"));
        history.push(doc_with_marker("1"));
        history.undo();
        history.push(doc_with_marker("2"));

        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = History::with_capacity(doc_with_marker("0"), 3);
        for i in 1..10 {
            history.push(doc_with_marker(&i.to_string()));
        }

        assert_eq!(history.len(), 3);
        // Undo stops at the oldest retained snapshot, not the original
        assert_eq!(history.undo().unwrap().canvas_color, "8");
        assert_eq!(history.undo().unwrap().canvas_color, "7");
        assert!(history.undo().is_none());
        assert_eq!(history.position(), 0);
    }
}
