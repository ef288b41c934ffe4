use crate::buffer::Snapshot;

/// How many paint-layer snapshots are retained by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Bounded undo/redo history of paint-layer snapshots.
///
/// The cursor always points at the entry matching the live paint layer. There
/// is always at least one entry (the cleared canvas), so undo and redo are
/// never undefined, only no-ops.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    /// Oldest first
    entries: Vec<Snapshot>,
    cursor: usize,
    limit: usize,
}

// Always holds at least the initial snapshot.
#[allow(clippy::len_without_is_empty)]
impl HistoryStack {
    /// Creates a history whose only entry is `initial`.
    ///
    /// A `limit` of zero is treated as one.
    pub fn new(initial: Snapshot, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Records a new state, dropping any redo states past the cursor.
    pub fn push(&mut self, entry: Snapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(..overflow);
            self.cursor -= overflow;
            log::debug!("History limit {} reached, evicted {} oldest entries", self.limit, overflow);
        }
    }

    /// Steps back one entry and returns it for the caller to restore.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Steps forward one entry and returns it for the caller to restore.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of steps undo can still take.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Forgets everything and starts over from `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }
}
