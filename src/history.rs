//! Undo/redo over whole-scene snapshots.

use crate::drawing::Element;

/// Linear history of scene snapshots with a cursor at the live state.
/// Undo and redo only ever move the cursor; committing after an undo
/// discards the states past the cursor.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Element>>,
    cursor: usize,
}

impl History {
    /// Starts history at the given scene; that snapshot is the floor undo
    /// can reach.
    pub fn new(initial: Vec<Element>) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// Records a new state after a completed mutation.
    pub fn commit(&mut self, snapshot: Vec<Element>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor += 1;
    }

    /// Steps back one state, or returns `None` at the initial snapshot.
    pub fn undo(&mut self) -> Option<&[Element]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Steps forward one state, or returns `None` at the newest snapshot.
    pub fn redo(&mut self) -> Option<&[Element]> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// The snapshot the cursor currently points at.
    pub fn current(&self) -> &[Element] {
        &self.snapshots[self.cursor]
    }

    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }
}
