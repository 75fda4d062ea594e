use std::collections::HashSet;
use std::time::Duration;

use crate::drawing::ElementId;

/// Pointer gesture in progress, one pointer-down to pointer-up. The variants
/// carry whatever the move/up handlers need from the down event.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    /// Freehand stroke; points accumulate in scene space.
    Drawing { points: Vec<[f32; 2]> },
    /// Two-point shape drag from `anchor` to `current`.
    DraggingShape { anchor: [f32; 2], current: [f32; 2] },
    /// Moving a selected element; `grab_offset` keeps it locked under the
    /// cursor, `moved` gates the commit on pointer-up.
    MovingElement {
        id: ElementId,
        grab_offset: [f32; 2],
        moved: bool,
    },
    /// Camera pan; both positions captured at pointer-down.
    Panning {
        pointer_start: [f32; 2],
        pan_start: [f32; 2],
    },
    /// Eraser held down; deletes on the down event and on every move.
    Erasing,
}

impl Gesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }
}

/// The selected element(s): a single primary pick plus an optional
/// multi-select set (select-all, paste). When `multi` is non-empty it is
/// the effective selection.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub primary: Option<ElementId>,
    pub multi: HashSet<ElementId>,
}

impl Selection {
    pub fn clear(&mut self) {
        self.primary = None;
        self.multi.clear();
    }

    /// Picks a single element, replacing any multi-select.
    pub fn set_primary(&mut self, id: ElementId) {
        self.primary = Some(id);
        self.multi.clear();
    }

    pub fn remove_id(&mut self, id: ElementId) {
        if self.primary == Some(id) {
            self.primary = None;
        }
        self.multi.remove(&id);
    }

    /// Effective selection in no particular order.
    pub fn ids(&self) -> Vec<ElementId> {
        if !self.multi.is_empty() {
            self.multi.iter().copied().collect()
        } else {
            self.primary.into_iter().collect()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.multi.is_empty()
    }
}

/// Tunable editor behavior; the defaults match the hosting application.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub grid_size: f32,
    pub autosave_delay: Duration,
    /// Smallest width/height (or radius) a dragged shape may commit with.
    pub min_shape_size: f32,
    pub sticky_size: [f32; 2],
    pub paste_offset: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            autosave_delay: Duration::from_secs(2),
            min_shape_size: 5.0,
            sticky_size: [200.0, 180.0],
            paste_offset: 20.0,
        }
    }
}
