//! Measurement ruler overlay: a transient snapping aid with its own drag
//! machine. Never serialized and never part of undo history.

use crate::geometry::{dist, point_segment_distance};

/// Perpendicular reach of ruler snapping, in scene units.
pub const SNAP_DISTANCE: f32 = 20.0;
/// How far past either end a point may still snap onto the line.
pub const SNAP_OVERRUN: f32 = 10.0;
pub const BODY_GRAB_DISTANCE: f32 = 10.0;
pub const HANDLE_GRAB_DISTANCE: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ruler {
    pub anchor: [f32; 2],
    pub length: f32,
    /// Rotation in radians; 0 points along +x.
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerZone {
    Start,
    End,
    Body,
}

impl Ruler {
    /// Placement used when the ruler is toggled on.
    pub fn default_placement() -> Self {
        Self {
            anchor: [200.0, 200.0],
            length: 400.0,
            angle: 0.0,
        }
    }

    pub fn end_point(&self) -> [f32; 2] {
        [
            self.anchor[0] + self.length * self.angle.cos(),
            self.anchor[1] + self.length * self.angle.sin(),
        ]
    }

    /// Projects `point` onto the ruler's line when it is close enough:
    /// within `SNAP_DISTANCE` perpendicular and within the span plus
    /// `SNAP_OVERRUN` on each end. Returns `None` otherwise.
    pub fn snap(&self, point: [f32; 2]) -> Option<[f32; 2]> {
        let (sin, cos) = self.angle.sin_cos();
        let dx = point[0] - self.anchor[0];
        let dy = point[1] - self.anchor[1];

        let along = dx * cos + dy * sin;
        let across = -dx * sin + dy * cos;

        if across.abs() > SNAP_DISTANCE {
            return None;
        }
        if along < -SNAP_OVERRUN || along > self.length + SNAP_OVERRUN {
            return None;
        }

        Some([
            self.anchor[0] + along * cos,
            self.anchor[1] + along * sin,
        ])
    }

    /// Which part of the ruler a pointer-down grabs, if any. The resize
    /// handles win over the body where the zones overlap.
    pub fn grab_zone(&self, point: [f32; 2]) -> Option<RulerZone> {
        if dist(point, self.anchor) <= HANDLE_GRAB_DISTANCE {
            return Some(RulerZone::Start);
        }
        if dist(point, self.end_point()) <= HANDLE_GRAB_DISTANCE {
            return Some(RulerZone::End);
        }
        if point_segment_distance(point, self.anchor, self.end_point()) <= BODY_GRAB_DISTANCE {
            return Some(RulerZone::Body);
        }
        None
    }
}

/// Drag state for the ruler. `Start` keeps the pre-drag end point so the
/// ruler pivots around it while the anchor follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RulerDrag {
    Idle,
    Body { grab_offset: [f32; 2] },
    Start { end: [f32; 2] },
    End,
}

impl RulerDrag {
    /// Starts a drag if `pointer` lands on the ruler, capturing whatever the
    /// move updates need from the pre-drag state.
    pub fn begin(ruler: &Ruler, pointer: [f32; 2]) -> Option<RulerDrag> {
        match ruler.grab_zone(pointer)? {
            RulerZone::Body => Some(RulerDrag::Body {
                grab_offset: [
                    ruler.anchor[0] - pointer[0],
                    ruler.anchor[1] - pointer[1],
                ],
            }),
            RulerZone::Start => Some(RulerDrag::Start {
                end: ruler.end_point(),
            }),
            RulerZone::End => Some(RulerDrag::End),
        }
    }

    /// Applies one pointer-move to the ruler.
    pub fn update(&self, ruler: &mut Ruler, pointer: [f32; 2]) {
        match self {
            RulerDrag::Idle => {}
            RulerDrag::Body { grab_offset } => {
                ruler.anchor = [
                    pointer[0] + grab_offset[0],
                    pointer[1] + grab_offset[1],
                ];
            }
            RulerDrag::Start { end } => {
                ruler.anchor = pointer;
                let dx = end[0] - pointer[0];
                let dy = end[1] - pointer[1];
                ruler.length = (dx * dx + dy * dy).sqrt();
                ruler.angle = dy.atan2(dx);
            }
            RulerDrag::End => {
                let dx = pointer[0] - ruler.anchor[0];
                let dy = pointer[1] - ruler.anchor[1];
                ruler.length = (dx * dx + dy * dy).sqrt();
                ruler.angle = dy.atan2(dx);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, RulerDrag::Idle)
    }
}
