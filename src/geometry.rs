//! Scene-space geometry helpers: distances, snapping, and hit-testing.

use crate::drawing::{Element, Shape};
use crate::ruler::Ruler;

/// Picking tolerance around freehand paths, in scene units.
pub const PATH_HIT_RADIUS: f32 = 10.0;
/// Text anchors carry no measured extent, so picking uses a fixed box.
pub const TEXT_HIT_WIDTH: f32 = 200.0;
pub const TEXT_HIT_RANGE: f32 = 20.0;

pub fn dist(a: [f32; 2], b: [f32; 2]) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

/// Distance from `point` to the segment `seg_start..seg_end`, clamped to the
/// segment ends. Degenerate segments collapse to point distance.
pub fn point_segment_distance(point: [f32; 2], seg_start: [f32; 2], seg_end: [f32; 2]) -> f32 {
    let length_squared =
        (seg_end[0] - seg_start[0]).powi(2) + (seg_end[1] - seg_start[1]).powi(2);

    if length_squared == 0.0 {
        return dist(point, seg_start);
    }

    let t = ((point[0] - seg_start[0]) * (seg_end[0] - seg_start[0])
        + (point[1] - seg_start[1]) * (seg_end[1] - seg_start[1]))
        / length_squared;
    let t = t.clamp(0.0, 1.0);

    let projection = [
        seg_start[0] + t * (seg_end[0] - seg_start[0]),
        seg_start[1] + t * (seg_end[1] - seg_start[1]),
    ];

    dist(point, projection)
}

/// Rounds both coordinates to the nearest grid intersection.
pub fn snap_to_grid(point: [f32; 2], grid_size: f32) -> [f32; 2] {
    [
        (point[0] / grid_size).round() * grid_size,
        (point[1] / grid_size).round() * grid_size,
    ]
}

/// Resolves a raw scene point against the active snapping aids. The ruler
/// wins where it reaches; points it does not catch fall through to the grid.
/// Callers pass `ruler: None` when the active tool does not snap.
pub fn apply_snap(
    point: [f32; 2],
    ruler: Option<&Ruler>,
    grid_enabled: bool,
    grid_size: f32,
) -> [f32; 2] {
    if let Some(ruler) = ruler {
        if let Some(snapped) = ruler.snap(point) {
            return snapped;
        }
    }
    if grid_enabled {
        return snap_to_grid(point, grid_size);
    }
    point
}

/// Whether `pos` (scene space) falls on `element`. Lines, arrows and images
/// are not pickable; they can only be removed through clear or undo.
pub fn hit_test(element: &Element, pos: [f32; 2]) -> bool {
    match &element.shape {
        Shape::Rectangle {
            x,
            y,
            width,
            height,
        } => pos[0] >= *x && pos[0] <= x + width && pos[1] >= *y && pos[1] <= y + height,
        Shape::Circle { x, y, radius } => dist(pos, [*x, *y]) <= *radius,
        Shape::Path { points } => points
            .iter()
            .any(|&sample| dist(pos, sample) <= PATH_HIT_RADIUS),
        Shape::Text { x, y, .. } => {
            pos[0] >= *x
                && pos[0] <= x + TEXT_HIT_WIDTH
                && pos[1] >= y - TEXT_HIT_RANGE
                && pos[1] <= y + TEXT_HIT_RANGE
        }
        Shape::StickyNote {
            x,
            y,
            width,
            height,
            ..
        } => pos[0] >= *x && pos[0] <= x + width && pos[1] >= *y && pos[1] <= y + height,
        Shape::Line { .. } | Shape::Arrow { .. } | Shape::Image { .. } => false,
    }
}
