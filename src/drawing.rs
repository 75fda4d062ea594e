//! Drawable element model: tools, shapes, and the common element wrapper.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Draw,
    Rectangle,
    Circle,
    Line,
    Arrow,
    Text,
    StickyNote,
    Eraser,
}

impl Tool {
    /// Drawing tools are the drag-to-draw ones; only they snap to the ruler.
    pub fn is_drawing(self) -> bool {
        matches!(
            self,
            Tool::Draw | Tool::Rectangle | Tool::Circle | Tool::Line | Tool::Arrow
        )
    }

    /// One-shot creation tools revert to `Select` after the gesture ends.
    pub fn is_one_shot(self) -> bool {
        matches!(
            self,
            Tool::Rectangle | Tool::Circle | Tool::Line | Tool::Arrow | Tool::Text | Tool::StickyNote
        )
    }
}

/// Element identifier; unique within a scene for the scene's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn fresh() -> Self {
        ElementId(Uuid::new_v4())
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickyPriority {
    Normal,
    Important,
    Urgent,
}

/// Kind-specific geometry and content. Serialized with a `kind` tag so the
/// flattened element record matches the host application's documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Shape {
    Rectangle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Arrow {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Path {
        points: Vec<[f32; 2]>,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        #[serde(rename = "fontSize")]
        font_size: f32,
    },
    StickyNote {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: String,
        priority: StickyPriority,
        #[serde(rename = "createdAt")]
        created_at: String,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        data: String,
    },
}

impl Shape {
    /// Reference point used for dragging: top-left for boxes, center for
    /// circles, first endpoint/sample for lines and paths.
    pub fn position(&self) -> [f32; 2] {
        match self {
            Shape::Rectangle { x, y, .. }
            | Shape::Circle { x, y, .. }
            | Shape::Text { x, y, .. }
            | Shape::StickyNote { x, y, .. }
            | Shape::Image { x, y, .. } => [*x, *y],
            Shape::Line { x1, y1, .. } | Shape::Arrow { x1, y1, .. } => [*x1, *y1],
            Shape::Path { points } => points.first().copied().unwrap_or([0.0, 0.0]),
        }
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Shape {
        let mut shape = self.clone();
        match &mut shape {
            Shape::Rectangle { x, y, .. }
            | Shape::Circle { x, y, .. }
            | Shape::Text { x, y, .. }
            | Shape::StickyNote { x, y, .. }
            | Shape::Image { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Shape::Line { x1, y1, x2, y2 } | Shape::Arrow { x1, y1, x2, y2 } => {
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
            Shape::Path { points } => {
                for p in points.iter_mut() {
                    p[0] += dx;
                    p[1] += dy;
                }
            }
        }
        shape
    }

    /// The same shape moved so its reference point lands on `pos`.
    pub fn at_position(&self, pos: [f32; 2]) -> Shape {
        let current = self.position();
        self.translated(pos[0] - current[0], pos[1] - current[1])
    }

    /// Mutable access to the text content of `Text` and `StickyNote` shapes.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Shape::Text { text, .. } | Shape::StickyNote { text, .. } => Some(text),
            _ => None,
        }
    }
}

fn default_opacity() -> f32 {
    1.0
}

/// One drawable entity: common stroke attributes plus the kind-specific shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub color: [f32; 4],
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(flatten)]
    pub shape: Shape,
}

impl Element {
    pub fn new(color: [f32; 4], stroke_width: f32, shape: Shape) -> Self {
        Self {
            id: ElementId::fresh(),
            color,
            stroke_width,
            opacity: 1.0,
            shape,
        }
    }
}

/// Partial update applied through `Scene::update`; `None` fields are kept.
#[derive(Debug, Clone, Default)]
pub struct ElementPatch {
    pub color: Option<[f32; 4]>,
    pub stroke_width: Option<f32>,
    pub opacity: Option<f32>,
    pub shape: Option<Shape>,
}

impl ElementPatch {
    pub fn shape(shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    pub fn apply(self, element: &mut Element) {
        if let Some(color) = self.color {
            element.color = color;
        }
        if let Some(width) = self.stroke_width {
            element.stroke_width = width;
        }
        if let Some(opacity) = self.opacity {
            element.opacity = opacity;
        }
        if let Some(shape) = self.shape {
            element.shape = shape;
        }
    }
}
