//! Pointer and keyboard handling: interprets each gesture against the
//! active tool and applies the resulting scene mutations.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::drawing::{Element, ElementId, ElementPatch, Shape, StickyPriority, Tool};
use crate::editor::CanvasEditor;
use crate::geometry::{self, dist};
use crate::keymap::{action_for_key, EditorAction, Key, Modifiers};
use crate::ruler::RulerDrag;
use crate::state::Gesture;

const TEXT_PLACEHOLDER: &str = "New text";
const STICKY_PLACEHOLDER: &str = "New note";

impl CanvasEditor {
    /// Pointer-down in device coordinates. Starts whichever gesture the
    /// active tool calls for; ignored while a text edit is open.
    pub fn pointer_down(&mut self, device_pos: [f32; 2]) {
        if self.is_editing_text() {
            return;
        }
        let scene_pos = self.camera.to_scene(device_pos);

        match self.tool {
            Tool::Select => {
                // The ruler overlay sits above scene content, so its grab
                // zones win over element hit-testing.
                if let Some(ruler) = &self.ruler {
                    if let Some(drag) = RulerDrag::begin(ruler, scene_pos) {
                        self.ruler_drag = drag;
                        return;
                    }
                }
                if let Some(id) = self.element_at(scene_pos) {
                    self.selection.set_primary(id);
                    let position = self
                        .scene
                        .get(id)
                        .map(|e| e.shape.position())
                        .unwrap_or(scene_pos);
                    self.gesture = Gesture::MovingElement {
                        id,
                        grab_offset: [position[0] - scene_pos[0], position[1] - scene_pos[1]],
                        moved: false,
                    };
                } else {
                    self.selection.clear();
                    self.gesture = Gesture::Panning {
                        pointer_start: device_pos,
                        pan_start: self.camera.pan,
                    };
                }
            }
            Tool::Draw => {
                let point = self.snap_point(scene_pos);
                self.gesture = Gesture::Drawing {
                    points: vec![point],
                };
            }
            Tool::Rectangle | Tool::Circle | Tool::Line | Tool::Arrow => {
                let anchor = self.snap_point(scene_pos);
                self.gesture = Gesture::DraggingShape {
                    anchor,
                    current: anchor,
                };
            }
            Tool::Text => {
                self.create_text(scene_pos);
                self.set_tool(Tool::Select);
            }
            Tool::StickyNote => {
                self.create_sticky(scene_pos);
                self.set_tool(Tool::Select);
            }
            Tool::Eraser => {
                self.gesture = Gesture::Erasing;
                self.erase_at(scene_pos);
            }
        }
    }

    /// Pointer-move in device coordinates. Advances the gesture in progress;
    /// in-progress mutations touch the live scene without committing.
    pub fn pointer_move(&mut self, device_pos: [f32; 2]) {
        if self.is_editing_text() {
            return;
        }
        let scene_pos = self.camera.to_scene(device_pos);

        if self.ruler_drag.is_active() {
            let drag = self.ruler_drag;
            if let Some(ruler) = self.ruler.as_mut() {
                drag.update(ruler, scene_pos);
            }
            return;
        }

        if matches!(self.gesture, Gesture::Erasing) {
            self.erase_at(scene_pos);
            return;
        }

        let snapped = self.snap_point(scene_pos);
        match &mut self.gesture {
            Gesture::Idle | Gesture::Erasing => {}
            Gesture::Drawing { points } => {
                points.push(snapped);
            }
            Gesture::DraggingShape { current, .. } => {
                *current = snapped;
            }
            Gesture::MovingElement {
                id,
                grab_offset,
                moved,
            } => {
                let target = [
                    scene_pos[0] + grab_offset[0],
                    scene_pos[1] + grab_offset[1],
                ];
                let shape = self.scene.get(*id).map(|e| e.shape.at_position(target));
                if let Some(shape) = shape {
                    let _ = self.scene.update(*id, ElementPatch::shape(shape));
                    *moved = true;
                }
            }
            Gesture::Panning {
                pointer_start,
                pan_start,
            } => {
                let pan = [
                    pan_start[0] + device_pos[0] - pointer_start[0],
                    pan_start[1] + device_pos[1] - pointer_start[1],
                ];
                self.camera.set_pan(pan);
            }
        }
    }

    /// Pointer-up in device coordinates. Completes the gesture: creates and
    /// commits whatever it produced, or discards a degenerate result.
    pub fn pointer_up(&mut self, device_pos: [f32; 2]) {
        if self.is_editing_text() {
            return;
        }
        let scene_pos = self.camera.to_scene(device_pos);

        if self.ruler_drag.is_active() {
            self.ruler_drag = RulerDrag::Idle;
            return;
        }

        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle | Gesture::Erasing => {}
            Gesture::Drawing { points } => {
                if points.len() >= 2 {
                    let element = Element::new(
                        self.current_color,
                        self.current_stroke_width,
                        Shape::Path { points },
                    );
                    if self.scene.insert(element).is_ok() {
                        self.commit();
                    }
                }
            }
            Gesture::DraggingShape { anchor, .. } => {
                let current = self.snap_point(scene_pos);
                self.finish_drag_shape(anchor, current);
                if self.tool.is_one_shot() {
                    self.set_tool(Tool::Select);
                }
            }
            Gesture::MovingElement { moved, .. } => {
                if moved {
                    self.commit();
                }
            }
            // Camera state is not undo-tracked; panning never commits.
            Gesture::Panning { .. } => {}
        }
    }

    /// Double-click opens the text-edit affordance on a text or sticky-note
    /// element and returns its id for the host's edit form.
    pub fn double_click(&mut self, device_pos: [f32; 2]) -> Option<ElementId> {
        if self.is_editing_text() {
            return None;
        }
        let scene_pos = self.camera.to_scene(device_pos);
        let id = self.element_at(scene_pos)?;
        self.begin_text_edit(id).then_some(id)
    }

    /// Top-most element under a scene-space point, if any.
    pub fn element_at(&self, scene_pos: [f32; 2]) -> Option<ElementId> {
        self.scene
            .elements()
            .iter()
            .rev()
            .find(|e| geometry::hit_test(e, scene_pos))
            .map(|e| e.id)
    }

    /// Live preview of the shape the current gesture would produce, for the
    /// render layer. Not part of the scene.
    pub fn preview(&self) -> Option<Shape> {
        match &self.gesture {
            Gesture::Drawing { points } if points.len() >= 2 => Some(Shape::Path {
                points: points.clone(),
            }),
            Gesture::DraggingShape { anchor, current } => {
                self.drag_preview_shape(*anchor, *current)
            }
            _ => None,
        }
    }

    /// Translates one key press and applies the resulting action.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        if let Some(action) = action_for_key(key, modifiers) {
            self.apply_action(action);
        }
    }

    /// Applies a keyboard-surface action. Suppressed while a text edit is
    /// open so typing never triggers shortcuts.
    pub fn apply_action(&mut self, action: EditorAction) {
        if self.is_editing_text() {
            return;
        }
        match action {
            EditorAction::SelectTool(tool) => self.set_tool(tool),
            EditorAction::RequestImageUpload => {
                log::debug!("image upload requested; host supplies the data via insert_image");
            }
            EditorAction::ToggleGridSnap => self.toggle_grid_snap(),
            EditorAction::ToggleRuler => self.toggle_ruler(),
            EditorAction::ToggleMinimap => self.toggle_minimap(),
            EditorAction::ToggleShortcutHelp => self.toggle_shortcut_help(),
            EditorAction::DeleteSelection => self.delete_selection(),
            EditorAction::ZoomIn => self.zoom_in(),
            EditorAction::ZoomOut => self.zoom_out(),
            EditorAction::ZoomTo(zoom) => self.zoom_to(zoom),
            EditorAction::ResetView => self.reset_view(),
            EditorAction::Copy => self.copy_selection(),
            EditorAction::Paste => self.paste(),
            EditorAction::Duplicate => self.duplicate_selection(),
            EditorAction::SelectAll => self.select_all(),
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
        }
    }

    /// Snap resolution for drawing-tool geometry. The ruler wins where it
    /// reaches; the grid catches the rest when enabled.
    fn snap_point(&self, scene_pos: [f32; 2]) -> [f32; 2] {
        let ruler = if self.tool.is_drawing() {
            self.ruler.as_ref()
        } else {
            None
        };
        geometry::apply_snap(scene_pos, ruler, self.grid_snap, self.options.grid_size)
    }

    /// Deletes the top-most element under the point, one history entry per
    /// deletion.
    fn erase_at(&mut self, scene_pos: [f32; 2]) {
        if let Some(id) = self.element_at(scene_pos) {
            if self.scene.remove(id).is_ok() {
                self.selection.remove_id(id);
                self.commit();
            }
        }
    }

    /// Builds and commits the final shape of a two-point drag, discarding
    /// results under the minimum size. Lines and arrows have no minimum.
    fn finish_drag_shape(&mut self, anchor: [f32; 2], current: [f32; 2]) {
        let min = self.options.min_shape_size;
        let shape = match self.tool {
            Tool::Rectangle => {
                let width = (current[0] - anchor[0]).abs();
                let height = (current[1] - anchor[1]).abs();
                if width < min || height < min {
                    return;
                }
                Shape::Rectangle {
                    x: anchor[0].min(current[0]),
                    y: anchor[1].min(current[1]),
                    width,
                    height,
                }
            }
            Tool::Circle => {
                let radius = dist(anchor, current);
                if radius < min {
                    return;
                }
                Shape::Circle {
                    x: anchor[0],
                    y: anchor[1],
                    radius,
                }
            }
            Tool::Line => Shape::Line {
                x1: anchor[0],
                y1: anchor[1],
                x2: current[0],
                y2: current[1],
            },
            Tool::Arrow => Shape::Arrow {
                x1: anchor[0],
                y1: anchor[1],
                x2: current[0],
                y2: current[1],
            },
            _ => return,
        };
        let element = Element::new(self.current_color, self.current_stroke_width, shape);
        if self.scene.insert(element).is_ok() {
            self.commit();
        }
    }

    fn drag_preview_shape(&self, anchor: [f32; 2], current: [f32; 2]) -> Option<Shape> {
        match self.tool {
            Tool::Rectangle => Some(Shape::Rectangle {
                x: anchor[0].min(current[0]),
                y: anchor[1].min(current[1]),
                width: (current[0] - anchor[0]).abs(),
                height: (current[1] - anchor[1]).abs(),
            }),
            Tool::Circle => Some(Shape::Circle {
                x: anchor[0],
                y: anchor[1],
                radius: dist(anchor, current),
            }),
            Tool::Line => Some(Shape::Line {
                x1: anchor[0],
                y1: anchor[1],
                x2: current[0],
                y2: current[1],
            }),
            Tool::Arrow => Some(Shape::Arrow {
                x1: anchor[0],
                y1: anchor[1],
                x2: current[0],
                y2: current[1],
            }),
            _ => None,
        }
    }

    fn create_text(&mut self, pos: [f32; 2]) {
        let element = Element::new(
            self.current_color,
            self.current_stroke_width,
            Shape::Text {
                x: pos[0],
                y: pos[1],
                text: TEXT_PLACEHOLDER.to_string(),
                font_size: self.current_font_size,
            },
        );
        if self.scene.insert(element).is_ok() {
            self.commit();
        }
    }

    fn create_sticky(&mut self, pos: [f32; 2]) {
        let size = self.options.sticky_size;
        let element = Element::new(
            self.current_color,
            self.current_stroke_width,
            Shape::StickyNote {
                x: pos[0],
                y: pos[1],
                width: size[0],
                height: size[1],
                text: STICKY_PLACEHOLDER.to_string(),
                priority: StickyPriority::Normal,
                created_at: timestamp_string(),
            },
        );
        if self.scene.insert(element).is_ok() {
            self.commit();
        }
    }
}

/// Milliseconds since the epoch, matching the host's document timestamps.
fn timestamp_string() -> String {
    let ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    ms.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EditorOptions;

    fn editor() -> CanvasEditor {
        CanvasEditor::new()
    }

    fn drag(editor: &mut CanvasEditor, tool: Tool, from: [f32; 2], to: [f32; 2]) {
        editor.set_tool(tool);
        editor.pointer_down(from);
        editor.pointer_move(to);
        editor.pointer_up(to);
    }

    #[test]
    fn rectangle_drag_creates_a_normalized_rectangle() {
        let mut editor = editor();
        drag(&mut editor, Tool::Rectangle, [100.0, 100.0], [40.0, 60.0]);

        assert_eq!(editor.elements().len(), 1);
        match &editor.elements()[0].shape {
            Shape::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                assert_eq!((*x, *y), (40.0, 60.0));
                assert_eq!((*width, *height), (60.0, 40.0));
            }
            other => panic!("unexpected shape: {:?}", other),
        }
        assert_eq!(editor.tool(), Tool::Select);
        assert_eq!(editor.history_depth(), 2);
    }

    #[test]
    fn undersized_shapes_are_discarded_without_a_commit() {
        let mut editor = editor();
        drag(&mut editor, Tool::Rectangle, [0.0, 0.0], [3.0, 3.0]);

        assert!(editor.elements().is_empty());
        assert_eq!(editor.history_depth(), 1);
        assert_eq!(editor.tool(), Tool::Select);
    }

    #[test]
    fn lines_and_arrows_have_no_minimum_size() {
        let mut editor = editor();
        drag(&mut editor, Tool::Line, [0.0, 0.0], [2.0, 2.0]);
        drag(&mut editor, Tool::Arrow, [5.0, 5.0], [6.0, 5.0]);

        assert_eq!(editor.elements().len(), 2);
        assert_eq!(editor.history_depth(), 3);
    }

    #[test]
    fn circle_drag_uses_anchor_center_and_drag_radius() {
        let mut editor = editor();
        drag(&mut editor, Tool::Circle, [50.0, 50.0], [70.0, 50.0]);

        match &editor.elements()[0].shape {
            Shape::Circle { x, y, radius } => {
                assert_eq!((*x, *y), (50.0, 50.0));
                assert!((radius - 20.0).abs() < 0.001);
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn freehand_needs_at_least_two_points() {
        let mut editor = editor();
        editor.set_tool(Tool::Draw);
        editor.pointer_down([10.0, 10.0]);
        editor.pointer_up([10.0, 10.0]);

        assert!(editor.elements().is_empty());
        assert_eq!(editor.history_depth(), 1);
    }

    #[test]
    fn freehand_points_snap_to_the_grid_when_enabled() {
        let mut editor = editor();
        editor.toggle_grid_snap();
        editor.set_tool(Tool::Draw);
        editor.pointer_down([23.0, 8.0]);
        editor.pointer_move([30.0, 31.0]);
        editor.pointer_move([52.0, 48.0]);
        editor.pointer_up([52.0, 48.0]);

        match &editor.elements()[0].shape {
            Shape::Path { points } => {
                assert_eq!(points, &vec![[20.0, 0.0], [40.0, 40.0], [60.0, 40.0]]);
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn ruler_snap_beats_grid_snap_while_drawing() {
        let mut editor = editor();
        editor.toggle_grid_snap();
        editor.toggle_ruler();
        editor.set_tool(Tool::Draw);
        editor.pointer_down([300.0, 210.0]);
        editor.pointer_move([350.0, 190.0]);
        editor.pointer_up([350.0, 190.0]);

        match &editor.elements()[0].shape {
            Shape::Path { points } => {
                assert_eq!(points[0], [300.0, 200.0]);
                assert_eq!(points[1], [350.0, 200.0]);
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn select_click_picks_the_topmost_element() {
        let mut editor = editor();
        drag(&mut editor, Tool::Rectangle, [0.0, 0.0], [100.0, 100.0]);
        drag(&mut editor, Tool::Rectangle, [10.0, 10.0], [90.0, 90.0]);
        let top_id = editor.elements()[1].id;

        editor.pointer_down([50.0, 50.0]);
        editor.pointer_up([50.0, 50.0]);
        assert_eq!(editor.selected_ids(), vec![top_id]);
    }

    #[test]
    fn element_drag_commits_once_and_keeps_the_grab_offset() {
        let mut editor = editor();
        drag(&mut editor, Tool::Rectangle, [10.0, 10.0], [60.0, 60.0]);
        let depth_before = editor.history_depth();

        editor.pointer_down([30.0, 20.0]);
        editor.pointer_move([80.0, 90.0]);
        editor.pointer_up([80.0, 90.0]);

        match &editor.elements()[0].shape {
            Shape::Rectangle { x, y, .. } => {
                assert_eq!((*x, *y), (60.0, 80.0));
            }
            other => panic!("unexpected shape: {:?}", other),
        }
        assert_eq!(editor.history_depth(), depth_before + 1);
    }

    #[test]
    fn click_without_movement_selects_but_never_commits() {
        let mut editor = editor();
        drag(&mut editor, Tool::Rectangle, [10.0, 10.0], [60.0, 60.0]);
        let depth_before = editor.history_depth();

        editor.pointer_down([30.0, 20.0]);
        editor.pointer_up([30.0, 20.0]);

        assert_eq!(editor.selected_ids().len(), 1);
        assert_eq!(editor.history_depth(), depth_before);
    }

    #[test]
    fn empty_click_pans_with_clamping_and_no_commit() {
        let mut editor = editor();
        editor.pointer_down([50.0, 50.0]);
        editor.pointer_move([80.0, 100.0]);
        assert_eq!(editor.camera().pan, [0.0, 0.0]);

        editor.pointer_move([10.0, 20.0]);
        assert_eq!(editor.camera().pan, [-40.0, -30.0]);

        editor.pointer_up([10.0, 20.0]);
        assert_eq!(editor.history_depth(), 1);
    }

    #[test]
    fn picking_accounts_for_the_camera_zoom() {
        let mut editor = editor();
        drag(&mut editor, Tool::Rectangle, [100.0, 100.0], [200.0, 200.0]);
        editor.zoom_to(2.0);

        // Device (300, 300) maps to scene (150, 150), inside the rectangle.
        editor.pointer_down([300.0, 300.0]);
        editor.pointer_up([300.0, 300.0]);
        assert_eq!(editor.selected_ids().len(), 1);
    }

    #[test]
    fn eraser_contact_deletes_and_commits_exactly_once() {
        let mut editor = editor();
        drag(&mut editor, Tool::Circle, [50.0, 50.0], [70.0, 50.0]);
        let depth_before = editor.history_depth();

        editor.set_tool(Tool::Eraser);
        editor.pointer_down([55.0, 50.0]);
        editor.pointer_up([55.0, 50.0]);

        assert!(editor.elements().is_empty());
        assert_eq!(editor.history_depth(), depth_before + 1);
    }

    #[test]
    fn continuous_erasing_commits_per_deleted_element() {
        let mut editor = editor();
        drag(&mut editor, Tool::Circle, [50.0, 50.0], [60.0, 50.0]);
        drag(&mut editor, Tool::Circle, [200.0, 50.0], [210.0, 50.0]);
        let depth_before = editor.history_depth();

        editor.set_tool(Tool::Eraser);
        editor.pointer_down([50.0, 50.0]);
        editor.pointer_move([120.0, 50.0]);
        editor.pointer_move([200.0, 50.0]);
        editor.pointer_up([200.0, 50.0]);

        assert!(editor.elements().is_empty());
        assert_eq!(editor.history_depth(), depth_before + 2);
    }

    #[test]
    fn ruler_grab_wins_over_the_element_underneath() {
        let mut editor = editor();
        drag(&mut editor, Tool::Rectangle, [250.0, 150.0], [450.0, 250.0]);
        editor.toggle_ruler();
        let depth_before = editor.history_depth();

        editor.pointer_down([400.0, 200.0]);
        editor.pointer_move([400.0, 300.0]);
        editor.pointer_up([400.0, 300.0]);

        assert!(editor.selected_ids().is_empty());
        assert_eq!(editor.ruler().unwrap().anchor, [200.0, 300.0]);
        assert_eq!(editor.history_depth(), depth_before);
    }

    #[test]
    fn text_tool_creates_immediately_and_reverts() {
        let mut editor = editor();
        editor.set_tool(Tool::Text);
        editor.pointer_down([10.0, 20.0]);

        assert_eq!(editor.tool(), Tool::Select);
        assert_eq!(editor.history_depth(), 2);
        match &editor.elements()[0].shape {
            Shape::Text {
                x, y, font_size, ..
            } => {
                assert_eq!((*x, *y), (10.0, 20.0));
                assert_eq!(*font_size, 32.0);
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn sticky_notes_carry_fixed_size_and_defaults() {
        let mut editor = editor();
        editor.set_tool(Tool::StickyNote);
        editor.pointer_down([100.0, 100.0]);

        match &editor.elements()[0].shape {
            Shape::StickyNote {
                width,
                height,
                priority,
                created_at,
                ..
            } => {
                assert_eq!((*width, *height), (200.0, 180.0));
                assert_eq!(*priority, StickyPriority::Normal);
                assert!(created_at.parse::<u128>().is_ok());
            }
            other => panic!("unexpected shape: {:?}", other),
        }
        assert_eq!(editor.tool(), Tool::Select);
    }

    #[test]
    fn double_click_edits_text_and_commit_updates_it() {
        let mut editor = editor();
        editor.set_tool(Tool::Text);
        editor.pointer_down([10.0, 20.0]);
        let depth_before = editor.history_depth();

        let id = editor.double_click([50.0, 20.0]).unwrap();
        assert!(editor.is_editing_text());

        // Pointer input is suppressed while the edit form is open.
        editor.pointer_down([500.0, 500.0]);
        assert!(editor.selected_ids().is_empty());

        editor.apply_text_edit("updated");
        assert!(!editor.is_editing_text());
        assert_eq!(editor.history_depth(), depth_before + 1);
        match &editor.scene().get(id).unwrap().shape {
            Shape::Text { text, .. } => assert_eq!(text, "updated"),
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn shortcuts_are_suppressed_while_editing_text() {
        let mut editor = editor();
        editor.set_tool(Tool::Text);
        editor.pointer_down([10.0, 20.0]);
        editor.double_click([50.0, 20.0]).unwrap();
        let depth_before = editor.history_depth();

        editor.handle_key(
            Key::Char('z'),
            Modifiers {
                command: true,
                shift: false,
            },
        );
        assert_eq!(editor.history_depth(), depth_before);
        assert_eq!(editor.elements().len(), 1);

        editor.cancel_text_edit();
        editor.handle_key(
            Key::Char('z'),
            Modifiers {
                command: true,
                shift: false,
            },
        );
        assert!(editor.elements().is_empty());
    }

    #[test]
    fn undo_then_redo_restores_states_exactly() {
        let mut editor = editor();
        drag(&mut editor, Tool::Rectangle, [0.0, 0.0], [50.0, 50.0]);
        drag(&mut editor, Tool::Circle, [100.0, 100.0], [130.0, 100.0]);
        let full = editor.scene().snapshot();

        editor.undo();
        assert_eq!(editor.elements().len(), 1);
        editor.undo();
        assert!(editor.elements().is_empty());
        editor.undo();
        assert!(editor.elements().is_empty());

        editor.redo();
        editor.redo();
        assert_eq!(editor.scene().snapshot(), full);
    }

    #[test]
    fn committing_after_undo_discards_the_redo_branch() {
        let mut editor = editor();
        drag(&mut editor, Tool::Rectangle, [0.0, 0.0], [50.0, 50.0]);
        drag(&mut editor, Tool::Rectangle, [100.0, 0.0], [150.0, 50.0]);

        editor.undo();
        drag(&mut editor, Tool::Circle, [200.0, 200.0], [230.0, 200.0]);

        assert!(!editor.can_redo());
        editor.redo();
        assert_eq!(editor.elements().len(), 2);
    }

    #[test]
    fn switching_tools_mid_gesture_rolls_back_the_live_scene() {
        let mut editor = editor();
        drag(&mut editor, Tool::Rectangle, [10.0, 10.0], [60.0, 60.0]);

        editor.pointer_down([30.0, 20.0]);
        editor.pointer_move([200.0, 200.0]);
        editor.set_tool(Tool::Draw);

        match &editor.elements()[0].shape {
            Shape::Rectangle { x, y, .. } => assert_eq!((*x, *y), (10.0, 10.0)),
            other => panic!("unexpected shape: {:?}", other),
        }
        assert_eq!(editor.history_depth(), 2);
    }

    #[test]
    fn preview_tracks_the_drag_without_touching_the_scene() {
        let mut editor = editor();
        editor.set_tool(Tool::Rectangle);
        editor.pointer_down([10.0, 10.0]);
        editor.pointer_move([40.0, 30.0]);

        match editor.preview() {
            Some(Shape::Rectangle { width, height, .. }) => {
                assert_eq!((width, height), (30.0, 20.0));
            }
            other => panic!("unexpected preview: {:?}", other),
        }
        assert!(editor.elements().is_empty());
    }

    #[test]
    fn action_dispatch_covers_view_and_toggle_surface() {
        let mut editor = editor();
        editor.apply_action(EditorAction::ToggleGridSnap);
        assert!(editor.grid_snap_enabled());

        editor.apply_action(EditorAction::ZoomTo(2.0));
        assert_eq!(editor.camera().zoom, 2.0);

        editor.apply_action(EditorAction::ZoomIn);
        assert!((editor.camera().zoom - 2.2).abs() < 0.001);

        editor.apply_action(EditorAction::ResetView);
        assert_eq!(editor.camera().zoom, 1.0);
        assert_eq!(editor.camera().pan, [0.0, 0.0]);

        editor.apply_action(EditorAction::ToggleRuler);
        assert!(editor.ruler().is_some());
        editor.apply_action(EditorAction::ToggleRuler);
        assert!(editor.ruler().is_none());
    }

    #[test]
    fn editor_options_tune_the_gesture_thresholds() {
        let mut editor = CanvasEditor::from_payload(
            None,
            EditorOptions {
                min_shape_size: 10.0,
                ..EditorOptions::default()
            },
        );
        drag(&mut editor, Tool::Rectangle, [0.0, 0.0], [8.0, 8.0]);
        assert!(editor.elements().is_empty());

        drag(&mut editor, Tool::Rectangle, [0.0, 0.0], [12.0, 12.0]);
        assert_eq!(editor.elements().len(), 1);
    }
}
