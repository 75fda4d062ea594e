//! The editor aggregate: one instance owns the scene, history, camera,
//! tool state and persistence hooks for a single mounted canvas.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::autosave::AutosaveTimer;
use crate::camera::Camera;
use crate::drawing::{Element, ElementId, ElementPatch, Shape, Tool};
use crate::export;
use crate::history::History;
use crate::ruler::{Ruler, RulerDrag};
use crate::scene::Scene;
use crate::serialization;
use crate::state::{EditorOptions, Gesture, Selection};

/// Receives the serialized scene on every save. The flag asks the host to
/// close the editor after an explicit save. Returning `false` rejects the
/// payload; the editor stays dirty and retries after the next debounce.
pub type SaveCallback = Box<dyn FnMut(&str, bool) -> bool>;

pub struct CanvasEditor {
    pub(crate) scene: Scene,
    pub(crate) history: History,
    pub(crate) camera: Camera,
    pub(crate) selection: Selection,
    pub(crate) clipboard: Vec<Element>,
    pub(crate) tool: Tool,
    pub(crate) gesture: Gesture,
    pub(crate) ruler: Option<Ruler>,
    pub(crate) ruler_drag: RulerDrag,
    pub(crate) grid_snap: bool,
    pub(crate) show_minimap: bool,
    pub(crate) show_shortcuts: bool,
    pub(crate) current_color: [f32; 4],
    pub(crate) current_stroke_width: f32,
    pub(crate) current_font_size: f32,
    pub(crate) editing_text: Option<ElementId>,
    pub(crate) autosave: AutosaveTimer,
    pub(crate) dirty: bool,
    pub(crate) on_save: Option<SaveCallback>,
    pub(crate) options: EditorOptions,
}

impl CanvasEditor {
    pub fn new() -> Self {
        Self::from_payload(None, EditorOptions::default())
    }

    /// Mounts an editor over an optional host payload. A malformed payload
    /// falls back to an empty scene rather than failing the mount.
    pub fn from_payload(payload: Option<&str>, options: EditorOptions) -> Self {
        let scene = serialization::load_scene(payload);
        let history = History::new(scene.snapshot());
        let autosave = AutosaveTimer::new(options.autosave_delay);
        Self {
            scene,
            history,
            camera: Camera::new(),
            selection: Selection::default(),
            clipboard: Vec::new(),
            tool: Tool::Select,
            gesture: Gesture::Idle,
            ruler: None,
            ruler_drag: RulerDrag::Idle,
            grid_snap: false,
            show_minimap: false,
            show_shortcuts: false,
            current_color: [0.0, 0.0, 0.0, 1.0],
            current_stroke_width: 2.0,
            current_font_size: 32.0,
            editing_text: None,
            autosave,
            dirty: false,
            on_save: None,
            options,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn elements(&self) -> &[Element] {
        self.scene.elements()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches the active tool. An in-progress gesture is abandoned and any
    /// uncommitted live mutation is rolled back to the last committed state.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.gesture.is_active() {
            self.scene.restore(self.history.current());
            self.gesture = Gesture::Idle;
        }
        self.ruler_drag = RulerDrag::Idle;
        self.tool = tool;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_ids(&self) -> Vec<ElementId> {
        self.selection.ids()
    }

    pub fn ruler(&self) -> Option<&Ruler> {
        self.ruler.as_ref()
    }

    pub fn grid_snap_enabled(&self) -> bool {
        self.grid_snap
    }

    pub fn toggle_grid_snap(&mut self) {
        self.grid_snap = !self.grid_snap;
    }

    /// Toggling on places a fresh default ruler; toggling off discards it
    /// along with any drag in progress.
    pub fn toggle_ruler(&mut self) {
        if self.ruler.take().is_none() {
            self.ruler = Some(Ruler::default_placement());
        }
        self.ruler_drag = RulerDrag::Idle;
    }

    pub fn minimap_shown(&self) -> bool {
        self.show_minimap
    }

    pub fn toggle_minimap(&mut self) {
        self.show_minimap = !self.show_minimap;
    }

    pub fn shortcut_help_shown(&self) -> bool {
        self.show_shortcuts
    }

    pub fn toggle_shortcut_help(&mut self) {
        self.show_shortcuts = !self.show_shortcuts;
    }

    pub fn set_color(&mut self, color: [f32; 4]) {
        self.current_color = color;
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.current_stroke_width = width;
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.current_font_size = size;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub(crate) fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// Records the live scene as a new history state and schedules a save.
    pub(crate) fn commit(&mut self) {
        self.history.commit(self.scene.snapshot());
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
        self.autosave.rearm(Instant::now());
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.scene.restore(snapshot);
        } else {
            return;
        }
        self.selection.clear();
        self.mark_dirty();
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.scene.restore(snapshot);
        } else {
            return;
        }
        self.selection.clear();
        self.mark_dirty();
    }

    /// Empties the scene as a single undoable step. Already-empty scenes are
    /// left untouched so no-op clears do not pollute history.
    pub fn clear_canvas(&mut self) {
        if self.scene.is_empty() {
            return;
        }
        self.scene.clear();
        self.selection.clear();
        self.commit();
    }

    /// Deletes every selected element in one undoable step.
    pub fn delete_selection(&mut self) {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return;
        }
        let mut removed = false;
        for id in ids {
            if self.scene.remove(id).is_ok() {
                removed = true;
            }
            self.selection.remove_id(id);
        }
        if removed {
            self.commit();
        }
    }

    /// Deep-copies the selection into the clipboard, keeping scene order so
    /// a paste preserves relative stacking.
    pub fn copy_selection(&mut self) {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return;
        }
        self.clipboard = self
            .scene
            .elements()
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect();
    }

    /// Inserts fresh-id copies of the clipboard, offset down-right, and
    /// makes them the new selection. One history entry per paste.
    pub fn paste(&mut self) {
        if self.clipboard.is_empty() {
            return;
        }
        let offset = self.options.paste_offset;
        let mut pasted = std::collections::HashSet::new();
        for source in self.clipboard.clone() {
            let mut element = source;
            element.id = ElementId::fresh();
            element.shape = element.shape.translated(offset, offset);
            pasted.insert(element.id);
            if let Err(err) = self.scene.insert(element) {
                log::warn!("paste skipped an element: {}", err);
            }
        }
        self.selection.primary = None;
        self.selection.multi = pasted;
        self.commit();
    }

    pub fn duplicate_selection(&mut self) {
        self.copy_selection();
        self.paste();
    }

    pub fn select_all(&mut self) {
        self.selection.primary = None;
        self.selection.multi = self.scene.elements().iter().map(|e| e.id).collect();
    }

    /// Adds an uploaded image at the given scene position and commits.
    pub fn insert_image(&mut self, data: String, position: [f32; 2], size: [f32; 2]) {
        let element = Element::new(
            self.current_color,
            self.current_stroke_width,
            Shape::Image {
                x: position[0],
                y: position[1],
                width: size[0],
                height: size[1],
                data,
            },
        );
        if let Err(err) = self.scene.insert(element) {
            log::warn!("image insert skipped: {}", err);
            return;
        }
        self.commit();
    }

    pub fn is_editing_text(&self) -> bool {
        self.editing_text.is_some()
    }

    /// Opens the text-edit affordance for a text or sticky-note element.
    /// Pointer and keyboard shortcuts are suppressed until the edit ends.
    pub fn begin_text_edit(&mut self, id: ElementId) -> bool {
        let editable = matches!(
            self.scene.get(id).map(|e| &e.shape),
            Some(Shape::Text { .. }) | Some(Shape::StickyNote { .. })
        );
        if editable {
            self.editing_text = Some(id);
        }
        editable
    }

    pub fn cancel_text_edit(&mut self) {
        self.editing_text = None;
    }

    /// Confirms the open edit, writing the new text and committing.
    pub fn apply_text_edit(&mut self, new_text: &str) {
        let Some(id) = self.editing_text.take() else {
            return;
        };
        let Some(element) = self.scene.get(id) else {
            return;
        };
        let mut shape = element.shape.clone();
        match shape.text_mut() {
            Some(text) => *text = new_text.to_string(),
            None => return,
        }
        if self.scene.update(id, ElementPatch::shape(shape)).is_ok() {
            self.commit();
        }
    }

    pub fn set_save_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&str, bool) -> bool + 'static,
    {
        self.on_save = Some(Box::new(callback));
    }

    /// Explicit save; `close` is forwarded to the host callback so it can
    /// dismiss the editor afterwards.
    pub fn save_now(&mut self, close: bool) {
        self.run_save(close);
    }

    /// Drives the debounced auto-save. Hosts call this from their tick with
    /// the current time; the save runs once the timer fires while dirty.
    pub fn poll_autosave(&mut self, now: Instant) {
        if self.autosave.fire(now) && self.dirty {
            self.run_save(false);
        }
    }

    pub(crate) fn autosave_armed(&self) -> bool {
        self.autosave.is_armed()
    }

    fn run_save(&mut self, close: bool) {
        let payload = match serialization::encode_scene(&self.scene) {
            Ok(payload) => payload,
            Err(err) => {
                log::error!("canvas save skipped: {}", err);
                return;
            }
        };
        let Some(callback) = self.on_save.as_mut() else {
            log::debug!("no save callback registered; scene stays dirty");
            return;
        };
        if callback(&payload, close) {
            self.dirty = false;
            self.autosave.cancel();
        } else {
            log::warn!("save callback rejected the payload; retrying after the next debounce");
            self.autosave.rearm(Instant::now());
        }
    }

    pub fn zoom_in(&mut self) {
        self.camera.set_zoom(self.camera.zoom * 1.1);
    }

    pub fn zoom_out(&mut self) {
        self.camera.set_zoom(self.camera.zoom * 0.9);
    }

    pub fn zoom_to(&mut self, zoom: f32) {
        self.camera.set_zoom(zoom);
    }

    /// Wheel zoom anchored at the pointer's device position.
    pub fn zoom_at(&mut self, device_pos: [f32; 2], factor: f32) {
        self.camera.zoom_at(device_pos, factor);
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    /// PNG bytes of the whole virtual canvas, independent of the camera.
    pub fn export_png(&self) -> anyhow::Result<Vec<u8>> {
        export::export_png(&self.scene)
    }

    /// Writes the PNG export into `dir` under its fixed download name.
    pub fn write_export(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        export::write_export(&self.scene, dir)
    }
}

impl Default for CanvasEditor {
    fn default() -> Self {
        Self::new()
    }
}
