mod autosave;
mod camera;
mod drawing;
mod editor;
mod event_handler;
mod export;
mod geometry;
mod history;
mod keymap;
mod ruler;
mod scene;
mod serialization;
mod state;

// Re-export the main public interface
pub use camera::Camera;
pub use drawing::{Element, ElementId, ElementPatch, Shape, StickyPriority, Tool};
pub use editor::{CanvasEditor, SaveCallback};
pub use export::{
    export_png, render_scene, write_export, EXPORT_FILE_NAME, EXPORT_HEIGHT, EXPORT_WIDTH,
};
pub use keymap::{action_for_key, EditorAction, Key, Modifiers};
pub use ruler::{Ruler, RulerZone};
pub use scene::{Scene, SceneError};
pub use serialization::{decode_scene, encode_scene, load_scene, PayloadError};
pub use state::{EditorOptions, Selection};
