//! Keyboard shortcut surface: translates host key presses into editor
//! actions. The host decides what counts as the command modifier (Ctrl or
//! Cmd) and feeds the resulting character through unchanged.

use crate::drawing::Tool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub command: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorAction {
    SelectTool(Tool),
    /// The host owns the file picker; it answers this by calling
    /// `CanvasEditor::insert_image` with the picked data.
    RequestImageUpload,
    ToggleGridSnap,
    ToggleRuler,
    ToggleMinimap,
    ToggleShortcutHelp,
    DeleteSelection,
    ZoomIn,
    ZoomOut,
    ZoomTo(f32),
    ResetView,
    Copy,
    Paste,
    Duplicate,
    SelectAll,
    Undo,
    Redo,
}

/// Maps one key press to an action, or `None` for unbound keys.
pub fn action_for_key(key: Key, modifiers: Modifiers) -> Option<EditorAction> {
    match key {
        Key::Delete | Key::Backspace => Some(EditorAction::DeleteSelection),
        Key::Char(c) => {
            let c = c.to_ascii_lowercase();
            if modifiers.command {
                match c {
                    'c' => Some(EditorAction::Copy),
                    'v' => Some(EditorAction::Paste),
                    'd' => Some(EditorAction::Duplicate),
                    'a' => Some(EditorAction::SelectAll),
                    'z' if modifiers.shift => Some(EditorAction::Redo),
                    'z' => Some(EditorAction::Undo),
                    'y' => Some(EditorAction::Redo),
                    _ => None,
                }
            } else {
                match c {
                    'v' => Some(EditorAction::SelectTool(Tool::Select)),
                    'd' => Some(EditorAction::SelectTool(Tool::Draw)),
                    'r' => Some(EditorAction::SelectTool(Tool::Rectangle)),
                    'c' => Some(EditorAction::SelectTool(Tool::Circle)),
                    'l' => Some(EditorAction::SelectTool(Tool::Line)),
                    't' => Some(EditorAction::SelectTool(Tool::Text)),
                    's' => Some(EditorAction::SelectTool(Tool::StickyNote)),
                    'a' => Some(EditorAction::SelectTool(Tool::Arrow)),
                    'e' => Some(EditorAction::SelectTool(Tool::Eraser)),
                    'i' => Some(EditorAction::RequestImageUpload),
                    'g' => Some(EditorAction::ToggleGridSnap),
                    'h' => Some(EditorAction::ToggleRuler),
                    'm' => Some(EditorAction::ToggleMinimap),
                    '?' => Some(EditorAction::ToggleShortcutHelp),
                    // Both forms so hosts need not normalize shift+'='.
                    '+' | '=' => Some(EditorAction::ZoomIn),
                    '-' => Some(EditorAction::ZoomOut),
                    '0' => Some(EditorAction::ResetView),
                    '1' => Some(EditorAction::ZoomTo(1.0)),
                    '2' => Some(EditorAction::ZoomTo(2.0)),
                    _ => None,
                }
            }
        }
    }
}
