use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutKey {
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl ShortcutKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Self::ArrowLeft),
            "ArrowRight" | "Right" => Some(Self::ArrowRight),
            "Escape" | "Esc" => Some(Self::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ViewerRetreat,
    ViewerAdvance,
    ViewerDismiss,
}

fn resolve_viewer_shortcut(key: ShortcutKey) -> ShortcutAction {
    match key {
        ShortcutKey::ArrowLeft => ShortcutAction::ViewerRetreat,
        ShortcutKey::ArrowRight => ShortcutAction::ViewerAdvance,
        ShortcutKey::Escape => ShortcutAction::ViewerDismiss,
    }
}

/// Keys are only meaningful while the viewer overlay is showing.
pub fn resolve_shortcut(key: ShortcutKey, viewer_open: bool) -> Option<ShortcutAction> {
    if !viewer_open {
        return None;
    }
    Some(resolve_viewer_shortcut(key))
}
