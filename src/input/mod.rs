mod gesture;
mod shortcut;

pub use gesture::{classify_drag, DragIntent, GestureInput, GestureKind, NavDirection};
pub use shortcut::{resolve_shortcut, ShortcutAction, ShortcutKey};
