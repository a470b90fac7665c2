//! Pointer input for scene navigation
//!
//! Window backends translate their native events into [`PointerEvent`]s and
//! feed them to an [`EventHandler`] such as the orbit camera state.

use glam::Vec2;

/// Pointer events in screen pixels (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { position: Vec2, button: MouseButton },
    Release { position: Vec2, button: MouseButton },
    Move { position: Vec2 },
}

/// Mouse button enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Consumer of pointer events. Returns `true` if the view changed.
pub trait EventHandler {
    fn handle_event(&mut self, event: PointerEvent) -> bool;
}
