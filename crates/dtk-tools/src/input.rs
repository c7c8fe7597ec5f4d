//! Input abstraction layer.
//!
//! Normalizes host pointer and keyboard events into `InputEvent`s
//! consumed by the tool manager. Pointer positions are in view (screen)
//! coordinates; the manager converts them to document coordinates.

/// A normalized input event from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved, pressed or not.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Key pressed, as a `KeyboardEvent.key` value (e.g. `"Escape"`).
    Key { key: String },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn key(key: &str) -> Self {
        Self::Key {
            key: key.to_string(),
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some((*x, *y))
            }
            Self::Key { .. } => None,
        }
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Key { key } if key == "Escape")
    }
}
