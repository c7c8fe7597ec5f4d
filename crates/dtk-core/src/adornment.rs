//! Tool-owned decorations attached to parts.

use crate::geometry::{Point, Rect, Size};
use crate::id::PartId;
use smallvec::SmallVec;

/// Pointer cursor requested while hovering or dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Move,
    SeResize,
}

impl Cursor {
    /// CSS cursor keyword.
    pub fn css(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Move => "move",
            Cursor::SeResize => "se-resize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Figure {
    Rectangle,
    Circle,
    Diamond,
}

/// A named, hit-testable marker inside an adornment.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    pub name: &'static str,
    pub figure: Figure,
    /// Center of the handle in document coordinates.
    pub center: Point,
    pub size: Size,
    pub cursor: Cursor,
}

impl Handle {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    pub fn contains(&self, p: Point) -> bool {
        let b = self.bounds();
        p.x >= b.x0 && p.x <= b.x1 && p.y >= b.y0 && p.y <= b.y1
    }
}

/// Decoration built by a tool for one part: a placeholder covering the
/// adorned object plus the tool's handles.
#[derive(Debug, Clone, PartialEq)]
pub struct Adornment {
    pub adorned: PartId,
    /// Owning tool's name.
    pub category: String,
    /// Document point the adornment is centered on.
    pub location: Point,
    /// Size of the adorned object.
    pub placeholder: Size,
    pub handles: SmallVec<[Handle; 3]>,
}

impl Adornment {
    pub fn find_handle(&self, name: &str) -> Option<&Handle> {
        self.handles.iter().find(|h| h.name == name)
    }

    /// Topmost handle containing `p` (last added wins).
    pub fn handle_at(&self, p: Point) -> Option<&Handle> {
        self.handles.iter().rev().find(|h| h.contains(p))
    }
}
