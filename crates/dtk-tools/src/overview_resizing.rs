//! Resizing the viewport box of an overview.
//!
//! The overview's box always mirrors the observed diagram's viewport, so
//! "resizing the box" really means zooming the observed diagram until its
//! viewport matches the dragged size. The box keeps its top-left corner;
//! the single handle sits on the bottom-right corner.

use crate::tool::{Tool, ToolFlow};
use dtk_core::adornment::{Adornment, Cursor, Figure, Handle};
use dtk_core::diagram::{Diagram, Part};
use dtk_core::geometry::{Rect, Size, Spot, is_real};
use dtk_core::id::PartId;
use smallvec::smallvec;

pub const OVERVIEW_RESIZING: &str = "OverviewResizing";
pub const RESIZE_HANDLE: &str = "RSZHND";

/// Handle side is three box strokes, so it stays proportional to the
/// stroke whatever the overview zoom.
pub fn handle_size(stroke_width: f64) -> Size {
    Size::new(stroke_width * 3.0, stroke_width * 3.0)
}

/// Adornment for the viewport box: a placeholder over the box and one
/// resize handle centered on its bottom-right corner.
pub fn build_adornment(viewport_box: &Part, category: &str) -> Adornment {
    let bounds = viewport_box.bounds;
    Adornment {
        adorned: viewport_box.id,
        category: category.to_string(),
        location: bounds.center(),
        placeholder: bounds.size(),
        handles: smallvec![Handle {
            name: RESIZE_HANDLE,
            figure: Figure::Rectangle,
            center: Spot::BOTTOM_RIGHT.point_in(bounds),
            size: handle_size(viewport_box.stroke_width),
            cursor: Cursor::SeResize,
        }],
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Session {
    Idle,
    Dragging {
        part: PartId,
        original_bounds: Rect,
        /// Observed scale at drag start; `None` without an observed diagram.
        original_scale: Option<f64>,
    },
}

pub struct OverviewResizingTool {
    name: String,
    enabled: bool,
    session: Session,
}

impl Default for OverviewResizingTool {
    fn default() -> Self {
        Self::new()
    }
}

impl OverviewResizingTool {
    pub fn new() -> Self {
        Self {
            name: OVERVIEW_RESIZING.to_string(),
            enabled: true,
            session: Session::Idle,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Zoom the observed diagram so its viewport takes the size of
    /// `new_bounds`. Only size changes count, and both dimensions must be
    /// positive. Returns whether a new scale was applied.
    pub fn resize(&self, diagram: &Diagram, new_bounds: Rect) -> bool {
        let Some(observed) = diagram.observed.as_ref() else {
            return false;
        };
        let mut observed = observed.borrow_mut();
        let old = observed.viewport_bounds();
        let (new_w, new_h) = (new_bounds.width(), new_bounds.height());
        if old.width() == new_w && old.height() == new_h {
            return false;
        }
        if new_w <= 0.0 || new_h <= 0.0 {
            return false;
        }
        let old_scale = observed.scale();
        let new_scale = old_scale * (old.width() / new_w).min(old.height() / new_h);
        log::trace!("{}: observed scale {old_scale} -> {new_scale}", self.name);
        observed.set_scale(new_scale)
    }

    fn drag_to_pointer(&mut self, diagram: &mut Diagram) {
        let Session::Dragging {
            part,
            original_bounds,
            ..
        } = self.session
        else {
            return;
        };
        let p = diagram.last_input.document_point;
        let new_bounds = Rect::new(original_bounds.x0, original_bounds.y0, p.x, p.y);
        if self.resize(diagram, new_bounds) {
            diagram.refresh_overview_box();
            self.update_adornments(diagram, part);
        }
    }
}

impl Tool for OverviewResizingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_active(&self) -> bool {
        matches!(self.session, Session::Dragging { .. })
    }

    fn can_start(&self, diagram: &Diagram) -> bool {
        self.enabled
            && !diagram.is_read_only
            && diagram.allow_resize
            && diagram
                .find_tool_handle_at(diagram.first_input.document_point, &self.name)
                .is_some()
    }

    fn do_activate(&mut self, diagram: &mut Diagram) {
        let Some(hit) = diagram.find_tool_handle_at(diagram.first_input.document_point, &self.name)
        else {
            log::debug!("{}: no handle under pointer, not activating", self.name);
            return;
        };
        let Some(part) = diagram.part(hit.part) else {
            return;
        };
        let original_scale = diagram.observed.as_ref().map(|o| o.borrow().scale());
        self.session = Session::Dragging {
            part: hit.part,
            original_bounds: part.bounds,
            original_scale,
        };
        log::debug!("{}: activated on {:?}", self.name, hit.part);
    }

    fn do_deactivate(&mut self, _diagram: &mut Diagram) {
        self.session = Session::Idle;
        log::debug!("{}: deactivated", self.name);
    }

    fn do_cancel(&mut self, diagram: &mut Diagram) -> ToolFlow {
        if let Session::Dragging {
            part,
            original_scale: Some(scale),
            ..
        } = self.session
        {
            if let Some(observed) = diagram.observed.as_ref() {
                observed.borrow_mut().set_scale(scale);
            }
            diagram.refresh_overview_box();
            self.update_adornments(diagram, part);
            log::debug!("{}: cancelled, observed scale restored to {scale}", self.name);
        }
        ToolFlow::Stop
    }

    fn do_mouse_move(&mut self, diagram: &mut Diagram) -> ToolFlow {
        self.drag_to_pointer(diagram);
        ToolFlow::Continue
    }

    fn do_mouse_up(&mut self, diagram: &mut Diagram) -> ToolFlow {
        self.drag_to_pointer(diagram);
        ToolFlow::Stop
    }

    fn update_adornments(&mut self, diagram: &mut Diagram, part: PartId) {
        // only the overview's own box is resizable by this tool
        if diagram.overview_box() != Some(part) {
            return;
        }
        let adornment = match diagram.part(part) {
            Some(p) if p.is_selected && !diagram.is_read_only && is_real(p.bounds) => {
                Some(build_adornment(p, &self.name))
            }
            Some(_) => None,
            None => return,
        };
        match adornment {
            Some(ad) => diagram.add_adornment(ad),
            None => {
                diagram.remove_adornment(part, &self.name);
            }
        }
    }
}
