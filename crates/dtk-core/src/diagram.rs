//! Minimal diagram host: parts, view, adornments, and hit testing.
//!
//! Tools see the host only through this type. Parts are kept in paint
//! order, so hit testing walks them back to front (last painted is
//! topmost).

use crate::adornment::{Adornment, Cursor, Handle};
use crate::geometry::{Point, Rect, Size, is_real};
use crate::id::PartId;
use crate::model::Model;
use std::cell::RefCell;
use std::rc::Rc;

/// A placed, selectable diagram element.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub id: PartId,
    /// Document-space bounds.
    pub bounds: Rect,
    pub stroke_width: f64,
    pub is_selected: bool,
}

impl Part {
    pub fn new(id: PartId, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            stroke_width: 1.0,
            is_selected: false,
        }
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }
}

/// Where a pointer event happened, in both coordinate spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub view_point: Point,
    pub document_point: Point,
}

/// A tool handle found under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleHit {
    pub part: PartId,
    pub handle: &'static str,
}

#[derive(Debug)]
pub struct Diagram {
    parts: Vec<Part>,
    adornments: Vec<Adornment>,
    pub model: Model,
    /// Document point shown at the view's top-left corner.
    pub position: Point,
    /// View size in screen pixels.
    pub view_size: Size,
    scale: f64,
    pub is_read_only: bool,
    pub allow_reshape: bool,
    pub allow_resize: bool,
    /// Pointer-down that began the current gesture.
    pub first_input: InputState,
    /// Most recent pointer event.
    pub last_input: InputState,
    pub current_cursor: Cursor,
    /// Diagram shown by this one when it acts as an overview.
    pub observed: Option<Rc<RefCell<Diagram>>>,
    overview_box: Option<PartId>,
}

impl Diagram {
    pub fn new(view_size: Size) -> Self {
        Self {
            parts: Vec::new(),
            adornments: Vec::new(),
            model: Model::default(),
            position: Point::ZERO,
            view_size,
            scale: 1.0,
            is_read_only: false,
            allow_reshape: true,
            allow_resize: true,
            first_input: InputState::default(),
            last_input: InputState::default(),
            current_cursor: Cursor::Default,
            observed: None,
            overview_box: None,
        }
    }

    /// An overview of `observed`: one selected box part that mirrors the
    /// observed viewport.
    pub fn overview(observed: Rc<RefCell<Diagram>>, view_size: Size, box_stroke_width: f64) -> Self {
        let id = PartId::overview_box();
        let mut part = Part::new(id, observed.borrow().viewport_bounds());
        part.stroke_width = box_stroke_width;
        part.is_selected = true;

        let mut diagram = Self::new(view_size);
        diagram.add_part(part);
        diagram.observed = Some(observed);
        diagram.overview_box = Some(id);
        diagram
    }

    // ─── Parts ───────────────────────────────────────────────────────────

    /// Add a part on top of the others, replacing any part with the same id.
    pub fn add_part(&mut self, part: Part) {
        self.parts.retain(|p| p.id != part.id);
        self.parts.push(part);
    }

    pub fn remove_part(&mut self, id: PartId) -> Option<Part> {
        let pos = self.parts.iter().position(|p| p.id == id)?;
        self.adornments.retain(|a| a.adorned != id);
        Some(self.parts.remove(pos))
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub fn part_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.iter_mut().find(|p| p.id == id)
    }

    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Topmost part whose bounds contain `p`.
    pub fn find_part_at(&self, p: Point) -> Option<PartId> {
        self.parts
            .iter()
            .rev()
            .find(|part| {
                let b = part.bounds;
                p.x >= b.x0 && p.x <= b.x1 && p.y >= b.y0 && p.y <= b.y1
            })
            .map(|part| part.id)
    }

    /// Select a part. Callers refresh tool adornments afterwards.
    pub fn select(&mut self, id: PartId) -> bool {
        match self.part_mut(id) {
            Some(part) => {
                part.is_selected = true;
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) -> Vec<PartId> {
        let mut cleared = Vec::new();
        for part in self.parts.iter_mut().filter(|p| p.is_selected) {
            part.is_selected = false;
            cleared.push(part.id);
        }
        cleared
    }

    pub fn selection(&self) -> impl Iterator<Item = PartId> + '_ {
        self.parts.iter().filter(|p| p.is_selected).map(|p| p.id)
    }

    // ─── Adornments ──────────────────────────────────────────────────────

    /// Attach an adornment, replacing one of the same part and category.
    pub fn add_adornment(&mut self, adornment: Adornment) {
        self.adornments
            .retain(|a| !(a.adorned == adornment.adorned && a.category == adornment.category));
        self.adornments.push(adornment);
    }

    pub fn remove_adornment(&mut self, part: PartId, category: &str) -> Option<Adornment> {
        let pos = self
            .adornments
            .iter()
            .position(|a| a.adorned == part && a.category == category)?;
        Some(self.adornments.remove(pos))
    }

    pub fn find_adornment(&self, part: PartId, category: &str) -> Option<&Adornment> {
        self.adornments
            .iter()
            .find(|a| a.adorned == part && a.category == category)
    }

    pub fn adornments(&self) -> impl Iterator<Item = &Adornment> {
        self.adornments.iter()
    }

    /// Topmost handle of a `category` adornment at `p`.
    pub fn find_tool_handle_at(&self, p: Point, category: &str) -> Option<HandleHit> {
        self.adornments
            .iter()
            .rev()
            .filter(|a| a.category == category)
            .find_map(|a| {
                a.handle_at(p).map(|h| HandleHit {
                    part: a.adorned,
                    handle: h.name,
                })
            })
    }

    /// Topmost handle of any adornment at `p`.
    pub fn find_handle_at(&self, p: Point) -> Option<&Handle> {
        self.adornments.iter().rev().find_map(|a| a.handle_at(p))
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the zoom scale. Non-finite or non-positive values are ignored.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("ignoring invalid diagram scale {scale}");
            return false;
        }
        self.scale = scale;
        true
    }

    /// Visible document area.
    pub fn viewport_bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.view_size / self.scale)
    }

    pub fn view_to_doc(&self, p: Point) -> Point {
        self.position + p.to_vec2() / self.scale
    }

    pub fn overview_box(&self) -> Option<PartId> {
        self.overview_box
    }

    /// Resize the overview box to the observed viewport. Returns `false`
    /// when this diagram is not an overview.
    pub fn refresh_overview_box(&mut self) -> bool {
        let (Some(id), Some(observed)) = (self.overview_box, self.observed.as_ref()) else {
            return false;
        };
        let bounds = observed.borrow().viewport_bounds();
        if !is_real(bounds) {
            return false;
        }
        match self.part_mut(id) {
            Some(part) => {
                part.bounds = bounds;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adornment::Figure;
    use smallvec::smallvec;

    fn rect_part(name: &str, x: f64, y: f64, w: f64, h: f64) -> Part {
        Part::new(PartId::intern(name), Rect::new(x, y, x + w, y + h))
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut d = Diagram::new(Size::new(800.0, 600.0));
        d.add_part(rect_part("under", 0.0, 0.0, 100.0, 100.0));
        d.add_part(rect_part("over", 50.0, 50.0, 100.0, 100.0));

        assert_eq!(d.find_part_at(Point::new(75.0, 75.0)), Some(PartId::intern("over")));
        assert_eq!(d.find_part_at(Point::new(10.0, 10.0)), Some(PartId::intern("under")));
        assert_eq!(d.find_part_at(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn viewport_tracks_scale_and_position() {
        let mut d = Diagram::new(Size::new(400.0, 200.0));
        d.set_scale(2.0);
        d.position = Point::new(10.0, 20.0);
        assert_eq!(d.viewport_bounds(), Rect::new(10.0, 20.0, 210.0, 120.0));
        assert_eq!(d.view_to_doc(Point::new(100.0, 50.0)), Point::new(60.0, 45.0));
    }

    #[test]
    fn invalid_scale_is_ignored() {
        let mut d = Diagram::new(Size::new(400.0, 200.0));
        assert!(!d.set_scale(0.0));
        assert!(!d.set_scale(-1.0));
        assert!(!d.set_scale(f64::NAN));
        assert!(!d.set_scale(f64::INFINITY));
        assert_eq!(d.scale(), 1.0);
    }

    #[test]
    fn adornments_replace_by_part_and_category() {
        let mut d = Diagram::new(Size::new(100.0, 100.0));
        let id = PartId::intern("adorned");
        d.add_part(rect_part("adorned", 0.0, 0.0, 20.0, 20.0));
        let make = |x: f64| Adornment {
            adorned: id,
            category: "Tool".to_string(),
            location: Point::new(10.0, 10.0),
            placeholder: Size::new(20.0, 20.0),
            handles: smallvec![Handle {
                name: "H",
                figure: Figure::Rectangle,
                center: Point::new(x, 0.0),
                size: Size::new(4.0, 4.0),
                cursor: Cursor::Move,
            }],
        };
        d.add_adornment(make(0.0));
        d.add_adornment(make(20.0));
        assert_eq!(d.adornments().count(), 1);

        let hit = d.find_tool_handle_at(Point::new(21.0, 1.0), "Tool");
        assert_eq!(hit, Some(HandleHit { part: id, handle: "H" }));
        assert_eq!(d.find_tool_handle_at(Point::new(21.0, 1.0), "Other"), None);
        assert_eq!(d.find_handle_at(Point::new(21.0, 1.0)).unwrap().cursor, Cursor::Move);

        d.remove_part(id);
        assert!(d.find_adornment(id, "Tool").is_none());
    }

    #[test]
    fn overview_box_mirrors_observed_viewport() {
        let main = Rc::new(RefCell::new(Diagram::new(Size::new(400.0, 200.0))));
        main.borrow_mut().set_scale(2.0);
        let mut overview = Diagram::overview(Rc::clone(&main), Size::new(100.0, 100.0), 2.0);
        let id = overview.overview_box().unwrap();
        assert_eq!(overview.part(id).unwrap().bounds, Rect::new(0.0, 0.0, 200.0, 100.0));
        assert!(overview.part(id).unwrap().is_selected);

        main.borrow_mut().set_scale(4.0);
        assert!(overview.refresh_overview_box());
        assert_eq!(overview.part(id).unwrap().bounds, Rect::new(0.0, 0.0, 100.0, 50.0));

        let mut plain = Diagram::new(Size::new(10.0, 10.0));
        assert!(!plain.refresh_overview_box());
    }

    #[test]
    fn selection_roundtrip() {
        let mut d = Diagram::new(Size::new(100.0, 100.0));
        d.add_part(rect_part("sel_a", 0.0, 0.0, 10.0, 10.0));
        assert!(d.select(PartId::intern("sel_a")));
        assert!(!d.select(PartId::intern("sel_missing")));
        assert_eq!(d.selection().collect::<Vec<_>>(), vec![PartId::intern("sel_a")]);
        assert_eq!(d.clear_selection(), vec![PartId::intern("sel_a")]);
        assert_eq!(d.selection().count(), 0);
    }
}
