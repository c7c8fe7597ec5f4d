//! Reshaping a pie sector by dragging handles on its rim.
//!
//! The sector's radius, start angle and sweep live in the part's data
//! record under configurable property names. Three handles sit on the
//! circle that bounds the sector:
//!
//! | Handle   | Rim angle           | Drag sets                                   |
//! |----------|---------------------|---------------------------------------------|
//! | `RADIUS` | `angle + sweep / 2` | distance from center to pointer             |
//! | `ANGLE`  | `angle`             | direction from center to pointer            |
//! | `SWEEP`  | `angle + sweep`     | `(direction − angle + 360) mod 360`, >359 → 360 |
//!
//! A drag runs in one transaction named after the tool: mouse-up commits
//! it as a single undo step, cancel restores the values captured at
//! activation and rolls it back.

use crate::config::{ConfigError, SectorFields};
use crate::sector::{self, SectorGeometry, sweep_toward};
use crate::tool::{Tool, ToolFlow, stop_transaction};
use dtk_core::adornment::{Adornment, Cursor, Figure, Handle};
use dtk_core::data::DataRecord;
use dtk_core::diagram::{Diagram, Part};
use dtk_core::geometry::{Size, Spot, direction_deg};
use dtk_core::id::PartId;
use serde_json::Value;
use smallvec::SmallVec;

pub const SECTOR_RESHAPING: &str = "SectorReshaping";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorHandle {
    Radius,
    Angle,
    Sweep,
}

impl SectorHandle {
    /// Paint order; later handles win hit tests when they overlap.
    pub const ALL: [SectorHandle; 3] = [SectorHandle::Radius, SectorHandle::Angle, SectorHandle::Sweep];

    pub fn name(self) -> &'static str {
        match self {
            SectorHandle::Radius => "RADIUS",
            SectorHandle::Angle => "ANGLE",
            SectorHandle::Sweep => "SWEEP",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }

    /// Rim angle, in degrees, where this handle sits.
    pub fn rim_angle(self, geometry: &SectorGeometry) -> f64 {
        match self {
            SectorHandle::Radius => geometry.angle + geometry.sweep / 2.0,
            SectorHandle::Angle => geometry.angle,
            SectorHandle::Sweep => geometry.angle + geometry.sweep,
        }
    }

    fn figure(self) -> Figure {
        match self {
            SectorHandle::Radius => Figure::Diamond,
            SectorHandle::Angle | SectorHandle::Sweep => Figure::Circle,
        }
    }

    fn size(self) -> Size {
        match self {
            SectorHandle::Radius => Size::new(10.0, 10.0),
            SectorHandle::Angle | SectorHandle::Sweep => Size::new(8.0, 8.0),
        }
    }
}

/// Adornment for a sector part: placeholder over the bounding circle and
/// one handle per [`SectorHandle`].
pub fn build_adornment(part: &Part, geometry: &SectorGeometry, category: &str) -> Adornment {
    let center = part.center();
    let circle = geometry.bounds(center);
    let handles: SmallVec<[Handle; 3]> = SectorHandle::ALL
        .into_iter()
        .map(|h| Handle {
            name: h.name(),
            figure: h.figure(),
            center: Spot::on_circle(h.rim_angle(geometry)).point_in(circle),
            size: h.size(),
            cursor: Cursor::Move,
        })
        .collect();
    Adornment {
        adorned: part.id,
        category: category.to_string(),
        location: center,
        placeholder: circle.size(),
        handles,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Session {
    Idle,
    Dragging {
        part: PartId,
        handle: SectorHandle,
        /// Values read when the drag began; restored on cancel.
        original: SectorGeometry,
    },
}

pub struct SectorReshapingTool {
    name: String,
    enabled: bool,
    fields: SectorFields,
    session: Session,
    /// Set on mouse-up; a deactivation without it rolls back.
    transaction_result: Option<String>,
}

impl Default for SectorReshapingTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SectorReshapingTool {
    pub fn new() -> Self {
        Self::with_fields(SectorFields::default())
    }

    pub fn with_fields(fields: SectorFields) -> Self {
        Self {
            name: SECTOR_RESHAPING.to_string(),
            enabled: true,
            fields,
            session: Session::Idle,
            transaction_result: None,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn fields(&self) -> &SectorFields {
        &self.fields
    }

    pub fn set_radius_property(&mut self, value: &Value) -> Result<(), ConfigError> {
        self.fields.set_radius_property(value)
    }

    pub fn set_angle_property(&mut self, value: &Value) -> Result<(), ConfigError> {
        self.fields.set_angle_property(value)
    }

    pub fn set_sweep_property(&mut self, value: &Value) -> Result<(), ConfigError> {
        self.fields.set_sweep_property(value)
    }

    pub fn get_radius(&self, data: &DataRecord) -> f64 {
        sector::radius(data, &self.fields)
    }

    pub fn get_angle(&self, data: &DataRecord) -> f64 {
        sector::angle(data, &self.fields)
    }

    pub fn get_sweep(&self, data: &DataRecord) -> f64 {
        sector::sweep(data, &self.fields)
    }

    /// Handle being dragged, if any.
    pub fn dragged_handle(&self) -> Option<SectorHandle> {
        match self.session {
            Session::Dragging { handle, .. } => Some(handle),
            Session::Idle => None,
        }
    }

    fn write_geometry(&self, diagram: &mut Diagram, part: PartId, geometry: &SectorGeometry) {
        let model = &mut diagram.model;
        model.set_data_property(part, &self.fields.radius, geometry.radius);
        model.set_data_property(part, &self.fields.angle, geometry.angle);
        model.set_data_property(part, &self.fields.sweep, geometry.sweep);
    }
}

impl Tool for SectorReshapingTool {
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
            && diagram.allow_reshape
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
        let Some(handle) = SectorHandle::from_name(hit.handle) else {
            return;
        };
        if diagram.part(hit.part).is_none() {
            return;
        }
        let Some(data) = diagram.model.data(hit.part) else {
            log::debug!("{}: {:?} has no data, not activating", self.name, hit.part);
            return;
        };
        let original = SectorGeometry::read(data, &self.fields);

        diagram.model.start_transaction(&self.name);
        self.transaction_result = None;
        self.session = Session::Dragging {
            part: hit.part,
            handle,
            original,
        };
        log::debug!("{}: dragging {} of {:?}", self.name, handle.name(), hit.part);
    }

    fn do_deactivate(&mut self, diagram: &mut Diagram) {
        if self.is_active() {
            stop_transaction(diagram, self.transaction_result.as_deref());
        }
        self.session = Session::Idle;
        self.transaction_result = None;
        log::debug!("{}: deactivated", self.name);
    }

    fn do_cancel(&mut self, diagram: &mut Diagram) -> ToolFlow {
        if let Session::Dragging { part, original, .. } = self.session {
            self.write_geometry(diagram, part, &original);
            self.update_adornments(diagram, part);
            log::debug!("{}: cancelled, restored {original:?}", self.name);
        }
        ToolFlow::Stop
    }

    fn do_mouse_move(&mut self, diagram: &mut Diagram) -> ToolFlow {
        let Session::Dragging { part, handle, .. } = self.session else {
            return ToolFlow::Continue;
        };
        let Some(center) = diagram.part(part).map(Part::center) else {
            return ToolFlow::Continue;
        };
        let mouse = diagram.last_input.document_point;

        match handle {
            SectorHandle::Radius => {
                let radius = center.distance(mouse);
                log::trace!("{}: radius {radius}", self.name);
                diagram.model.set_data_property(part, &self.fields.radius, radius);
            }
            SectorHandle::Angle => {
                let angle = direction_deg(center, mouse);
                log::trace!("{}: angle {angle}", self.name);
                diagram.model.set_data_property(part, &self.fields.angle, angle);
            }
            SectorHandle::Sweep => {
                let current = diagram
                    .model
                    .data(part)
                    .map_or(sector::DEFAULT_ANGLE, |d| sector::angle(d, &self.fields));
                let sweep = sweep_toward(direction_deg(center, mouse), current);
                log::trace!("{}: sweep {sweep}", self.name);
                diagram.model.set_data_property(part, &self.fields.sweep, sweep);
            }
        }
        self.update_adornments(diagram, part);
        ToolFlow::Continue
    }

    fn do_mouse_up(&mut self, _diagram: &mut Diagram) -> ToolFlow {
        if self.is_active() {
            self.transaction_result = Some(self.name.clone());
        }
        ToolFlow::Stop
    }

    fn update_adornments(&mut self, diagram: &mut Diagram, part: PartId) {
        let adornment = match diagram.part(part) {
            Some(p) if p.is_selected && !diagram.is_read_only => diagram
                .model
                .data(part)
                .map(|d| build_adornment(p, &SectorGeometry::read(d, &self.fields), &self.name)),
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
