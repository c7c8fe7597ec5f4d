//! Pie-sector values read from bound data.
//!
//! Bound data may be missing or hold junk (strings, nulls) before the
//! application fills it in, so every read falls back to a default
//! instead of failing.

use crate::config::SectorFields;
use dtk_core::data::DataRecord;
use dtk_core::geometry::{Point, Rect, Size, normalize_deg};
use dtk_core::kurbo::{BezPath, CircleSegment, Shape};

pub const DEFAULT_RADIUS: f64 = 50.0;
pub const DEFAULT_ANGLE: f64 = 0.0;
pub const DEFAULT_SWEEP: f64 = 360.0;

/// Radius: a finite number > 0, else 50.
pub fn radius(data: &DataRecord, fields: &SectorFields) -> f64 {
    data.number(&fields.radius)
        .filter(|r| *r > 0.0)
        .unwrap_or(DEFAULT_RADIUS)
}

/// Start angle reduced into `[0, 360)`, else 0.
pub fn angle(data: &DataRecord, fields: &SectorFields) -> f64 {
    data.number(&fields.angle)
        .map(normalize_deg)
        .unwrap_or(DEFAULT_ANGLE)
}

/// Sweep as stored (not reduced), else 360.
pub fn sweep(data: &DataRecord, fields: &SectorFields) -> f64 {
    data.number(&fields.sweep).unwrap_or(DEFAULT_SWEEP)
}

/// Sweep reached by pointing in `direction` from a sector starting at
/// `angle`. Anything past 359° snaps to a full circle; pointing back at
/// the start gives 0, not 360.
pub fn sweep_toward(direction: f64, angle: f64) -> f64 {
    let sweep = (direction - angle + 360.0).rem_euclid(360.0);
    if sweep > 359.0 { 360.0 } else { sweep }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorGeometry {
    pub radius: f64,
    pub angle: f64,
    pub sweep: f64,
}

impl SectorGeometry {
    pub fn read(data: &DataRecord, fields: &SectorFields) -> Self {
        Self {
            radius: radius(data, fields),
            angle: angle(data, fields),
            sweep: sweep(data, fields),
        }
    }

    /// The full circle's bounding square; handles are placed on its rim.
    pub fn bounds(&self, center: Point) -> Rect {
        Rect::from_center_size(center, Size::new(2.0 * self.radius, 2.0 * self.radius))
    }

    /// Pie-slice outline for renderers.
    pub fn to_path(&self, center: Point, tolerance: f64) -> BezPath {
        CircleSegment::new(
            center,
            self.radius,
            0.0,
            self.angle.to_radians(),
            self.sweep.to_radians(),
        )
        .to_path(tolerance)
    }
}
