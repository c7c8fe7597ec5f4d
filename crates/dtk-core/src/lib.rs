pub mod adornment;
pub mod data;
pub mod diagram;
pub mod geometry;
pub mod id;
pub mod model;

pub use adornment::{Adornment, Cursor, Figure, Handle};
pub use data::DataRecord;
pub use diagram::{Diagram, HandleHit, InputState, Part};
pub use geometry::{Point, Rect, Size, Spot, Vec2};
pub use id::PartId;
pub use model::{Change, Model, Transaction};

// Re-export kurbo so downstream crates don't need a direct dependency
pub use kurbo;
