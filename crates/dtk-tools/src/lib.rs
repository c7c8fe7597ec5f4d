pub mod config;
pub mod input;
pub mod manager;
pub mod overview_resizing;
pub mod sector;
pub mod sector_reshaping;
pub mod tool;

pub use config::{ConfigError, SectorFields};
pub use input::InputEvent;
pub use manager::ToolManager;
pub use overview_resizing::OverviewResizingTool;
pub use sector::SectorGeometry;
pub use sector_reshaping::{SectorHandle, SectorReshapingTool};
pub use tool::{Tool, ToolFlow};
