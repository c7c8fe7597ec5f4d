//! Tool lifecycle.
//!
//! A tool is started by the [`ToolManager`](crate::manager::ToolManager)
//! on pointer-down when its `can_start` accepts the gesture, then receives
//! moves until it asks to stop or is cancelled:
//!
//! ```text
//! can_start ─► do_activate ─► do_mouse_move* ─► do_mouse_up ─► do_deactivate
//!                                   └─────────► do_cancel ───► do_deactivate
//! ```

use dtk_core::diagram::Diagram;
use dtk_core::id::PartId;

/// What the manager should do after a lifecycle hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFlow {
    /// Keep the tool active.
    Continue,
    /// Deactivate the tool.
    Stop,
}

/// Trait for tools driven by the manager.
pub trait Tool {
    /// Name of the tool; also its adornment category and transaction name.
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool {
        true
    }

    fn is_active(&self) -> bool;

    /// Whether this tool wants the gesture starting at `diagram.first_input`.
    fn can_start(&self, diagram: &Diagram) -> bool;

    fn do_activate(&mut self, diagram: &mut Diagram);

    fn do_deactivate(&mut self, diagram: &mut Diagram);

    /// Abandon the gesture, restoring what it changed.
    fn do_cancel(&mut self, diagram: &mut Diagram) -> ToolFlow;

    fn do_mouse_move(&mut self, diagram: &mut Diagram) -> ToolFlow;

    fn do_mouse_up(&mut self, diagram: &mut Diagram) -> ToolFlow;

    /// Rebuild or remove this tool's adornment on `part`.
    fn update_adornments(&mut self, _diagram: &mut Diagram, _part: PartId) {}
}

/// Close the transaction a tool opened: commit when the tool recorded a
/// result, otherwise roll back.
pub fn stop_transaction(diagram: &mut Diagram, result: Option<&str>) -> bool {
    match result {
        Some(name) => diagram.model.commit_transaction(name),
        None => diagram.model.rollback_transaction(),
    }
}
