//! Tool dispatch.
//!
//! The manager owns the pointer-down tools in priority order and routes
//! input to at most one active tool. With no tool active, pointer moves
//! only update the hover cursor.

use crate::input::InputEvent;
use crate::tool::{Tool, ToolFlow};
use dtk_core::adornment::Cursor;
use dtk_core::diagram::{Diagram, InputState};
use dtk_core::geometry::Point;
use dtk_core::id::PartId;

#[derive(Default)]
pub struct ToolManager {
    tools: Vec<Box<dyn Tool>>,
    /// Index into `tools` of the running tool.
    active: Option<usize>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tool; earlier tools get the first chance to start.
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    pub fn with_tool(mut self, tool: impl Tool + 'static) -> Self {
        self.add_tool(Box::new(tool));
        self
    }

    pub fn active_tool(&self) -> Option<&dyn Tool> {
        self.active.map(|i| self.tools[i].as_ref())
    }

    pub fn active_tool_name(&self) -> Option<&str> {
        self.active_tool().map(|t| t.name())
    }

    pub fn find_tool(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// Let every tool rebuild or drop its adornment on `part`, e.g. after
    /// a selection change.
    pub fn update_adornments(&mut self, diagram: &mut Diagram, part: PartId) {
        for tool in &mut self.tools {
            tool.update_adornments(diagram, part);
        }
    }

    /// Route one input event.
    pub fn handle(&mut self, event: &InputEvent, diagram: &mut Diagram) {
        if let Some((x, y)) = event.position() {
            diagram.last_input = Self::input_state(diagram, x, y);
        }
        match event {
            InputEvent::PointerDown { .. } => {
                // a press during a gesture keeps the gesture's origin
                if self.active.is_none() {
                    diagram.first_input = diagram.last_input;
                    self.start_tool(diagram);
                }
            }
            InputEvent::PointerMove { .. } => match self.active {
                Some(i) => {
                    let flow = self.tools[i].do_mouse_move(diagram);
                    self.follow(flow, diagram);
                }
                None => {
                    diagram.current_cursor = diagram
                        .find_handle_at(diagram.last_input.document_point)
                        .map_or(Cursor::Default, |h| h.cursor);
                }
            },
            InputEvent::PointerUp { .. } => {
                if let Some(i) = self.active {
                    let flow = self.tools[i].do_mouse_up(diagram);
                    self.follow(flow, diagram);
                }
            }
            InputEvent::Key { .. } if event.is_cancel() => {
                if let Some(i) = self.active {
                    let flow = self.tools[i].do_cancel(diagram);
                    self.follow(flow, diagram);
                }
            }
            InputEvent::Key { .. } => {}
        }
    }

    /// Start the first enabled tool that accepts the gesture.
    fn start_tool(&mut self, diagram: &mut Diagram) {
        let Some(i) = self
            .tools
            .iter()
            .position(|t| t.is_enabled() && t.can_start(diagram))
        else {
            return;
        };
        let tool = &mut self.tools[i];
        tool.do_activate(diagram);
        if tool.is_active() {
            log::debug!("tool manager: started {}", tool.name());
            self.active = Some(i);
        }
    }

    fn follow(&mut self, flow: ToolFlow, diagram: &mut Diagram) {
        if flow == ToolFlow::Stop {
            self.stop_tool(diagram);
        }
    }

    /// Deactivate the running tool, if any.
    pub fn stop_tool(&mut self, diagram: &mut Diagram) {
        if let Some(i) = self.active.take() {
            self.tools[i].do_deactivate(diagram);
            diagram.current_cursor = Cursor::Default;
        }
    }

    fn input_state(diagram: &Diagram, x: f64, y: f64) -> InputState {
        let view_point = Point::new(x, y);
        InputState {
            view_point,
            document_point: diagram.view_to_doc(view_point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtk_core::geometry::Size;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the hooks it receives.
    struct Probe {
        name: &'static str,
        accept: bool,
        active: bool,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Probe {
        fn new(name: &'static str, accept: bool, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                name,
                accept,
                active: false,
                log: Rc::clone(log),
            }
        }

        fn note(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}:{hook}", self.name));
        }
    }

    impl Tool for Probe {
        fn name(&self) -> &str {
            self.name
        }
        fn is_active(&self) -> bool {
            self.active
        }
        fn can_start(&self, _diagram: &Diagram) -> bool {
            self.accept
        }
        fn do_activate(&mut self, _diagram: &mut Diagram) {
            self.note("activate");
            self.active = true;
        }
        fn do_deactivate(&mut self, _diagram: &mut Diagram) {
            self.note("deactivate");
            self.active = false;
        }
        fn do_cancel(&mut self, _diagram: &mut Diagram) -> ToolFlow {
            self.note("cancel");
            ToolFlow::Stop
        }
        fn do_mouse_move(&mut self, _diagram: &mut Diagram) -> ToolFlow {
            self.note("move");
            ToolFlow::Continue
        }
        fn do_mouse_up(&mut self, _diagram: &mut Diagram) -> ToolFlow {
            self.note("up");
            ToolFlow::Stop
        }
    }

    fn diagram() -> Diagram {
        Diagram::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn first_accepting_tool_wins() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut mgr = ToolManager::new()
            .with_tool(Probe::new("a", false, &log))
            .with_tool(Probe::new("b", true, &log))
            .with_tool(Probe::new("c", true, &log));
        let mut d = diagram();

        mgr.handle(&InputEvent::pointer_down(1.0, 1.0), &mut d);
        assert_eq!(mgr.active_tool_name(), Some("b"));
        mgr.handle(&InputEvent::pointer_move(2.0, 2.0), &mut d);
        mgr.handle(&InputEvent::pointer_up(3.0, 3.0), &mut d);
        assert_eq!(mgr.active_tool_name(), None);
        assert_eq!(
            *log.borrow(),
            vec!["b:activate", "b:move", "b:up", "b:deactivate"]
        );
    }

    #[test]
    fn second_pointer_down_does_not_start_another_tool() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut mgr = ToolManager::new()
            .with_tool(Probe::new("a", true, &log))
            .with_tool(Probe::new("b", true, &log));
        let mut d = diagram();

        mgr.handle(&InputEvent::pointer_down(1.0, 1.0), &mut d);
        mgr.handle(&InputEvent::pointer_down(5.0, 5.0), &mut d);
        assert_eq!(mgr.active_tool_name(), Some("a"));
        assert_eq!(*log.borrow(), vec!["a:activate"]);
        assert!(!mgr.find_tool("b").unwrap().is_active());
    }

    #[test]
    fn press_during_gesture_keeps_its_origin() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut mgr = ToolManager::new().with_tool(Probe::new("a", true, &log));
        let mut d = diagram();

        mgr.handle(&InputEvent::pointer_down(10.0, 20.0), &mut d);
        mgr.handle(&InputEvent::pointer_down(70.0, 80.0), &mut d);
        assert_eq!(d.first_input.document_point, Point::new(10.0, 20.0));
        assert_eq!(d.last_input.document_point, Point::new(70.0, 80.0));

        mgr.handle(&InputEvent::pointer_up(70.0, 80.0), &mut d);
        mgr.handle(&InputEvent::pointer_down(30.0, 40.0), &mut d);
        assert_eq!(d.first_input.document_point, Point::new(30.0, 40.0));
    }

    #[test]
    fn escape_cancels_then_deactivates() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut mgr = ToolManager::new().with_tool(Probe::new("a", true, &log));
        let mut d = diagram();

        mgr.handle(&InputEvent::key("Escape"), &mut d);
        assert!(log.borrow().is_empty());

        mgr.handle(&InputEvent::pointer_down(1.0, 1.0), &mut d);
        mgr.handle(&InputEvent::key("x"), &mut d);
        mgr.handle(&InputEvent::key("Escape"), &mut d);
        assert_eq!(mgr.active_tool_name(), None);
        assert_eq!(*log.borrow(), vec!["a:activate", "a:cancel", "a:deactivate"]);
    }

    #[test]
    fn pointer_positions_are_converted_to_document() {
        let mut mgr = ToolManager::new();
        let mut d = diagram();
        d.set_scale(2.0);
        d.position = Point::new(100.0, 0.0);
        mgr.handle(&InputEvent::pointer_down(50.0, 40.0), &mut d);
        assert_eq!(d.first_input.view_point, Point::new(50.0, 40.0));
        assert_eq!(d.first_input.document_point, Point::new(125.0, 20.0));
        mgr.handle(&InputEvent::pointer_move(0.0, 0.0), &mut d);
        assert_eq!(d.last_input.document_point, Point::new(100.0, 0.0));
        assert_eq!(d.first_input.document_point, Point::new(125.0, 20.0));
    }
}
