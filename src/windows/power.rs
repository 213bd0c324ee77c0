use crate::input::Buttons;
use crate::window::{Frame, Window};
use crate::windows::menu::Menu;

const ENTRIES: [&str; 3] = ["Sleep", "Restart", "Power off"];

/// Power menu shown when the power button is pressed while the overlay is
/// dormant.
pub struct PowerWindow {
    visible: bool,
    menu: Menu,
    last_choice: Option<&'static str>,
}

impl PowerWindow {
    pub fn new() -> Self {
        Self {
            visible: false,
            menu: Menu::new(ENTRIES.to_vec()),
            last_choice: None,
        }
    }

    /// Entry confirmed most recently, if any.
    pub fn last_choice(&self) -> Option<&'static str> {
        self.last_choice
    }
}

impl Default for PowerWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl Window for PowerWindow {
    fn name(&self) -> &str {
        "power"
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        if visible && !self.visible {
            self.menu.reset();
        }
        self.visible = visible;
    }

    fn should_render(&mut self) -> bool {
        self.visible
    }

    fn update(&mut self, frame: &mut Frame) {
        if frame.input.pressed(Buttons::B) {
            self.visible = false;
            return;
        }
        if let Some(idx) = self.menu.handle_input(&frame.input) {
            let choice = ENTRIES[idx];
            tracing::info!(choice, "power menu entry selected");
            self.last_choice = Some(choice);
            self.visible = false;
            return;
        }
        frame.draw("Power", self.menu.lines());
    }
}
