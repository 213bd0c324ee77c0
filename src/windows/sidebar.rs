use crate::input::Buttons;
use crate::status::{ChargerKind, ConnectionKind, ConnectionState, StatusSnapshot};
use crate::window::{Frame, FrameRequest, Window};
use crate::windows::menu::Menu;
use crate::windows::status_window::StatusWindow;

const ENTRIES: [&str; 2] = ["Status details", "Input pass-through"];

/// Main overlay panel opened with a long home press.
pub struct Sidebar {
    visible: bool,
    menu: Menu,
}

impl Sidebar {
    pub fn new() -> Self {
        Self {
            visible: false,
            menu: Menu::new(ENTRIES.to_vec()),
        }
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line summaries of a status snapshot.
pub fn summary_lines(status: &StatusSnapshot) -> Vec<String> {
    let charging = if status.power.charger == ChargerKind::None {
        ""
    } else {
        " (charging)"
    };
    let network = match (status.connectivity.state, status.connectivity.kind) {
        (ConnectionState::Connected, ConnectionKind::Wireless) => {
            format!("Wi-Fi {}/3", status.connectivity.strength)
        }
        (ConnectionState::Connected, _) => "Wired".to_string(),
        (ConnectionState::Connecting, _) => "Connecting".to_string(),
        (ConnectionState::Disconnected, _) => "Offline".to_string(),
        (ConnectionState::Unknown, _) => "Unknown".to_string(),
    };
    let brightness = if status.display.auto_brightness {
        "auto".to_string()
    } else {
        format!("{:.0}%", status.display.brightness * 100.0)
    };
    vec![
        format!(
            "{}  Battery {}%{charging}",
            status.clock.calendar.clock_text(),
            status.power.battery_percent
        ),
        format!("Network {network}  {}", status.connectivity.address_text),
        format!("Brightness {brightness}"),
    ]
}

impl Window for Sidebar {
    fn name(&self) -> &str {
        "sidebar"
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
        match self.menu.handle_input(&frame.input) {
            Some(0) => {
                frame.request(FrameRequest::OpenForeground(Box::new(StatusWindow::new())));
                self.visible = false;
                return;
            }
            Some(1) => frame.request(FrameRequest::EnterPassiveMode),
            _ => {}
        }
        let mut lines = summary_lines(&frame.status);
        lines.push(String::new());
        lines.extend(self.menu.lines());
        frame.draw("Overlay", lines);
    }
}
