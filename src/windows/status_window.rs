use crate::input::Buttons;
use crate::window::{Frame, FrameRequest, Window};

/// Foreground window listing every field of the current status snapshot.
///
/// Stays alive while the overlay sleeps but hides itself when asked to close.
pub struct StatusWindow {
    visible: bool,
}

impl StatusWindow {
    pub fn new() -> Self {
        Self { visible: true }
    }
}

impl Default for StatusWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl Window for StatusWindow {
    fn name(&self) -> &str {
        "status"
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn should_render(&mut self) -> bool {
        self.visible
    }

    fn update(&mut self, frame: &mut Frame) {
        if frame.input.pressed(Buttons::B) {
            self.visible = false;
            frame.request(FrameRequest::CloseForeground);
            return;
        }
        let s = &frame.status;
        let c = &s.clock.calendar;
        let lines = vec![
            format!("Refresh #{}", s.generation),
            format!("Battery: {}% charger {:?}", s.power.battery_percent, s.power.charger),
            format!(
                "Connection: {:?} {:?} strength {}",
                s.connectivity.state, s.connectivity.kind, s.connectivity.strength
            ),
            format!("Wireless enabled: {}", s.connectivity.wireless_enabled),
            format!("Address: {}", s.connectivity.address_text),
            format!(
                "Brightness: {:.2} auto {}",
                s.display.brightness, s.display.auto_brightness
            ),
            format!(
                "Time: {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                c.year, c.month, c.day, c.hour, c.minute, c.second
            ),
        ];
        frame.draw("Status", lines);
    }

    fn request_close(&mut self) {
        self.visible = false;
    }
}
