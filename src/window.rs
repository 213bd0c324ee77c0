use crate::classifier::LatchedEvents;
use crate::input::InputState;
use crate::status::StatusSnapshot;
use std::sync::Arc;

/// Text block drawn by one window during a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub lines: Vec<String>,
}

/// Things a window asks the session to do after the frame.
pub enum FrameRequest {
    OpenForeground(Box<dyn Window>),
    CloseForeground,
    EnterPassiveMode,
}

impl std::fmt::Debug for FrameRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameRequest::OpenForeground(w) => write!(f, "OpenForeground({})", w.name()),
            FrameRequest::CloseForeground => write!(f, "CloseForeground"),
            FrameRequest::EnterPassiveMode => write!(f, "EnterPassiveMode"),
        }
    }
}

pub struct Frame {
    pub input: InputState,
    pub status: Arc<StatusSnapshot>,
    pub events: LatchedEvents,
    panels: Vec<Panel>,
    requests: Vec<FrameRequest>,
}

impl Frame {
    pub fn new(input: InputState, status: Arc<StatusSnapshot>, events: LatchedEvents) -> Self {
        Self {
            input,
            status,
            events,
            panels: Vec::new(),
            requests: Vec::new(),
        }
    }

    pub fn draw(&mut self, title: impl Into<String>, lines: Vec<String>) {
        self.panels.push(Panel {
            title: title.into(),
            lines,
        });
    }

    pub fn request(&mut self, request: FrameRequest) {
        self.requests.push(request);
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn take_requests(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.requests)
    }
}

/// A surface the session can show.
pub trait Window {
    fn name(&self) -> &str;
    fn visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    /// Whether the window wants to be drawn this frame.
    fn should_render(&mut self) -> bool;
    /// One logic and drawing pass.
    fn update(&mut self, frame: &mut Frame);
    /// Ask a window that survives idle periods to wind down. Windows that do
    /// not persist ignore this.
    fn request_close(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimarySlot {
    Power,
    Foreground,
    Sidebar,
}

/// Primary surfaces in the order they claim the frame.
pub const PRIMARY_PRIORITY: [PrimarySlot; 3] =
    [PrimarySlot::Power, PrimarySlot::Foreground, PrimarySlot::Sidebar];

pub struct WindowSet {
    pub power: Box<dyn Window>,
    pub foreground: Option<Box<dyn Window>>,
    pub sidebar: Box<dyn Window>,
    pub notifications: Box<dyn Window>,
}

impl WindowSet {
    pub fn new(
        power: Box<dyn Window>,
        sidebar: Box<dyn Window>,
        notifications: Box<dyn Window>,
    ) -> Self {
        Self {
            power,
            foreground: None,
            sidebar,
            notifications,
        }
    }

    fn slot_mut(&mut self, slot: PrimarySlot) -> Option<&mut Box<dyn Window>> {
        match slot {
            PrimarySlot::Power => Some(&mut self.power),
            PrimarySlot::Foreground => self.foreground.as_mut(),
            PrimarySlot::Sidebar => Some(&mut self.sidebar),
        }
    }

    /// First primary surface that wants to render, by [`PRIMARY_PRIORITY`].
    pub fn select_primary(&mut self) -> Option<PrimarySlot> {
        PRIMARY_PRIORITY.into_iter().find(|slot| {
            self.slot_mut(*slot)
                .map(|w| w.should_render())
                .unwrap_or(false)
        })
    }

    /// Update at most one primary surface. Returns the one that rendered.
    pub fn update_primary(&mut self, frame: &mut Frame) -> Option<PrimarySlot> {
        let slot = self.select_primary()?;
        if let Some(window) = self.slot_mut(slot) {
            window.update(frame);
        }
        Some(slot)
    }

    /// Update the notification surface if it has something to show.
    pub fn update_notifications(&mut self, frame: &mut Frame) -> bool {
        if self.notifications.should_render() {
            self.notifications.update(frame);
            true
        } else {
            false
        }
    }

    /// Hide everything that does not persist across idle periods and ask the
    /// foreground window to close.
    pub fn close_for_idle(&mut self) {
        self.sidebar.set_visible(false);
        self.power.set_visible(false);
        if let Some(fg) = self.foreground.as_mut() {
            fg.request_close();
        }
    }

    pub fn set_foreground(&mut self, window: Box<dyn Window>) {
        tracing::debug!(window = window.name(), "foreground window set");
        self.foreground = Some(window);
    }

    pub fn clear_foreground(&mut self) {
        if let Some(window) = self.foreground.take() {
            tracing::debug!(window = window.name(), "foreground window closed");
        }
    }
}
