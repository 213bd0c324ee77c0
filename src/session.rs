//! The overlay's top-level loops.
//!
//! A session alternates between the idle loop, which only watches for wake
//! events and shows pending notifications, and the active loop, which renders
//! full frames until the overlay is dismissed. Every iteration drains
//! messages, then refreshes status, then samples input, then renders.

use crate::classifier::{pump, LatchedEvents, PumpOutcome};
use crate::host::{InputSource, MessageChannel, Renderer};
use crate::input::InputState;
use crate::mode::{ModeController, SessionMode};
use crate::status::StatusCache;
use crate::window::{Frame, FrameRequest, WindowSet};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub idle_interval: Duration,
    pub active_interval: Duration,
    pub max_messages_per_turn: usize,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            idle_interval: Duration::from_millis(300),
            active_interval: Duration::from_millis(1000 / 25),
            max_messages_per_turn: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleExit {
    Wake,
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveExit {
    Sleep,
    Terminate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionEnd {
    pub idle_runs: u64,
    pub active_runs: u64,
}

pub struct Session {
    channel: Box<dyn MessageChannel>,
    input: Box<dyn InputSource>,
    renderer: Box<dyn Renderer>,
    mode: ModeController,
    status: Arc<StatusCache>,
    windows: WindowSet,
    events: LatchedEvents,
    cadence: Cadence,
}

impl Session {
    pub fn new(
        channel: Box<dyn MessageChannel>,
        input: Box<dyn InputSource>,
        renderer: Box<dyn Renderer>,
        mode: ModeController,
        status: Arc<StatusCache>,
        windows: WindowSet,
        cadence: Cadence,
    ) -> Self {
        Self {
            channel,
            input,
            renderer,
            mode,
            status,
            windows,
            events: LatchedEvents::default(),
            cadence,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode.mode()
    }

    /// Direct access for callers that need the passive transition.
    pub fn mode_mut(&mut self) -> &mut ModeController {
        &mut self.mode
    }

    pub fn windows(&self) -> &WindowSet {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowSet {
        &mut self.windows
    }

    pub fn events(&self) -> LatchedEvents {
        self.events
    }

    pub fn status(&self) -> &Arc<StatusCache> {
        &self.status
    }

    /// Alternate idle and active loops until one of them terminates.
    pub fn run(&mut self) -> SessionEnd {
        let mut end = SessionEnd::default();
        loop {
            end.idle_runs += 1;
            if self.run_idle() == IdleExit::Terminate {
                break;
            }
            end.active_runs += 1;
            if self.run_active() == ActiveExit::Terminate {
                break;
            }
        }
        tracing::info!(
            idle_runs = end.idle_runs,
            active_runs = end.active_runs,
            "overlay session ended"
        );
        end
    }

    pub fn run_idle(&mut self) -> IdleExit {
        self.renderer.clear();
        self.events.clear();
        self.windows.close_for_idle();
        self.mode.switch_to_idle();
        tracing::debug!("entering idle loop");

        loop {
            if self.drain_messages() == PumpOutcome::Terminate {
                return IdleExit::Terminate;
            }
            if self.events.wake_requested() {
                self.windows.power.set_visible(self.events.power_pressed);
                self.windows.sidebar.set_visible(self.events.home_long_pressed);
                tracing::debug!(events = ?self.events, "waking overlay");
                return IdleExit::Wake;
            }
            if self.windows.notifications.should_render() {
                let mut frame = self.begin_frame(InputState::default());
                self.windows.notifications.update(&mut frame);
                self.renderer.present(frame.panels());
            }
            std::thread::sleep(self.cadence.idle_interval);
        }
    }

    pub fn run_active(&mut self) -> ActiveExit {
        self.events.clear();
        self.status.request_update();
        self.mode.switch_to_active();
        tracing::debug!("entering active loop");

        loop {
            if self.drain_messages() == PumpOutcome::Terminate {
                return ActiveExit::Terminate;
            }
            self.status.update();
            let input = self.input.sample();

            let mut frame = self.begin_frame(input);
            let primary = self.windows.update_primary(&mut frame);
            // The notification surface never keeps the overlay open by itself,
            // otherwise B alone could not dismiss it.
            self.windows.update_notifications(&mut frame);
            self.apply_requests(frame.take_requests());
            self.renderer.present(frame.panels());

            if primary.is_none() || self.events.dismiss_requested() {
                tracing::debug!(?primary, events = ?self.events, "active loop going to sleep");
                return ActiveExit::Sleep;
            }
            std::thread::sleep(self.cadence.active_interval);
        }
    }

    /// One pump of the message channel.
    fn drain_messages(&mut self) -> PumpOutcome {
        pump(
            self.channel.as_mut(),
            &mut self.events,
            self.cadence.max_messages_per_turn,
        )
    }

    fn begin_frame(&self, input: InputState) -> Frame {
        Frame::new(input, self.status.current(), self.events)
    }

    fn apply_requests(&mut self, requests: Vec<FrameRequest>) {
        for request in requests {
            tracing::debug!(?request, "applying frame request");
            match request {
                FrameRequest::OpenForeground(window) => self.windows.set_foreground(window),
                FrameRequest::CloseForeground => self.windows.clear_foreground(),
                FrameRequest::EnterPassiveMode => self.mode.switch_to_passive(),
            }
        }
    }
}

