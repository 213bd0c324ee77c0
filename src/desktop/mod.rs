//! Host backend for running the overlay in a terminal.
//!
//! Button messages, key presses and notifications are typed on stdin; frames
//! are printed to stdout.

pub mod commands;
pub mod environment;
pub mod renderer;

use crate::classifier::{MSG_HOME_LONG_PRESSED, MSG_HOME_PRESSED, MSG_POWER_PRESSED};
use crate::host::{HostError, HostResult, InputSource, MessageChannel, ModeHooks, NotificationTransport};
use crate::input::{Buttons, InputState};
use crate::notification::NotificationPacket;
use commands::{parse_command, DesktopCommand};
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

pub use environment::DesktopEnvironment;
pub use renderer::TextRenderer;

/// Message the host sends when the overlay has to shut down.
pub const MSG_EXIT_REQUEST: u32 = 0x04;

pub struct DesktopHost {
    pub messages: DesktopMessages,
    pub input: DesktopInput,
    pub hooks: DesktopHooks,
    pub notifications: DesktopNotifications,
}

impl DesktopHost {
    /// Start reading commands from stdin.
    pub fn start() -> anyhow::Result<Self> {
        let (msg_tx, msg_rx) = channel();
        let (notif_tx, notif_rx) = channel();
        let keys = Arc::new(Mutex::new(Buttons::NONE));
        let reader_keys = keys.clone();

        thread::Builder::new()
            .name("stdin-commands".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                read_commands(stdin.lock(), &msg_tx, &notif_tx, &reader_keys);
            })?;

        Ok(Self {
            messages: DesktopMessages::new(msg_rx),
            input: DesktopInput::new(keys),
            hooks: DesktopHooks::default(),
            notifications: DesktopNotifications::new(notif_rx),
        })
    }
}

/// Route commands from `reader` until it ends or `quit` is typed, then queue
/// an exit request. Returns early if the session stopped listening.
pub fn read_commands<R: BufRead>(
    reader: R,
    messages: &Sender<u32>,
    notifications: &Sender<NotificationPacket>,
    keys: &Mutex<Buttons>,
) {
    let started = Instant::now();
    for line in reader.lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                tracing::warn!("ignoring command '{}': {err}", line.trim());
                continue;
            }
        };
        let sent = match command {
            DesktopCommand::Power => messages.send(MSG_POWER_PRESSED).is_ok(),
            DesktopCommand::Home => messages.send(MSG_HOME_PRESSED).is_ok(),
            DesktopCommand::HomeLong => messages.send(MSG_HOME_LONG_PRESSED).is_ok(),
            DesktopCommand::Message(MSG_EXIT_REQUEST) | DesktopCommand::Quit => break,
            DesktopCommand::Message(code) => messages.send(code).is_ok(),
            DesktopCommand::Key(button) => {
                if let Ok(mut pressed) = keys.lock() {
                    *pressed |= button;
                }
                true
            }
            DesktopCommand::Notify(text) => {
                let tick = started.elapsed().as_millis() as u64;
                notifications
                    .send(NotificationPacket::new(tick, 1, text.as_bytes()))
                    .is_ok()
            }
        };
        if !sent {
            tracing::debug!("command receiver gone, stopping reader");
            return;
        }
    }
    let _ = messages.send(MSG_EXIT_REQUEST);
}

pub struct DesktopMessages {
    rx: Receiver<u32>,
}

impl DesktopMessages {
    pub fn new(rx: Receiver<u32>) -> Self {
        Self { rx }
    }
}

impl MessageChannel for DesktopMessages {
    fn try_next(&mut self) -> HostResult<Option<u32>> {
        match self.rx.try_recv() {
            Ok(code) => Ok(Some(code)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(HostError::ChannelClosed),
        }
    }

    fn forward(&mut self, code: u32) -> HostResult<()> {
        if code == MSG_EXIT_REQUEST {
            return Err(HostError::ExitRequested);
        }
        tracing::debug!("host processed message {code:#x}");
        Ok(())
    }
}

pub struct DesktopInput {
    keys: Arc<Mutex<Buttons>>,
}

impl DesktopInput {
    pub fn new(keys: Arc<Mutex<Buttons>>) -> Self {
        Self { keys }
    }
}

impl InputSource for DesktopInput {
    /// Keys typed since the previous sample count as pressed for one frame.
    fn sample(&mut self) -> InputState {
        let down = self
            .keys
            .lock()
            .map(|mut keys| std::mem::take(&mut *keys))
            .unwrap_or_default();
        InputState {
            held: down,
            down,
            touch: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DesktopHooks {
    watching_home: bool,
}

impl DesktopHooks {
    pub fn watching_home(&self) -> bool {
        self.watching_home
    }
}

impl ModeHooks for DesktopHooks {
    fn begin_short_home_watch(&mut self) -> HostResult<()> {
        self.watching_home = true;
        tracing::info!("watching short home presses");
        Ok(())
    }

    fn end_short_home_watch(&mut self) -> HostResult<()> {
        self.watching_home = false;
        tracing::info!("stopped watching short home presses");
        Ok(())
    }

    fn reset_input_handle(&mut self) -> HostResult<()> {
        tracing::info!("input handle recreated");
        Ok(())
    }

    fn enable_input_delivery(&mut self) -> HostResult<()> {
        tracing::info!("input delivery enabled");
        Ok(())
    }
}

pub struct DesktopNotifications {
    rx: Option<Receiver<NotificationPacket>>,
    pending: Option<NotificationPacket>,
}

impl DesktopNotifications {
    pub fn new(rx: Receiver<NotificationPacket>) -> Self {
        Self {
            rx: Some(rx),
            pending: None,
        }
    }
}

impl NotificationTransport for DesktopNotifications {
    fn initialize(&mut self) -> HostResult<()> {
        if self.rx.is_some() {
            Ok(())
        } else {
            Err(HostError::Unavailable("notifications"))
        }
    }

    fn acquire_wait_handle(&mut self) -> HostResult<()> {
        Ok(())
    }

    fn wait(&mut self) -> HostResult<()> {
        let rx = self.rx.as_ref().ok_or(HostError::ChannelClosed)?;
        let packet = rx.recv().map_err(|_| HostError::ChannelClosed)?;
        self.pending = Some(packet);
        Ok(())
    }

    fn receive(&mut self) -> HostResult<NotificationPacket> {
        self.pending.take().ok_or(HostError::Failed {
            op: "receive notification",
            code: 0,
        })
    }

    fn shutdown(&mut self) {
        self.rx = None;
        self.pending = None;
    }
}
