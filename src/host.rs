//! Interfaces the overlay core calls into.
//!
//! Everything the session needs from the host system is reached through the
//! traits in this module so the loops can be driven by the desktop backend or
//! by scripted hosts in tests.

use crate::input::InputState;
use crate::status::{ConnectionKind, ConnectionState, DisplayStatus, PowerStatus};
use crate::window::Panel;
use chrono::{DateTime, FixedOffset};
use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("{0} is not available on this host")]
    Unavailable(&'static str),
    #[error("{op} failed: {}", describe_result_code(*.code))]
    Failed { op: &'static str, code: u32 },
    #[error("host requested exit")]
    ExitRequested,
    #[error("host channel closed")]
    ChannelClosed,
}

pub type HostResult<T> = Result<T, HostError>;

/// Render a raw host result code as `module-description (0x...)`.
///
/// The low 9 bits carry the module and the next 13 bits the description.
pub fn describe_result_code(code: u32) -> String {
    let module = code & 0x1FF;
    let description = (code >> 9) & 0x1FFF;
    format!("{:04}-{:04} ({code:#x})", 2000 + module, description)
}

/// Non-blocking system message channel.
pub trait MessageChannel {
    /// Fetch the next pending message. `Ok(None)` means nothing is pending.
    fn try_next(&mut self) -> HostResult<Option<u32>>;
    /// Hand a message the overlay does not understand back to the host.
    fn forward(&mut self, code: u32) -> HostResult<()>;
}

/// Host-side toggles driven by mode transitions.
pub trait ModeHooks {
    fn begin_short_home_watch(&mut self) -> HostResult<()>;
    fn end_short_home_watch(&mut self) -> HostResult<()>;
    /// Tear down and recreate the input-delivery handle.
    fn reset_input_handle(&mut self) -> HostResult<()>;
    fn enable_input_delivery(&mut self) -> HostResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionReading {
    pub state: ConnectionState,
    pub kind: ConnectionKind,
    pub strength: u32,
}

/// Environment subsystems sampled by the status cache.
///
/// Each call is independent; a failure in one must not affect the others.
pub trait Environment: Send {
    fn power(&mut self) -> HostResult<PowerStatus>;
    fn connection(&mut self) -> HostResult<ConnectionReading>;
    fn wireless_enabled(&mut self) -> HostResult<bool>;
    fn current_address(&mut self) -> HostResult<Ipv4Addr>;
    fn display(&mut self) -> HostResult<DisplayStatus>;
    fn clock(&mut self) -> HostResult<DateTime<FixedOffset>>;
}

/// Blocking notification channel owned by the listener thread.
pub trait NotificationTransport: Send {
    fn initialize(&mut self) -> HostResult<()>;
    fn acquire_wait_handle(&mut self) -> HostResult<()>;
    /// Block until a notification is ready or the handle becomes invalid.
    fn wait(&mut self) -> HostResult<()>;
    fn receive(&mut self) -> HostResult<crate::notification::NotificationPacket>;
    fn shutdown(&mut self);
}

pub trait InputSource {
    fn sample(&mut self) -> InputState;
}

pub trait Renderer {
    fn clear(&mut self);
    fn present(&mut self, panels: &[Panel]);
}
