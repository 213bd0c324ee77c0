use crate::host::MessageChannel;

pub const MSG_HOME_PRESSED: u32 = 0x14;
pub const MSG_HOME_LONG_PRESSED: u32 = 0x15;
pub const MSG_POWER_PRESSED: u32 = 0x17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticEvent {
    PowerPressed,
    HomeLongPressed,
    HomePressed,
    /// Any other message; carries the raw code so it can be forwarded.
    Unrecognized(u32),
}

pub fn classify(code: u32) -> SemanticEvent {
    match code {
        MSG_POWER_PRESSED => SemanticEvent::PowerPressed,
        MSG_HOME_LONG_PRESSED => SemanticEvent::HomeLongPressed,
        MSG_HOME_PRESSED => SemanticEvent::HomePressed,
        other => SemanticEvent::Unrecognized(other),
    }
}

/// Button events observed since the last clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatchedEvents {
    pub power_pressed: bool,
    pub home_long_pressed: bool,
    pub home_pressed: bool,
}

impl LatchedEvents {
    pub fn latch(&mut self, event: SemanticEvent) {
        match event {
            SemanticEvent::PowerPressed => self.power_pressed = true,
            SemanticEvent::HomeLongPressed => self.home_long_pressed = true,
            SemanticEvent::HomePressed => self.home_pressed = true,
            SemanticEvent::Unrecognized(_) => {}
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Power or a long home press wakes the overlay.
    pub fn wake_requested(&self) -> bool {
        self.power_pressed || self.home_long_pressed
    }

    /// Either home press sends the overlay back to idle.
    pub fn dismiss_requested(&self) -> bool {
        self.home_pressed || self.home_long_pressed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpOutcome {
    Continue,
    Terminate,
}

/// Drain up to `limit` pending messages into `latched`.
///
/// Never blocks. Unknown messages go back to the host unmodified; if the host
/// refuses one the session has to stop.
pub fn pump<C: MessageChannel + ?Sized>(
    channel: &mut C,
    latched: &mut LatchedEvents,
    limit: usize,
) -> PumpOutcome {
    for _ in 0..limit.max(1) {
        let code = match channel.try_next() {
            Ok(Some(code)) => code,
            Ok(None) => break,
            Err(err) => {
                tracing::debug!(%err, "no message retrieved");
                break;
            }
        };
        tracing::debug!("received message {code:#x}");
        match classify(code) {
            SemanticEvent::Unrecognized(raw) => {
                tracing::info!("unknown message {raw:#x}, forwarding to host");
                if let Err(err) = channel.forward(raw) {
                    tracing::error!(%err, "host rejected message {raw:#x}");
                    return PumpOutcome::Terminate;
                }
            }
            event => latched.latch(event),
        }
    }
    PumpOutcome::Continue
}
