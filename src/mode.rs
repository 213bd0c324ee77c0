use crate::host::{HostResult, ModeHooks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Dormant; the host does not report short home presses.
    #[default]
    Idle,
    /// Interactive; short home presses are watched.
    Active,
    /// Receives input without watching the home button. Used to recover from
    /// the host dropping input focus.
    Passive,
}

pub struct ModeController {
    mode: SessionMode,
    hooks: Box<dyn ModeHooks>,
}

impl ModeController {
    pub fn new(hooks: Box<dyn ModeHooks>) -> Self {
        Self {
            mode: SessionMode::Idle,
            hooks,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn switch_to_active(&mut self) {
        if self.mode == SessionMode::Active {
            return;
        }
        warn_on_err("begin short home watch", self.hooks.begin_short_home_watch());
        self.set(SessionMode::Active);
    }

    pub fn switch_to_idle(&mut self) {
        if self.mode == SessionMode::Idle {
            return;
        }
        if self.mode == SessionMode::Active {
            warn_on_err("end short home watch", self.hooks.end_short_home_watch());
        }
        self.set(SessionMode::Idle);
    }

    pub fn switch_to_passive(&mut self) {
        if self.mode == SessionMode::Passive {
            return;
        }
        if self.mode == SessionMode::Active {
            warn_on_err("end short home watch", self.hooks.end_short_home_watch());
        }
        // The host stops delivering input to the overlay once the watch ends;
        // a fresh input handle with delivery re-enabled brings it back.
        warn_on_err("reset input handle", self.hooks.reset_input_handle());
        warn_on_err("enable input delivery", self.hooks.enable_input_delivery());
        self.set(SessionMode::Passive);
    }

    fn set(&mut self, next: SessionMode) {
        tracing::debug!(from = ?self.mode, to = ?next, "mode updated");
        self.mode = next;
    }
}

fn warn_on_err(op: &str, result: HostResult<()>) {
    if let Err(err) = result {
        tracing::warn!(%err, "{op} failed");
    }
}
