//! Throttled environment status shared with the render path.
//!
//! Sampling touches several independent host subsystems, which is too slow to
//! do every frame. [`StatusCache`] keeps the last published
//! [`StatusSnapshot`] and only samples again once the refresh interval has
//! elapsed, or after [`StatusCache::request_update`] invalidated the throttle.

use crate::host::{Environment, HostError};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChargerKind {
    #[default]
    None,
    Official,
    Generic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerStatus {
    pub battery_percent: u32,
    pub charger: ChargerKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// Status could not be determined.
    #[default]
    Unknown,
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionKind {
    #[default]
    None,
    Wireless,
    Wired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityStatus {
    pub state: ConnectionState,
    pub kind: ConnectionKind,
    pub strength: u32,
    pub wireless_enabled: bool,
    pub address: Ipv4Addr,
    pub address_text: String,
}

impl Default for ConnectivityStatus {
    fn default() -> Self {
        Self {
            state: ConnectionState::Unknown,
            kind: ConnectionKind::None,
            strength: 0,
            wireless_enabled: false,
            address: Ipv4Addr::UNSPECIFIED,
            address_text: Ipv4Addr::UNSPECIFIED.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayStatus {
    /// Brightness setting in `0.0..=1.0`.
    pub brightness: f32,
    pub auto_brightness: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarTime {
    pub fn from_datetime(dt: &DateTime<FixedOffset>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    pub fn clock_text(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockStatus {
    /// Seconds since the Unix epoch.
    pub unix: i64,
    pub calendar: CalendarTime,
}

/// One complete sample of the environment.
///
/// Built in full by a single refresh and never modified after publication.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSnapshot {
    /// Number of refreshes that produced this snapshot; `0` before the first.
    pub generation: u64,
    pub power: PowerStatus,
    pub connectivity: ConnectivityStatus,
    pub display: DisplayStatus,
    pub clock: ClockStatus,
}

/// Decode an address stored as a little-endian `u32` (first octet in the
/// low byte).
pub fn address_from_raw(raw: u32) -> Ipv4Addr {
    Ipv4Addr::from(raw.to_le_bytes())
}

#[derive(Debug, Clone, Copy)]
pub struct RefreshThrottle {
    last: Option<Instant>,
    min_interval: Duration,
}

impl RefreshThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last: None,
            min_interval,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// True when no refresh happened yet or more than `min_interval` passed.
    pub fn ready(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.min_interval,
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

impl Default for RefreshThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

struct StatusState {
    snapshot: Arc<StatusSnapshot>,
    throttle: RefreshThrottle,
}

pub struct StatusCache {
    state: Mutex<StatusState>,
    environment: Mutex<Box<dyn Environment>>,
}

impl StatusCache {
    pub fn new(environment: Box<dyn Environment>, min_interval: Duration) -> Self {
        Self {
            state: Mutex::new(StatusState {
                snapshot: Arc::new(StatusSnapshot::default()),
                throttle: RefreshThrottle::new(min_interval),
            }),
            environment: Mutex::new(environment),
        }
    }

    /// Latest published snapshot. Never samples.
    pub fn current(&self) -> Arc<StatusSnapshot> {
        self.state
            .lock()
            .map(|state| Arc::clone(&state.snapshot))
            .unwrap_or_else(|_| Arc::new(StatusSnapshot::default()))
    }

    /// Force the next [`update`](Self::update) to sample regardless of the
    /// throttle.
    pub fn request_update(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.throttle.invalidate();
        }
    }

    pub fn update(&self) -> bool {
        self.update_at(Instant::now())
    }

    /// Sample and publish a new snapshot unless the last refresh was less than
    /// the throttle interval before `now`. Returns whether a snapshot was
    /// published.
    pub fn update_at(&self, now: Instant) -> bool {
        let generation = {
            let Ok(mut state) = self.state.lock() else {
                return false;
            };
            if !state.throttle.ready(now) {
                return false;
            }
            state.throttle.mark(now);
            state.snapshot.generation + 1
        };

        let snapshot = {
            let Ok(mut env) = self.environment.lock() else {
                tracing::warn!("status environment lock poisoned");
                return false;
            };
            sample(env.as_mut(), generation)
        };

        match self.state.lock() {
            Ok(mut state) => {
                state.snapshot = Arc::new(snapshot);
                true
            }
            Err(_) => false,
        }
    }
}

fn log_failure(subsystem: &str, err: &HostError) {
    tracing::debug!(%err, "status read for {subsystem} failed, using sentinel");
}

fn sample(env: &mut dyn Environment, generation: u64) -> StatusSnapshot {
    let power = env.power().unwrap_or_else(|err| {
        log_failure("power", &err);
        PowerStatus::default()
    });

    let connectivity = match env.connection() {
        Ok(reading) => {
            let wireless_enabled = env.wireless_enabled().unwrap_or_else(|err| {
                log_failure("wireless", &err);
                false
            });
            let address = env.current_address().unwrap_or_else(|err| {
                log_failure("address", &err);
                Ipv4Addr::UNSPECIFIED
            });
            ConnectivityStatus {
                state: reading.state,
                kind: reading.kind,
                strength: reading.strength,
                wireless_enabled,
                address,
                address_text: address.to_string(),
            }
        }
        Err(err) => {
            log_failure("connectivity", &err);
            ConnectivityStatus::default()
        }
    };

    let display = env.display().unwrap_or_else(|err| {
        log_failure("display", &err);
        DisplayStatus::default()
    });

    let clock = match env.clock() {
        Ok(now) => ClockStatus {
            unix: now.timestamp(),
            calendar: CalendarTime::from_datetime(&now),
        },
        Err(err) => {
            log_failure("clock", &err);
            ClockStatus::default()
        }
    };

    StatusSnapshot {
        generation,
        power,
        connectivity,
        display,
        clock,
    }
}
