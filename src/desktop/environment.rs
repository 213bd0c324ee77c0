use crate::host::{ConnectionReading, Environment, HostError, HostResult};
use crate::status::{ConnectionKind, ConnectionState, DisplayStatus, PowerStatus};
use chrono::{DateTime, FixedOffset, Local};
use std::net::{IpAddr, Ipv4Addr};
use sysinfo::Networks;

/// Environment readings available on a desktop machine.
///
/// Network state comes from `sysinfo`; battery and backlight are not exposed
/// portably and are reported as unavailable.
pub struct DesktopEnvironment {
    networks: Networks,
}

impl DesktopEnvironment {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }

    /// First non-loopback interface with an IPv4 address.
    fn primary_interface(&mut self) -> Option<(String, Ipv4Addr)> {
        self.networks.refresh(true);
        self.networks.iter().find_map(|(name, data)| {
            data.ip_networks().iter().find_map(|net| match net.addr {
                IpAddr::V4(v4) if !v4.is_loopback() => Some((name.clone(), v4)),
                _ => None,
            })
        })
    }
}

impl Default for DesktopEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Interface names used for wireless adapters on the common platforms.
pub fn is_wireless_interface(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.starts_with("wl") || lower.contains("wi-fi") || lower.contains("wireless")
}

impl Environment for DesktopEnvironment {
    fn power(&mut self) -> HostResult<PowerStatus> {
        Err(HostError::Unavailable("power"))
    }

    fn connection(&mut self) -> HostResult<ConnectionReading> {
        let reading = match self.primary_interface() {
            Some((name, _)) => {
                let wireless = is_wireless_interface(&name);
                ConnectionReading {
                    state: ConnectionState::Connected,
                    kind: if wireless {
                        ConnectionKind::Wireless
                    } else {
                        ConnectionKind::Wired
                    },
                    strength: if wireless { 3 } else { 0 },
                }
            }
            None => ConnectionReading {
                state: ConnectionState::Disconnected,
                kind: ConnectionKind::None,
                strength: 0,
            },
        };
        Ok(reading)
    }

    fn wireless_enabled(&mut self) -> HostResult<bool> {
        Ok(self
            .networks
            .iter()
            .any(|(name, _)| is_wireless_interface(name)))
    }

    fn current_address(&mut self) -> HostResult<Ipv4Addr> {
        self.primary_interface()
            .map(|(_, addr)| addr)
            .ok_or(HostError::Unavailable("ipv4 address"))
    }

    fn display(&mut self) -> HostResult<DisplayStatus> {
        Err(HostError::Unavailable("display"))
    }

    fn clock(&mut self) -> HostResult<DateTime<FixedOffset>> {
        let now = Local::now();
        Ok(now.with_timezone(now.offset()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wireless_names() {
        assert!(is_wireless_interface("wlan0"));
        assert!(is_wireless_interface("wlp3s0"));
        assert!(is_wireless_interface("Wi-Fi"));
        assert!(!is_wireless_interface("eth0"));
        assert!(!is_wireless_interface("enp0s31f6"));
    }

    #[test]
    fn unsupported_subsystems_report_unavailable() {
        let mut env = DesktopEnvironment::new();
        assert_eq!(env.power(), Err(HostError::Unavailable("power")));
        assert_eq!(env.display(), Err(HostError::Unavailable("display")));
        assert!(env.clock().is_ok());
    }
}
