//! Static settings of the configuration page.
//!
//! The device serves the page itself, so the socket endpoint is always derived
//! from the host the page was loaded from. Everything else is fixed at compile
//! time; the shell only supplies the host on [`crate::events::Event::Initialize`].

use serde::{Deserialize, Serialize};

/// Scheme of the device socket. The device does not terminate TLS.
pub const WS_SCHEME: &str = "ws";

/// Path of the socket endpoint on the device.
pub const WS_PATH: &str = "/ws";

/// Broker port used whenever the device or the form does not provide one.
pub const DEFAULT_MQTT_PORT: u16 = 1883;

/// Label of the refresh control while no scan is running.
pub const REFRESH_LABEL: &str = "Refresh";

/// Constructs the socket address for the given page host.
///
/// # Example
/// ```
/// use watering_config_core::config::build_ws_url;
/// let url = build_ws_url("192.168.4.1");
/// assert_eq!(url, "ws://192.168.4.1/ws");
/// ```
pub fn build_ws_url(host: &str) -> String {
    format!("{WS_SCHEME}://{host}{WS_PATH}")
}

/// Label of the refresh control while a scan is counting down.
pub fn scanning_label(seconds_remaining: u32) -> String {
    format!("Scanning ({seconds_remaining})")
}

/// Timing of a network scan cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanSettings {
    /// Seconds until an unanswered scan is abandoned
    pub timeout_seconds: u32,
    /// Period of the countdown tick in milliseconds
    pub tick_millis: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            tick_millis: 1000,
        }
    }
}

impl ScanSettings {
    pub fn timeout_millis(&self) -> u64 {
        u64::from(self.timeout_seconds) * 1000
    }
}
