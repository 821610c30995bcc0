//! System configuration parameters
//!
//! All tunable parameters for the GoFire controller.  The valve pulse
//! sequences themselves are fixed protocol data (see [`crate::app::recipes`])
//! and are deliberately not configurable.
//!
//! There is no runtime persistence: the controller is stateless across
//! restarts apart from the physical valve position.  WiFi credentials are
//! baked in at build time via `GOFIRE_WIFI_SSID` / `GOFIRE_WIFI_PASS`.

use serde::{Deserialize, Serialize};

/// TCP port the HTTP control surface listens on.
pub const DEFAULT_HTTP_PORT: u16 = 8600;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- HTTP ---
    /// Listen port for the control surface.
    pub http_port: u16,

    // --- WiFi ---
    /// Station-mode SSID.
    pub wifi_ssid: heapless::String<32>,
    /// Station-mode password (empty = open network).
    pub wifi_password: heapless::String<64>,

    // --- Main loop ---
    /// Idle-loop poll interval (milliseconds); paces WiFi reconnect checks.
    pub poll_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut wifi_ssid = heapless::String::new();
        let mut wifi_password = heapless::String::new();
        // Oversized build-time values are dropped here; the WiFi adapter
        // re-validates lengths before any connect attempt.
        let _ = wifi_ssid.push_str(option_env!("GOFIRE_WIFI_SSID").unwrap_or(""));
        let _ = wifi_password.push_str(option_env!("GOFIRE_WIFI_PASS").unwrap_or(""));

        Self {
            http_port: DEFAULT_HTTP_PORT,
            wifi_ssid,
            wifi_password,
            poll_interval_ms: 1000,
        }
    }
}

impl SystemConfig {
    /// Range-check the configuration.  Called once at startup; a bad value
    /// is a fatal init error, matching the fail-fast startup contract.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.http_port == 0 {
            return Err(crate::error::Error::Config("http_port must be non-zero"));
        }
        if self.poll_interval_ms == 0 {
            return Err(crate::error::Error::Config("poll_interval_ms must be non-zero"));
        }
        Ok(())
    }
}
