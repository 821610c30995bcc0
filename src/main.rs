//! GoFire Firmware — Main Entry Point
//!
//! HTTP server controlling a Mertik Maxitrol GV60 gas-fireplace valve via a
//! 3-channel relay board.
//!
//! Supported operations:
//!   Turn on:    http://<device>:8600/on
//!   Turn off:   http://<device>:8600/off
//!   Flame up:   http://<device>:8600/flameup
//!   Flame down: http://<device>:8600/flamedown
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HTTP surface      WifiAdapter      LogEventSink         │
//! │  (routes → ops)    (Connectivity)   (EventSink)          │
//! │  RelayBoard        SystemClock                           │
//! │  (RelayPort)       (ClockPort)                           │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ─────────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          Sequencer (pure logic)                │      │
//! │  │  one guard · four pulse recipes                │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::{info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use gofire::adapters::board::RelayBoard;
use gofire::adapters::http;
use gofire::adapters::time::SystemClock;
use gofire::adapters::wifi::{ConnectivityPort, WifiAdapter};
use gofire::app::service::Sequencer;
use gofire::config::SystemConfig;
use gofire::drivers::hw_init;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("GoFire v{} — GV60 fireplace valve controller", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;

    // ── 3. Relay outputs ──────────────────────────────────────
    // Startup faults are fatal: a half-configured relay bank must never
    // sit behind a live HTTP surface.
    hw_init::init_peripherals().context("relay GPIO init failed")?;

    let sequencer = Arc::new(Sequencer::new(RelayBoard::new(), SystemClock::new()));

    // ── 4. WiFi station ───────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let driver = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
        sysloop,
    )?;

    let mut wifi = WifiAdapter::new();
    wifi.attach(driver);
    if config.wifi_ssid.is_empty() {
        warn!("WiFi: no credentials baked in (GOFIRE_WIFI_SSID); network stays down");
    } else {
        wifi.set_credentials(config.wifi_ssid.as_str(), config.wifi_password.as_str())
            .map_err(|e| anyhow!("WiFi credentials rejected: {e}"))?;
        if let Err(e) = wifi.connect() {
            // Not fatal: poll() keeps retrying with backoff while the HTTP
            // surface waits for a network to appear.
            warn!("WiFi: initial connect failed ({e}); retrying in background");
        }
    }

    // ── 5. HTTP control surface ───────────────────────────────
    let _server = http::serve(sequencer, &config)?;
    info!("GoFire server listening on :{}", config.http_port);

    // ── 6. Idle loop ──────────────────────────────────────────
    // The HTTP server runs on its own workers; this thread only paces
    // WiFi reconnection.
    let poll = Duration::from_millis(u64::from(config.poll_interval_ms));
    loop {
        wifi.poll();
        thread::sleep(poll);
    }
}
