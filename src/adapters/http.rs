//! HTTP control surface.
//!
//! Maps the five fixed routes onto sequencer calls and renders each result
//! as its fixed plain-text token.  Every defined route answers 200; requests
//! for anything else fall through to the server's stock not-found handling.
//!
//! This module only compiles for the ESP-IDF target — the route/token
//! vocabulary it serves lives in [`crate::app::recipes`] and is covered by
//! host-side tests there.

use std::sync::Arc;

use anyhow::Context;
use esp_idf_svc::http::Method;
use esp_idf_svc::http::server::{Configuration, EspHttpServer};
use esp_idf_svc::io::Write;
use log::info;

use crate::adapters::board::RelayBoard;
use crate::adapters::log_sink::LogEventSink;
use crate::adapters::time::SystemClock;
use crate::app::recipes::OPERATIONS;
use crate::app::service::{Busy, Sequencer};
use crate::config::SystemConfig;

/// Body served at `/`.
pub const HELP_TEXT: &str =
    "Welcome to GoFire server. Supported handlers: /off /on /flameup /flamedown";

/// The production sequencer type behind the HTTP surface.
pub type ValveSequencer = Sequencer<RelayBoard, SystemClock>;

/// Start the HTTP server and register all routes.
///
/// The returned server owns its worker threads; keep the handle alive for
/// the process lifetime.  Handlers run on those workers concurrently — the
/// sequencer's guard is what serialises them.
pub fn serve(
    sequencer: Arc<ValveSequencer>,
    config: &SystemConfig,
) -> anyhow::Result<EspHttpServer<'static>> {
    let server_config = Configuration {
        http_port: config.http_port,
        ..Default::default()
    };
    let mut server =
        EspHttpServer::new(&server_config).context("HTTP server startup failed")?;

    server.fn_handler("/", Method::Get, |request| -> anyhow::Result<()> {
        request.into_ok_response()?.write_all(HELP_TEXT.as_bytes())?;
        Ok(())
    })?;

    for operation in OPERATIONS {
        let seq = Arc::clone(&sequencer);
        server.fn_handler(
            operation.path(),
            Method::Get,
            move |request| -> anyhow::Result<()> {
                let token = match seq.try_run(operation, &mut LogEventSink::new()) {
                    Ok(outcome) => outcome.token(),
                    Err(Busy) => operation.busy_token(),
                };
                request.into_ok_response()?.write_all(token.as_bytes())?;
                Ok(())
            },
        )?;
    }

    info!("HTTP control surface up on :{}", config.http_port);
    Ok(server)
}
