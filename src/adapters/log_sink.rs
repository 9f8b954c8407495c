//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! logger (which goes to the console on the host, UART in production).
//! A telemetry adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as a one-line record.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { set_point } => {
                info!("START  | set_point={set_point}");
            }
            AppEvent::SetPointChanged { set_point } => {
                info!("SET    | set_point={set_point}");
            }
            AppEvent::HeatChanged { on } => {
                info!("HEAT   | {}", if *on { "on" } else { "off" });
            }
            AppEvent::SensorFault(e) => {
                warn!("FAULT  | sensor read failed: {e}");
            }
            AppEvent::StatusReported(r) => {
                info!(
                    "REPORT | room={} set_point={} heat={} elapsed={}s",
                    r.room_temperature,
                    r.set_point,
                    u8::from(r.heat_on),
                    r.elapsed_seconds,
                );
            }
            AppEvent::SchedulingOverrun { total } => {
                warn!("OVERRUN| {total} base ticks lost since startup");
            }
        }
    }
}
