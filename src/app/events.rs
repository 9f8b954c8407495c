//! Outbound application events.
//!
//! The [`ThermostatService`](super::service::ThermostatService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them — log to serial, feed a test
//! recorder, forward to telemetry.

use super::ports::BusError;
use crate::report::StatusRecord;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the configured set-point).
    Started { set_point: i16 },

    /// The button task applied one unit of set-point change.
    SetPointChanged { set_point: i16 },

    /// The actuator decision flipped.
    HeatChanged { on: bool },

    /// A sensor read failed; the room temperature fell back to the sentinel.
    SensorFault(BusError),

    /// A status line was emitted (carries the record as written).
    StatusReported(StatusRecord),

    /// A base tick was lost because the previous one was still pending.
    SchedulingOverrun { total: u32 },
}
