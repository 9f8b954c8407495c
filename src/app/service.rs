//! Thermostat service — the hexagonal core.
//!
//! [`ThermostatService`] owns the [`SystemState`] and exposes the three
//! task bodies the scheduler dispatches. All I/O flows through port traits
//! injected at call sites, making every task testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                  │  ThermostatService    │
//! ActuatorPort ◀── │  SystemState          │ ──▶ SerialPort
//!                  └──────────────────────┘
//! ```
//!
//! State ownership: every field of `SystemState` is mutated by exactly one
//! task, and only from the single-threaded dispatch path. The ISR side of
//! the world only ever touches the [`EdgeEventLatch`] handed to
//! [`button_task`](ThermostatService::button_task).

use log::{info, warn};

use crate::config::ThermostatConfig;
use crate::events::EdgeEventLatch;
use crate::report::{self, StatusRecord};

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort, SerialPort};

/// Room temperature reported when a sensor read fails. Far below any
/// realistic set-point: a faulted sensor therefore always commands heat on.
pub const SENSOR_FAULT_C: i16 = -1000;

// ───────────────────────────────────────────────────────────────
// SystemState
// ───────────────────────────────────────────────────────────────

/// The process-wide control state. Created once at startup; lives for the
/// process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct SystemState {
    /// Target temperature (°C). Mutated only by the button task; unbounded
    /// (wraps at the i16 limits rather than clamping).
    pub set_point: i16,
    /// Last reading, or [`SENSOR_FAULT_C`]. Mutated only by the
    /// temperature task.
    pub room_temperature: i16,
    /// Last actuator command. Mutated only by the temperature task,
    /// immediately after `room_temperature`.
    pub heat_on: bool,
    /// Completed report intervals. Mutated only by the report task.
    pub elapsed_seconds: u32,
}

// ───────────────────────────────────────────────────────────────
// ThermostatService
// ───────────────────────────────────────────────────────────────

/// The control core: three task bodies over one owned state.
pub struct ThermostatService {
    state: SystemState,
}

impl ThermostatService {
    pub fn new(config: &ThermostatConfig) -> Self {
        Self {
            state: SystemState {
                set_point: config.initial_set_point_c,
                room_temperature: 0,
                heat_on: false,
                elapsed_seconds: 0,
            },
        }
    }

    /// Announce startup through the sink.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        info!("service started, set_point={}", self.state.set_point);
        sink.emit(&AppEvent::Started {
            set_point: self.state.set_point,
        });
    }

    // ── Task bodies (dispatched by the scheduler, priority order) ──

    /// Button task (every 2nd tick): drain both edge flags and apply one
    /// unit of set-point change per set flag, increment first. Draining
    /// with nothing pending changes nothing.
    pub fn button_task(&mut self, latch: &EdgeEventLatch, sink: &mut impl EventSink) {
        let edges = latch.drain();

        if edges.increment {
            self.state.set_point = self.state.set_point.wrapping_add(1);
            info!("set-point raised to {}", self.state.set_point);
            sink.emit(&AppEvent::SetPointChanged {
                set_point: self.state.set_point,
            });
        }
        if edges.decrement {
            self.state.set_point = self.state.set_point.wrapping_sub(1);
            info!("set-point lowered to {}", self.state.set_point);
            sink.emit(&AppEvent::SetPointChanged {
                set_point: self.state.set_point,
            });
        }
    }

    /// Temperature task (every 5th tick): one sensor read, then the
    /// actuator decision — strict `<`, no hysteresis. A failed read
    /// degrades to the sentinel and the decision still runs against it;
    /// the task never aborts the schedule.
    ///
    /// The `hw` parameter satisfies **both** ports — this avoids a double
    /// mutable borrow while keeping the port boundary explicit.
    pub fn temperature_task(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.state.room_temperature = match hw.read_temperature() {
            Ok(celsius) => celsius,
            Err(e) => {
                warn!("sensor read failed: {e} — reporting {SENSOR_FAULT_C}");
                sink.emit(&AppEvent::SensorFault(e));
                SENSOR_FAULT_C
            }
        };

        let heat = self.state.room_temperature < self.state.set_point;
        let changed = heat != self.state.heat_on;
        self.state.heat_on = heat;
        hw.set_heat(heat);

        if changed {
            sink.emit(&AppEvent::HeatChanged { on: heat });
        }
    }

    /// Report task (every 10th tick): write the status line, then count the
    /// completed interval. The counter advances even if the write failed —
    /// it tracks intervals, not deliveries — so a flaky sink cannot stall
    /// the wall clock.
    pub fn report_task(&mut self, serial: &mut impl SerialPort, sink: &mut impl EventSink) {
        let record = StatusRecord {
            room_temperature: self.state.room_temperature,
            set_point: self.state.set_point,
            heat_on: self.state.heat_on,
            elapsed_seconds: self.state.elapsed_seconds,
        };

        if let Err(e) = report::write_status(serial, &record) {
            warn!("status write failed: {e}");
        }
        sink.emit(&AppEvent::StatusReported(record));

        self.state.elapsed_seconds = self.state.elapsed_seconds.wrapping_add(1);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Read-only view of the control state.
    pub fn state(&self) -> &SystemState {
        &self.state
    }
}
