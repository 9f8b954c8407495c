//! Multi-rate task scheduler.
//!
//! Three periodic tasks run at independent rates derived from one 100 ms
//! base tick, dispatched in a fixed priority order:
//!
//! | Task               | Divisor | Period   |
//! |--------------------|---------|----------|
//! | Set-point adjust   | 2       | 200 ms   |
//! | Temperature/heat   | 5       | 500 ms   |
//! | Status report      | 10      | 1000 ms  |
//!
//! Due-ness is a divisibility check against one free-running counter,
//! never three independent counters: tasks whose periods share a common
//! multiple fire in lockstep on the same tick, and their relative order is
//! fixed — the set-point task always completes before the temperature task
//! on ticks where both are due, and the temperature task before the report.
//!
//! The scheduler knows nothing about the task bodies. [`on_tick`]
//! dispatches [`TaskId`]s into a caller-supplied closure, keeping the
//! dispatch independently testable and reusable across execution contexts.
//!
//! [`on_tick`]: TaskScheduler::on_tick

use crate::config::ThermostatConfig;

/// The three tasks, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskId {
    /// Drain the button latch and adjust the set-point.
    SetPointAdjust,
    /// Read the sensor and drive the heat actuator.
    TemperatureUpdate,
    /// Emit the fixed-format status line.
    StatusReport,
}

/// Tick-driven dispatcher for the three control tasks.
pub struct TaskScheduler {
    /// Free-running count of consumed base ticks. u64 cannot wrap within
    /// any realistic uptime at 10 Hz.
    tick_count: u64,
    set_point_divisor: u64,
    temperature_divisor: u64,
    report_divisor: u64,
}

impl TaskScheduler {
    /// Build from a validated configuration (divisors are ≥ 1).
    pub fn new(config: &ThermostatConfig) -> Self {
        Self {
            tick_count: 0,
            set_point_divisor: u64::from(config.set_point_divisor),
            temperature_divisor: u64::from(config.temperature_divisor),
            report_divisor: u64::from(config.report_divisor),
        }
    }

    /// Process one consumed base tick: advance the counter, then run every
    /// due task in priority order. Call exactly once per tick taken from
    /// the [`TickSignal`](crate::events::TickSignal).
    pub fn on_tick(&mut self, mut run: impl FnMut(TaskId)) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if self.tick_count % self.set_point_divisor == 0 {
            run(TaskId::SetPointAdjust);
        }
        if self.tick_count % self.temperature_divisor == 0 {
            run(TaskId::TemperatureUpdate);
        }
        if self.tick_count % self.report_divisor == 0 {
            run(TaskId::StatusReport);
        }
    }

    /// Base ticks consumed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
