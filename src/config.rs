//! System configuration parameters.
//!
//! All tunable parameters for the control loop. The defaults reproduce the
//! reference configuration: 100 ms base tick with the 2/5/10 task divisors
//! and a starting set-point of 25 °C.

use serde::{Deserialize, Serialize};

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermostatConfig {
    // --- Control ---
    /// Target temperature at startup (°C).
    pub initial_set_point_c: i16,

    // --- Timing ---
    /// Base scheduler tick period (µs).
    pub tick_period_us: u32,
    /// Button task runs every N base ticks.
    pub set_point_divisor: u32,
    /// Temperature/actuator task runs every N base ticks.
    pub temperature_divisor: u32,
    /// Status report task runs every N base ticks.
    pub report_divisor: u32,

    // --- Serial ---
    /// Status line baud rate.
    pub serial_baud: u32,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            initial_set_point_c: 25,

            tick_period_us: 100_000, // 10 Hz
            set_point_divisor: 2,    // 200 ms
            temperature_divisor: 5,  // 500 ms
            report_divisor: 10,      // 1000 ms

            serial_baud: 115_200,
        }
    }
}

impl ThermostatConfig {
    /// Reject configurations the scheduler cannot run with. A failure here
    /// is a fatal initialization fault: the loop must not start.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.tick_period_us == 0 {
            return Err("tick period must be non-zero");
        }
        if self.set_point_divisor == 0 || self.temperature_divisor == 0 || self.report_divisor == 0
        {
            return Err("task divisors must be >= 1");
        }
        if self.serial_baud == 0 {
            return Err("serial baud must be non-zero");
        }
        Ok(())
    }
}
