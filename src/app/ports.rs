//! Port traits — the hexagonal boundary between control logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ThermostatService (domain)
//! ```
//!
//! Two layers of trait live here:
//!
//! - **Capability traits** (`BusSensor`, `SerialPort`, `DigitalOutput`,
//!   `PeriodicTimer`, `EdgeButton`) model the already-opened peripherals the
//!   core needs. Bus/pin bring-up happens before the scheduler starts and is
//!   not part of this crate.
//! - **Domain ports** (`SensorPort`, `ActuatorPort`, `EventSink`) are what
//!   [`ThermostatService`](super::service::ThermostatService) consumes via
//!   generics, so the task bodies never touch a peripheral directly.
//!
//! All port errors are typed — callers must handle every variant explicitly.

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Capability traits (peripherals, assumed open and ready)
// ───────────────────────────────────────────────────────────────

/// One transactional sensor bus endpoint (the TMP006 behind I2C in the
/// reference hardware). The implementation owns addressing.
pub trait BusSensor {
    /// Perform one write-then-read transaction: send `write`, then fill
    /// `read` completely. An empty `read` buffer means write-only.
    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), BusError>;
}

/// Byte-stream output sink for the status line and diagnostic text.
pub trait SerialPort {
    /// Write as many bytes as the port will accept; returns the count.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SerialError>;
}

/// A single binary output line (the heat indicator/actuator).
pub trait DigitalOutput {
    /// Drive the output: `true` = asserted/on.
    fn write(&mut self, level: bool);
}

/// The base-tick hardware timer.
///
/// `callback` runs in interrupt (or timer-task) context on every period
/// elapse. It must only touch the lock-free signal types in
/// [`crate::events`] — never task-owned state.
pub trait PeriodicTimer {
    fn start(&mut self, period_us: u32, callback: fn()) -> Result<(), TimerError>;
}

/// One momentary button delivering press edges.
///
/// The registered callback is the sole producer for that button's edge
/// flag, and runs in interrupt context: set a flag and return.
pub trait EdgeButton {
    fn on_press(&mut self, callback: fn());
}

// ───────────────────────────────────────────────────────────────
// Domain ports (driven adapters: hardware ↔ service)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the temperature task calls this once per pass.
pub trait SensorPort {
    /// One calibrated reading in whole degrees Celsius, or the bus fault
    /// that prevented it. Must not retry and must not block.
    fn read_temperature(&mut self) -> Result<i16, BusError>;
}

/// Write-side port: the temperature task commands the heat output here.
pub trait ActuatorPort {
    fn set_heat(&mut self, on: bool);
}

/// The service emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go (serial log, telemetry, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from a [`BusSensor`] transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The device did not acknowledge its address or a data byte.
    Nack,
    /// The transaction did not complete in time.
    Timeout,
    /// Any other controller-reported failure.
    TransferFailed,
}

/// Errors from a [`SerialPort`] write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// The port is no longer usable.
    Closed,
    /// The write was rejected or accepted zero bytes.
    WriteFailed,
}

/// Errors from starting a [`PeriodicTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// No timer peripheral is available.
    Unavailable,
    /// The timer exists but refused to start.
    StartFailed,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Nack => write!(f, "bus NACK"),
            Self::Timeout => write!(f, "bus timeout"),
            Self::TransferFailed => write!(f, "bus transfer failed"),
        }
    }
}

impl core::fmt::Display for SerialError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Closed => write!(f, "serial port closed"),
            Self::WriteFailed => write!(f, "serial write failed"),
        }
    }
}

impl core::fmt::Display for TimerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "timer unavailable"),
            Self::StartFailed => write!(f, "timer start failed"),
        }
    }
}
