//! Unified error type for the initialization path.
//!
//! A single `Error` enum every subsystem converts into, keeping the
//! binary's startup error handling uniform. All variants are `Copy` so they
//! can be passed around without allocation. Once the control loop is
//! running, errors are handled locally (sentinel fallback, logged warning)
//! and never propagate through this type.

use core::fmt;

use crate::app::ports::{BusError, SerialError, TimerError};

/// Every fallible startup operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration failed validation.
    Config(&'static str),
    /// The base-tick timer could not be started.
    Timer(TimerError),
    /// The serial sink failed before the loop started.
    Serial(SerialError),
    /// A sensor bus transaction failed.
    Bus(BusError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Timer(e) => write!(f, "timer: {e}"),
            Self::Serial(e) => write!(f, "serial: {e}"),
            Self::Bus(e) => write!(f, "bus: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<TimerError> for Error {
    fn from(e: TimerError) -> Self {
        Self::Timer(e)
    }
}

impl From<SerialError> for Error {
    fn from(e: SerialError) -> Self {
        Self::Serial(e)
    }
}

impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Self::Bus(e)
    }
}
