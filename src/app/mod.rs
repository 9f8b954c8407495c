//! Application core — pure control logic, zero I/O.
//!
//! This module contains the business rules for the thermostat: the system
//! state, the three task bodies the scheduler dispatches, and the events
//! they emit. All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
