//! Heat actuator driver.
//!
//! Drives the binary heat output (an LED on the reference board, a relay in
//! the field) and tracks the last-commanded state. The output is re-driven
//! on every command, not only on change.

use log::debug;

use crate::app::ports::DigitalOutput;

pub struct HeaterDriver<O> {
    output: O,
    heat_on: bool,
}

impl<O: DigitalOutput> HeaterDriver<O> {
    /// Wrap the output line; the heat state starts off and the line is
    /// driven low to match.
    pub fn new(mut output: O) -> Self {
        output.write(false);
        Self {
            output,
            heat_on: false,
        }
    }

    /// Command the heat output.
    pub fn set(&mut self, on: bool) {
        if on != self.heat_on {
            debug!("heat output -> {}", if on { "on" } else { "off" });
        }
        self.output.write(on);
        self.heat_on = on;
    }

    /// Last-commanded heat state.
    pub fn is_on(&self) -> bool {
        self.heat_on
    }
}
