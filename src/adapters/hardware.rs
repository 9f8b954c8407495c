//! Hardware adapter — bridges the peripheral drivers to the domain ports.
//!
//! Owns the TMP006 driver and the heat actuator, exposing them through
//! [`SensorPort`] and [`ActuatorPort`]. Also provides newtype bridges from
//! `embedded-hal` buses/pins to this crate's capability traits, so a board
//! layer hands in whatever its HAL produced.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use log::warn;

use crate::app::ports::{ActuatorPort, BusError, BusSensor, DigitalOutput, SensorPort};
use crate::drivers::heater::HeaterDriver;
use crate::sensors::tmp006::Tmp006;

/// Concrete adapter combining the sensor and actuator behind port traits.
pub struct HardwareAdapter<B, O> {
    sensor: Tmp006<B>,
    heater: HeaterDriver<O>,
}

impl<B: BusSensor, O: DigitalOutput> HardwareAdapter<B, O> {
    pub fn new(sensor: Tmp006<B>, heater: HeaterDriver<O>) -> Self {
        Self { sensor, heater }
    }

    /// One-time sensor configuration pass-through.
    pub fn configure_sensor(&mut self) -> Result<(), BusError> {
        self.sensor.configure()
    }

    /// Last-commanded heat state.
    pub fn heat_is_on(&self) -> bool {
        self.heater.is_on()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<B: BusSensor, O: DigitalOutput> SensorPort for HardwareAdapter<B, O> {
    fn read_temperature(&mut self) -> Result<i16, BusError> {
        self.sensor.read_celsius()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<B: BusSensor, O: DigitalOutput> ActuatorPort for HardwareAdapter<B, O> {
    fn set_heat(&mut self, on: bool) {
        self.heater.set(on);
    }
}

// ── embedded-hal bridges ──────────────────────────────────────

/// [`BusSensor`] over any `embedded-hal` I2C bus, bound to one device
/// address.
pub struct I2cSensorBus<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cSensorBus<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Bus bound to the TMP006's reference address.
    pub fn tmp006(i2c: I) -> Self {
        Self::new(i2c, crate::sensors::tmp006::TMP006_I2C_ADDR)
    }
}

impl<I: I2c> BusSensor for I2cSensorBus<I> {
    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), BusError> {
        let result = if read.is_empty() {
            self.i2c.write(self.address, write)
        } else {
            self.i2c.write_read(self.address, write, read)
        };
        result.map_err(|e| match e.kind() {
            ErrorKind::NoAcknowledge(_) => BusError::Nack,
            _ => BusError::TransferFailed,
        })
    }
}

/// [`DigitalOutput`] over any `embedded-hal` output pin.
pub struct PinOutput<P> {
    pin: P,
}

impl<P: OutputPin> PinOutput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: OutputPin> DigitalOutput for PinOutput<P> {
    fn write(&mut self, level: bool) {
        let result = if level {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            warn!("heat output pin write failed");
        }
    }
}
