//! TMP006 infrared temperature sensor driver.
//!
//! The sensor exposes a 16-bit big-endian ambient temperature register.
//! The upper 14 bits carry the reading at 1/32 °C per LSB, so conversion
//! is: shift out the 2 low bits, divide by 32, truncate to whole degrees.
//!
//! Each read is a single write-then-read bus transaction with no internal
//! retry — a failed transfer surfaces to the caller, which degrades to the
//! sentinel temperature and keeps the loop running.

use crate::app::ports::{BusError, BusSensor};

/// 7-bit I2C address of the TMP006 in the reference hardware.
pub const TMP006_I2C_ADDR: u8 = 0x41;

/// Configuration register pointer.
const REG_CONFIG: u8 = 0x02;
/// Ambient temperature result register pointer.
const REG_AMBIENT: u8 = 0x01;
/// Register pointer + two config bytes: continuous conversion.
const CONFIG_CONTINUOUS: [u8; 3] = [REG_CONFIG, 0x74, 0x00];

/// TMP006 over a transactional sensor bus.
pub struct Tmp006<B> {
    bus: B,
}

impl<B: BusSensor> Tmp006<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// One-time configuration: enable continuous conversion.
    ///
    /// A failure here is a transient bus fault, not fatal — the periodic
    /// reads will keep reporting their own failures.
    pub fn configure(&mut self) -> Result<(), BusError> {
        self.bus.transfer(&CONFIG_CONTINUOUS, &mut [])
    }

    /// Read the ambient temperature in whole degrees Celsius.
    pub fn read_celsius(&mut self) -> Result<i16, BusError> {
        let mut raw = [0u8; 2];
        self.bus.transfer(&[REG_AMBIENT], &mut raw)?;
        Ok(convert_raw(raw))
    }
}

/// Convert a raw big-endian register value to whole degrees Celsius.
///
/// The 2 low bits of the 16-bit transfer are discarded, leaving a 14-bit
/// magnitude at 1/32 °C per LSB; integer division truncates the fraction.
pub fn convert_raw(bytes: [u8; 2]) -> i16 {
    let raw = u16::from_be_bytes(bytes);
    ((raw >> 2) / 32) as i16
}
