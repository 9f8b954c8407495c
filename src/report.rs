//! The fixed-format status line.
//!
//! The only wire format in the system: `<RR,SS,H,EEEE>` + CRLF, where RR is
//! the room temperature (2-digit zero-padded), SS the set-point (2-digit
//! zero-padded), H the heat state as `0`/`1`, and EEEE the elapsed seconds
//! (4-digit zero-padded). Downstream tooling parses this as a literal
//! record, so the rendering here is byte-exact.

use core::fmt::Write as _;

use crate::app::ports::{SerialError, SerialPort};

/// Capacity covering the widest possible line
/// (`<-32768,-32768,1,4294967295>` + CRLF = 30 bytes).
const LINE_CAP: usize = 32;

/// One status report, as serialized onto the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRecord {
    pub room_temperature: i16,
    pub set_point: i16,
    pub heat_on: bool,
    pub elapsed_seconds: u32,
}

impl StatusRecord {
    /// Render the record into its exact wire form, CRLF included.
    pub fn render(&self) -> heapless::String<LINE_CAP> {
        let mut line = heapless::String::new();
        // Cannot overflow: LINE_CAP covers the widest field values.
        let _ = write!(
            line,
            "<{:02},{:02},{},{:04}>\r\n",
            self.room_temperature,
            self.set_point,
            u8::from(self.heat_on),
            self.elapsed_seconds,
        );
        line
    }
}

/// Render and write one status record to the serial sink.
pub fn write_status(serial: &mut impl SerialPort, record: &StatusRecord) -> Result<(), SerialError> {
    write_all(serial, record.render().as_bytes())
}

/// Write every byte, looping on partial writes.
///
/// A port that accepts zero bytes is treated as failed rather than spun on,
/// so a dead sink can never stall the task that called us.
pub fn write_all(serial: &mut impl SerialPort, mut bytes: &[u8]) -> Result<(), SerialError> {
    while !bytes.is_empty() {
        let n = serial.write(bytes)?;
        if n == 0 {
            return Err(SerialError::WriteFailed);
        }
        bytes = &bytes[n..];
    }
    Ok(())
}
