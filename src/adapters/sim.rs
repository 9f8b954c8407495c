//! Host-simulation adapters.
//!
//! Stand-ins for the board peripherals so the full control loop runs on a
//! development machine: the sensor bus reads an atomic-injected raw value,
//! the heat output latches into an atomic, the serial port is stdout, the
//! base tick comes from a sleeping thread, and the two buttons are `+`/`-`
//! characters on stdin.
//!
//! Injection goes through statics so the simulated world is reachable from
//! plain-`fn` callbacks and from tests.

use std::io::{self, BufRead as _, Write as _};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::thread;
use std::time::Duration;

use crate::app::ports::{
    BusError, BusSensor, DigitalOutput, EdgeButton, PeriodicTimer, SerialError, SerialPort,
    TimerError,
};

/// Raw register value the simulated TMP006 serves. 0x0A00 ≈ 20 °C.
static SIM_RAW: AtomicU16 = AtomicU16::new(AMBIENT_RAW);
/// When set, every bus transaction fails.
static SIM_BUS_FAIL: AtomicBool = AtomicBool::new(false);
/// Last level driven onto the simulated heat output.
static SIM_HEAT: AtomicBool = AtomicBool::new(false);

/// Ambient the simulated room decays toward (20 °C).
const AMBIENT_RAW: u16 = 0x0A00;
/// Hottest the simulated heater can drive the room (40 °C).
const HEAT_CAP_RAW: u16 = 0x1400;

/// Inject a raw sensor register value.
pub fn sim_set_raw(raw: u16) {
    SIM_RAW.store(raw, Ordering::Relaxed);
}

/// Force every subsequent bus transaction to fail (or recover).
pub fn sim_set_bus_fail(fail: bool) {
    SIM_BUS_FAIL.store(fail, Ordering::Relaxed);
}

/// Level currently driven onto the simulated heat output.
pub fn sim_heat_is_on() -> bool {
    SIM_HEAT.load(Ordering::Relaxed)
}

/// Advance the toy thermal model one base tick: the room warms while the
/// heat output is asserted and decays toward ambient otherwise.
pub fn step_thermal_model() {
    let raw = SIM_RAW.load(Ordering::Relaxed);
    let next = if sim_heat_is_on() {
        raw.saturating_add(8).min(HEAT_CAP_RAW)
    } else {
        raw.saturating_sub(4).max(AMBIENT_RAW)
    };
    SIM_RAW.store(next, Ordering::Relaxed);
}

// ───────────────────────────────────────────────────────────────
// Capability implementations
// ───────────────────────────────────────────────────────────────

/// Simulated TMP006 register interface.
#[derive(Default)]
pub struct SimSensorBus;

impl SimSensorBus {
    pub fn new() -> Self {
        Self
    }
}

impl BusSensor for SimSensorBus {
    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), BusError> {
        if SIM_BUS_FAIL.load(Ordering::Relaxed) {
            return Err(BusError::TransferFailed);
        }
        // Result-register read; configuration writes are accepted silently.
        if write.first() == Some(&0x01) && read.len() == 2 {
            read.copy_from_slice(&SIM_RAW.load(Ordering::Relaxed).to_be_bytes());
        }
        Ok(())
    }
}

/// Simulated heat output line.
#[derive(Default)]
pub struct SimHeatPin;

impl SimHeatPin {
    pub fn new() -> Self {
        Self
    }
}

impl DigitalOutput for SimHeatPin {
    fn write(&mut self, level: bool) {
        SIM_HEAT.store(level, Ordering::Relaxed);
    }
}

/// Serial sink backed by stdout.
#[derive(Default)]
pub struct SimSerial;

impl SimSerial {
    pub fn new() -> Self {
        Self
    }
}

impl SerialPort for SimSerial {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SerialError> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(bytes)
            .and_then(|()| stdout.flush())
            .map_err(|_| SerialError::WriteFailed)?;
        Ok(bytes.len())
    }
}

/// Base-tick timer backed by a sleeping thread.
#[derive(Default)]
pub struct SimTimer {
    started: bool,
}

impl SimTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PeriodicTimer for SimTimer {
    fn start(&mut self, period_us: u32, callback: fn()) -> Result<(), TimerError> {
        if self.started {
            return Err(TimerError::StartFailed);
        }
        thread::Builder::new()
            .name("sim-tick".into())
            .spawn(move || {
                loop {
                    thread::sleep(Duration::from_micros(u64::from(period_us)));
                    callback();
                }
            })
            .map(|_| ())
            .map_err(|_| TimerError::Unavailable)?;
        self.started = true;
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Buttons over stdin
// ───────────────────────────────────────────────────────────────

/// Registered (trigger character, press callback) pairs, fired by the
/// stdin listener thread.
static BUTTON_REGISTRY: Mutex<Vec<(char, fn())>> = Mutex::new(Vec::new());

/// A button triggered by typing its character on stdin.
pub struct SimButton {
    key: char,
}

impl SimButton {
    pub fn new(key: char) -> Self {
        Self { key }
    }
}

impl EdgeButton for SimButton {
    fn on_press(&mut self, callback: fn()) {
        if let Ok(mut registry) = BUTTON_REGISTRY.lock() {
            registry.push((self.key, callback));
        }
    }
}

/// Start the stdin listener: each registered character typed (newline to
/// submit) fires its button callback, standing in for a GPIO edge.
pub fn spawn_stdin_listener() {
    let result = thread::Builder::new().name("sim-buttons".into()).spawn(|| {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for ch in line.chars() {
                let callbacks: Vec<fn()> = match BUTTON_REGISTRY.lock() {
                    Ok(registry) => registry
                        .iter()
                        .filter(|(key, _)| *key == ch)
                        .map(|(_, cb)| *cb)
                        .collect(),
                    Err(_) => return,
                };
                for cb in callbacks {
                    cb();
                }
            }
        }
    });
    let _ = result;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single test: the sim statics are process-wide, so the scenarios run
    /// in one sequence rather than racing across test threads.
    #[test]
    fn simulated_bus_and_thermal_model() {
        // Injected raw value is served on result-register reads.
        sim_set_raw(0x0C80); // 25 C
        let mut bus = SimSensorBus::new();
        let mut read = [0u8; 2];
        bus.transfer(&[0x01], &mut read).unwrap();
        assert_eq!(read, [0x0C, 0x80]);

        // Config writes are accepted without touching the read buffer.
        bus.transfer(&[0x02, 0x74, 0x00], &mut []).unwrap();

        // Forced failure hits every transaction, then recovers.
        sim_set_bus_fail(true);
        assert_eq!(
            bus.transfer(&[0x01], &mut read),
            Err(BusError::TransferFailed)
        );
        sim_set_bus_fail(false);

        // Heat asserted: the room warms; released: it decays to ambient.
        let mut pin = SimHeatPin::new();
        pin.write(true);
        sim_set_raw(AMBIENT_RAW);
        step_thermal_model();
        assert!(SIM_RAW.load(Ordering::Relaxed) > AMBIENT_RAW);

        pin.write(false);
        for _ in 0..8 {
            step_thermal_model();
        }
        assert_eq!(SIM_RAW.load(Ordering::Relaxed), AMBIENT_RAW);
    }
}
