//! Thermostat firmware — host-simulation entry point.
//!
//! Wires the simulated peripherals to the control core and runs the real
//! scheduler at wall-clock speed:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                       │
//! │  SimSensorBus   SimHeatPin   SimSerial   SimTimer  SimButton │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │  TaskScheduler ──▶ ThermostatService (pure logic)  │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Type `+` or `-` (then newline) to nudge the set-point, exactly like the
//! two board buttons.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{error, info, warn};

use thermostat::adapters::hardware::HardwareAdapter;
use thermostat::adapters::log_sink::LogEventSink;
use thermostat::adapters::sim::{
    self, SimButton, SimHeatPin, SimSensorBus, SimSerial, SimTimer,
};
use thermostat::app::events::AppEvent;
use thermostat::app::ports::{EdgeButton, EventSink, PeriodicTimer};
use thermostat::app::service::ThermostatService;
use thermostat::config::ThermostatConfig;
use thermostat::drivers::heater::HeaterDriver;
use thermostat::error::Error;
use thermostat::events;
use thermostat::report;
use thermostat::scheduler::{TaskId, TaskScheduler};
use thermostat::sensors::tmp006::Tmp006;

/// Log and return a fatal initialization error: the control loop must not
/// start half-initialized.
fn fatal(err: Error) -> Error {
    error!("fatal init: {err} — refusing to enter the control loop");
    err
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("thermostat v{} (host simulation)", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = ThermostatConfig::default();
    config.validate().map_err(|m| fatal(Error::Config(m)))?;

    // ── 3. Serial sink + banner ───────────────────────────────
    let mut serial = SimSerial::new();
    report::write_all(&mut serial, b"thermostat ready\r\n")
        .map_err(|e| fatal(Error::Serial(e)))?;

    // ── 4. Sensor + actuator behind the hardware adapter ──────
    let mut hw = HardwareAdapter::new(
        Tmp006::new(SimSensorBus::new()),
        HeaterDriver::new(SimHeatPin::new()),
    );
    if let Err(e) = hw.configure_sensor() {
        // Transient bus fault: the periodic reads report their own failures.
        warn!("sensor configuration failed: {e} — continuing");
    }

    // ── 5. Buttons → edge latch ───────────────────────────────
    let mut raise = SimButton::new('+');
    raise.on_press(events::set_point_up_isr);
    let mut lower = SimButton::new('-');
    lower.on_press(events::set_point_down_isr);
    sim::spawn_stdin_listener();
    info!("buttons: '+' raises the set-point, '-' lowers it (newline to submit)");

    // ── 6. Base tick timer ────────────────────────────────────
    let mut timer = SimTimer::new();
    timer
        .start(config.tick_period_us, events::tick_isr)
        .map_err(|e| fatal(Error::Timer(e)))?;

    // ── 7. Service + scheduler ────────────────────────────────
    let mut service = ThermostatService::new(&config);
    let mut scheduler = TaskScheduler::new(&config);
    let mut sink = LogEventSink::new();
    service.start(&mut sink);

    info!("entering control loop ({} us base tick)", config.tick_period_us);
    let mut reported_overruns = 0u32;

    loop {
        // Idle until the next tick; the ISR side only touches the signal.
        while !events::TICK.take() {
            thread::sleep(Duration::from_millis(1));
        }

        scheduler.on_tick(|task| match task {
            TaskId::SetPointAdjust => service.button_task(&events::BUTTONS, &mut sink),
            TaskId::TemperatureUpdate => service.temperature_task(&mut hw, &mut sink),
            TaskId::StatusReport => service.report_task(&mut serial, &mut sink),
        });

        // Surface lost ticks; an overrun is an error condition, not fatal.
        let overruns = events::TICK.overruns();
        if overruns > reported_overruns {
            warn!("scheduling overrun: {overruns} base ticks lost since startup");
            sink.emit(&AppEvent::SchedulingOverrun { total: overruns });
            reported_overruns = overruns;
        }

        sim::step_thermal_model();
    }
}
