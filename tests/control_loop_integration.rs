//! Integration tests: scheduler → service → ports, over mock adapters.
//!
//! Records every actuator and serial call so the scenarios can assert on
//! the full command history without touching real peripherals.

use thermostat::app::events::AppEvent;
use thermostat::app::ports::{
    ActuatorPort, BusError, EventSink, SensorPort, SerialError, SerialPort,
};
use thermostat::app::service::{SENSOR_FAULT_C, ThermostatService};
use thermostat::config::ThermostatConfig;
use thermostat::events::EdgeEventLatch;
use thermostat::scheduler::{TaskId, TaskScheduler};

// ── Mock implementations ──────────────────────────────────────

struct MockHw {
    reading: Result<i16, BusError>,
    heat_commands: Vec<bool>,
}

impl MockHw {
    fn reading(celsius: i16) -> Self {
        Self {
            reading: Ok(celsius),
            heat_commands: Vec::new(),
        }
    }

    fn last_heat(&self) -> Option<bool> {
        self.heat_commands.last().copied()
    }
}

impl SensorPort for MockHw {
    fn read_temperature(&mut self) -> Result<i16, BusError> {
        self.reading
    }
}

impl ActuatorPort for MockHw {
    fn set_heat(&mut self, on: bool) {
        self.heat_commands.push(on);
    }
}

struct MockSerial {
    written: Vec<u8>,
    /// Max bytes accepted per write call, to exercise partial writes.
    chunk: usize,
}

impl MockSerial {
    fn new() -> Self {
        Self {
            written: Vec::new(),
            chunk: usize::MAX,
        }
    }

    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.written.clone())
            .unwrap()
            .split_inclusive("\r\n")
            .map(str::to_string)
            .collect()
    }
}

impl SerialPort for MockSerial {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SerialError> {
        let n = bytes.len().min(self.chunk);
        self.written.extend_from_slice(&bytes[..n]);
        Ok(n)
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Harness ───────────────────────────────────────────────────

struct Loop {
    scheduler: TaskScheduler,
    service: ThermostatService,
    latch: EdgeEventLatch,
    hw: MockHw,
    serial: MockSerial,
    sink: RecordingSink,
}

impl Loop {
    fn new(room_c: i16) -> Self {
        let config = ThermostatConfig::default();
        Self {
            scheduler: TaskScheduler::new(&config),
            service: ThermostatService::new(&config),
            latch: EdgeEventLatch::new(),
            hw: MockHw::reading(room_c),
            serial: MockSerial::new(),
            sink: RecordingSink::default(),
        }
    }

    /// Run `n` base ticks through the full dispatch path, recording the
    /// task order.
    fn run_ticks(&mut self, n: u64) -> Vec<TaskId> {
        let mut order = Vec::new();
        for _ in 0..n {
            let service = &mut self.service;
            let latch = &self.latch;
            let hw = &mut self.hw;
            let serial = &mut self.serial;
            let sink = &mut self.sink;
            self.scheduler.on_tick(|task| {
                order.push(task);
                match task {
                    TaskId::SetPointAdjust => service.button_task(latch, sink),
                    TaskId::TemperatureUpdate => service.temperature_task(hw, sink),
                    TaskId::StatusReport => service.report_task(serial, sink),
                }
            });
        }
        order
    }
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn one_second_of_ticks_dispatches_the_reference_pattern() {
    let mut looper = Loop::new(20);
    let order = looper.run_ticks(10);

    use TaskId::{SetPointAdjust as B, StatusReport as R, TemperatureUpdate as T};
    // t=2 B, t=4 B, t=5 T, t=6 B, t=8 B, t=10 B T R — fixed priority order.
    assert_eq!(order, vec![B, B, T, B, B, B, T, R]);
}

#[test]
fn cold_room_heats_then_lowered_set_point_stops_heating() {
    // Start: set_point 25, room 20 — first temperature pass heats.
    let mut looper = Loop::new(20);
    looper.run_ticks(5);
    assert!(looper.service.state().heat_on);
    assert_eq!(looper.hw.last_heat(), Some(true));

    // Ten lower-button presses, latched one per button pass.
    for _ in 0..10 {
        looper.latch.note_decrement();
        looper.run_ticks(2); // one button task per 2 ticks
    }
    assert_eq!(looper.service.state().set_point, 15);

    // Next temperature pass: room 20 >= set_point 15 — heat off.
    looper.run_ticks(5);
    assert!(!looper.service.state().heat_on);
    assert_eq!(looper.hw.last_heat(), Some(false));
    assert!(looper.sink.events.contains(&AppEvent::HeatChanged { on: false }));
}

#[test]
fn bus_failure_reports_sentinel_and_keeps_scheduling() {
    let mut looper = Loop::new(20);
    looper.hw.reading = Err(BusError::Timeout);

    looper.run_ticks(10);

    assert_eq!(looper.service.state().room_temperature, SENSOR_FAULT_C);
    assert!(looper.service.state().heat_on);
    assert!(looper
        .sink
        .events
        .contains(&AppEvent::SensorFault(BusError::Timeout)));
    // The report task still ran and serialized the sentinel.
    assert_eq!(looper.serial.lines(), vec!["<-1000,25,1,0000>\r\n"]);
}

#[test]
fn status_line_is_byte_exact_after_seven_intervals() {
    let mut looper = Loop::new(23);

    // 8 report intervals; the 8th record carries elapsed_seconds == 7.
    looper.run_ticks(80);

    let lines = looper.serial.lines();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[7], "<23,25,1,0007>\r\n");
}

#[test]
fn simultaneous_edges_each_apply_exactly_once() {
    let mut looper = Loop::new(20);
    looper.latch.note_increment();
    looper.latch.note_decrement();

    looper.run_ticks(2);

    // Net zero, but both adjustments happened, increment first.
    assert_eq!(looper.service.state().set_point, 25);
    let changes: Vec<&AppEvent> = looper
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::SetPointChanged { .. }))
        .collect();
    assert_eq!(
        changes,
        vec![
            &AppEvent::SetPointChanged { set_point: 26 },
            &AppEvent::SetPointChanged { set_point: 25 },
        ]
    );

    // Nothing left pending: further button passes apply nothing.
    looper.run_ticks(2);
    assert_eq!(looper.service.state().set_point, 25);
}

#[test]
fn edges_latched_between_button_passes_are_not_lost() {
    let mut looper = Loop::new(20);

    // Press during an odd tick — no button pass due yet.
    looper.run_ticks(1);
    looper.latch.note_increment();
    looper.run_ticks(1); // tick 2: button pass drains the press

    assert_eq!(looper.service.state().set_point, 26);
}

#[test]
fn partial_serial_writes_still_emit_the_full_line() {
    let mut looper = Loop::new(23);
    looper.serial.chunk = 3;

    looper.run_ticks(10);

    assert_eq!(looper.serial.lines(), vec!["<23,25,1,0000>\r\n"]);
}
