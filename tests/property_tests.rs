//! Property tests for the scheduling arithmetic and wire format.

use proptest::prelude::*;

use thermostat::config::ThermostatConfig;
use thermostat::events::EdgeEventLatch;
use thermostat::report::StatusRecord;
use thermostat::scheduler::{TaskId, TaskScheduler};
use thermostat::sensors::tmp006::convert_raw;

proptest! {
    /// For every tick count t, each task is dispatched iff its divisor
    /// divides t — checked over arbitrary run lengths.
    #[test]
    fn due_ness_matches_divisibility(n_ticks in 1u64..2_000) {
        let mut sched = TaskScheduler::new(&ThermostatConfig::default());
        let mut counts = (0u64, 0u64, 0u64);

        for _ in 0..n_ticks {
            let mut fired_this_tick = Vec::new();
            sched.on_tick(|task| fired_this_tick.push(task));
            let t = sched.tick_count();

            prop_assert_eq!(
                fired_this_tick.contains(&TaskId::SetPointAdjust),
                t % 2 == 0
            );
            prop_assert_eq!(
                fired_this_tick.contains(&TaskId::TemperatureUpdate),
                t % 5 == 0
            );
            prop_assert_eq!(
                fired_this_tick.contains(&TaskId::StatusReport),
                t % 10 == 0
            );

            counts.0 += u64::from(fired_this_tick.contains(&TaskId::SetPointAdjust));
            counts.1 += u64::from(fired_this_tick.contains(&TaskId::TemperatureUpdate));
            counts.2 += u64::from(fired_this_tick.contains(&TaskId::StatusReport));
        }

        prop_assert_eq!(counts, (n_ticks / 2, n_ticks / 5, n_ticks / 10));
    }

    /// The conversion is exactly the documented formula: drop 2 LSBs,
    /// divide by 32, truncate — always landing in 0..=511.
    #[test]
    fn conversion_matches_the_reference_formula(raw in any::<u16>()) {
        let celsius = convert_raw(raw.to_be_bytes());
        prop_assert_eq!(celsius, ((raw >> 2) / 32) as i16);
        prop_assert!((0..=511).contains(&celsius));
    }

    /// Every rendered status line is parseable back into its four fields.
    #[test]
    fn status_line_round_trips(
        room in any::<i16>(),
        set_point in any::<i16>(),
        heat_on in any::<bool>(),
        elapsed in any::<u32>(),
    ) {
        let record = StatusRecord {
            room_temperature: room,
            set_point,
            heat_on,
            elapsed_seconds: elapsed,
        };
        let line = record.render();

        let body = line
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix(">\r\n"))
            .expect("line must be <...> + CRLF");
        let fields: Vec<&str> = body.split(',').collect();
        prop_assert_eq!(fields.len(), 4);
        prop_assert_eq!(fields[0].parse::<i16>().unwrap(), room);
        prop_assert_eq!(fields[1].parse::<i16>().unwrap(), set_point);
        prop_assert_eq!(fields[2], if heat_on { "1" } else { "0" });
        prop_assert_eq!(fields[3].parse::<u32>().unwrap(), elapsed);
    }

    /// Any interleaving of set/drain episodes delivers every edge exactly
    /// once: total drained equals total episodes, nothing lost, nothing
    /// duplicated.
    #[test]
    fn latch_delivers_each_episode_exactly_once(episodes in 0usize..50) {
        let latch = EdgeEventLatch::new();
        let mut drained = 0usize;

        for _ in 0..episodes {
            latch.note_increment();
            let edges = latch.drain();
            prop_assert!(edges.increment);
            prop_assert!(!edges.decrement);
            drained += 1;

            // Idempotence: a second drain with nothing pending is empty.
            let empty = latch.drain();
            prop_assert!(!empty.increment && !empty.decrement);
        }

        prop_assert_eq!(drained, episodes);
    }
}
