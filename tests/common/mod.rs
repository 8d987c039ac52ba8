//! Shared test fixtures for integration tests.

use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveDateTime};
use load_monitor::config::{MonitorConfig, Settings};
use load_monitor::devices::{Household, Priority};
use load_monitor::monitor::MonitorEngine;
use load_monitor::readings::{ReadingContext, ReadingSource};

/// Replays queued readings per appliance id; falls back to `idle_a` when a
/// queue runs dry.
pub struct QueuedSource {
    queues: Vec<VecDeque<f64>>,
    idle_a: f64,
}

impl QueuedSource {
    pub fn new(readings: Vec<Vec<f64>>, idle_a: f64) -> Self {
        Self {
            queues: readings.into_iter().map(VecDeque::from).collect(),
            idle_a,
        }
    }
}

impl ReadingSource for QueuedSource {
    fn next_reading(&mut self, context: &ReadingContext) -> f64 {
        self.queues
            .get_mut(context.appliance)
            .and_then(VecDeque::pop_front)
            .unwrap_or(self.idle_a)
    }

    fn source_type(&self) -> &'static str {
        "Queued"
    }
}

/// Timestamp on 2024-03-01 at the given wall-clock time.
pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .expect("valid timestamp")
}

/// Two sockets: group A holds one essential lamp, group B an essential fridge
/// and a non-essential heater (all 15 A rated).
pub fn two_socket_house() -> Household {
    let mut house = Household::new();
    house.add_new("Lamp", "Hall", "A", 15.0, Priority::Essential);
    house.add_new("Fridge", "Kitchen", "B", 15.0, Priority::Essential);
    house.add_new("Heater", "Kitchen", "B", 15.0, Priority::NonEssential);
    house
}

/// Engine over a queued source with the overload warning effectively disabled.
pub fn queued_engine(house: Household, readings: Vec<Vec<f64>>) -> MonitorEngine<QueuedSource> {
    MonitorEngine::seeded(house, QueuedSource::new(readings, 1.0), u32::MAX, 7)
}

/// Default settings with a surge threshold of 3 A and the given main limit.
pub fn settings_with_main(main_limit_a: f64) -> Settings {
    Settings {
        surge_threshold_a: 3.0,
        main_limit_a,
        ..Settings::default()
    }
}

/// Engine built the same way the binary builds it from a configuration.
pub fn engine_from_config(
    cfg: &MonitorConfig,
) -> MonitorEngine<load_monitor::readings::ConfiguredSource> {
    MonitorEngine::seeded(
        cfg.build_household(),
        cfg.build_source(),
        cfg.randomness.overload_one_in,
        cfg.randomness.seed.wrapping_add(101),
    )
}
