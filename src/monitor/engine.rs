//! Monitor engine that runs one evaluation tick over the whole household.

use chrono::NaiveDateTime;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::devices::{GroupStatus, Household, ReadingStatus};
use crate::readings::{ReadingContext, ReadingSource};

use super::history::{HistoryEntry, HistoryLog, sampling_boundary};
use super::shedding::recommend_load_shedding;
use super::throttle::OverloadThrottle;
use super::types::{
    Alert, AlertKind, ApplianceRow, GroupRow, HouseStatus, Summary, TickReport,
};

/// Watt-seconds per kilowatt-hour.
const WATT_SECONDS_PER_KWH: f64 = 3_600_000.0;

/// Monitor engine owning the household, reading source and carried state.
///
/// Generic over `S: ReadingSource` and `R: Rng` so tests can inject a
/// scripted source and a deterministic random stream for the overload draw.
/// Carried across ticks: appliance readings, the energy accumulator, the
/// history log and the overload throttle. Everything else is tick-scoped.
pub struct MonitorEngine<S: ReadingSource, R: Rng = StdRng> {
    household: Household,
    source: S,
    rng: R,
    throttle: OverloadThrottle,
    history: HistoryLog,
    /// Boundary of the most recent history sample
    last_sampled: Option<NaiveDateTime>,
    energy_kwh: f64,
    ticks: u64,
}

impl<S: ReadingSource> MonitorEngine<S, StdRng> {
    /// Creates an engine whose overload draw uses a seeded [`StdRng`].
    pub fn seeded(household: Household, source: S, overload_one_in: u32, seed: u64) -> Self {
        Self::new(
            household,
            source,
            StdRng::seed_from_u64(seed),
            OverloadThrottle::new(overload_one_in),
        )
    }
}

impl<S: ReadingSource, R: Rng> MonitorEngine<S, R> {
    /// Creates a new monitor engine.
    ///
    /// # Arguments
    ///
    /// * `household` - Appliance registry with socket groups
    /// * `source` - Producer of one raw reading per appliance per tick
    /// * `rng` - Random stream for the overload warning draw
    /// * `throttle` - Overload warning gate
    pub fn new(household: Household, source: S, rng: R, throttle: OverloadThrottle) -> Self {
        Self {
            household,
            source,
            rng,
            throttle,
            history: HistoryLog::default(),
            last_sampled: None,
            energy_kwh: 0.0,
            ticks: 0,
        }
    }

    /// Runs one evaluation tick at wall-clock time `now`.
    ///
    /// `settings` is the configuration snapshot for this tick; it is only
    /// read, never retained, so edits take effect on the next call.
    ///
    /// # Returns
    ///
    /// A `TickReport` with this tick's alerts, recommendations, house status,
    /// summary figures, optional history snapshot and display rows.
    pub fn tick(&mut self, now: NaiveDateTime, settings: &Settings) -> TickReport {
        let mut alerts = Vec::new();

        // 1. Read and classify every appliance
        for (id, appliance) in self.household.appliances_mut().iter_mut().enumerate() {
            let context = ReadingContext::new(id, appliance.rated_max_a(), settings.mode);
            let reading_a = self.source.next_reading(&context);
            match appliance.update(reading_a, settings.surge_threshold_a) {
                ReadingStatus::Invalid => {
                    alerts.push(Alert::new(now, AlertKind::SensorFault(appliance.name().to_string())));
                }
                ReadingStatus::Surge => {
                    alerts.push(Alert::new(now, AlertKind::Surge(appliance.name().to_string())));
                }
                ReadingStatus::Ok => {}
            }
        }

        // 2. Aggregate socket groups into the house total
        let (appliances, groups) = self.household.split_mut();
        let mut total_current_a = 0.0;
        for group in groups.iter_mut() {
            let status = group.evaluate(appliances);
            total_current_a += group.total_current_a();
            if status == GroupStatus::Danger {
                alerts.push(Alert::new(
                    now,
                    AlertKind::SocketOverloaded(group.name().to_string()),
                ));
            }
        }

        // 3. Power, energy and cost
        let power_w = total_current_a * settings.voltage_v;
        self.energy_kwh += power_w * settings.tick_seconds / WATT_SECONDS_PER_KWH;
        let cost = self.energy_kwh * settings.tariff_per_kwh;

        // 4. House status and load shedding
        let (house_status, recommendations) = if total_current_a > settings.main_limit_a {
            let recommendations = recommend_load_shedding(self.household.appliances());
            info!(
                total_current_a,
                main_limit_a = settings.main_limit_a,
                candidates = recommendations.len(),
                "house over main limit, recommending load shedding"
            );
            (HouseStatus::Danger, recommendations)
        } else {
            (HouseStatus::Ok, Vec::new())
        };

        // 5. Periodic history sample, once per boundary
        let boundary = sampling_boundary(now).filter(|b| self.last_sampled != Some(*b));
        let snapshot = if let Some(boundary) = boundary {
            self.last_sampled = Some(boundary);
            let entry = HistoryEntry::new(now, total_current_a, power_w);
            if self.history.push(entry).is_some() {
                debug!("history full, evicted oldest entry");
            }
            info!(%entry, "history sample recorded");
            Some(entry)
        } else {
            None
        };

        // 6. Throttled synthetic overload warning
        if self.throttle.poll(now, &mut self.rng) {
            alerts.push(Alert::new(now, AlertKind::OverloadWarning));
        }

        for alert in &alerts {
            warn!(tick = self.ticks, "{}", alert.kind);
        }

        let summary = Summary {
            total_current_a,
            power_w,
            energy_kwh: self.energy_kwh,
            cost,
        };
        debug!(
            tick = self.ticks,
            total_current_a,
            power_w,
            cost,
            %house_status,
            "tick evaluated"
        );

        let report = TickReport {
            tick: self.ticks,
            time: now,
            alerts,
            recommendations,
            house_status,
            summary,
            snapshot,
            appliances: self.appliance_rows(),
            groups: self.group_rows(),
        };
        self.ticks += 1;
        report
    }

    fn appliance_rows(&self) -> Vec<ApplianceRow> {
        self.household
            .appliances()
            .iter()
            .map(|a| ApplianceRow {
                name: a.name().to_string(),
                location: a.location().to_string(),
                group: a.group().to_string(),
                current_a: a.current_a(),
                priority: a.priority(),
                status: a.status(),
            })
            .collect()
    }

    fn group_rows(&self) -> Vec<GroupRow> {
        self.household
            .groups()
            .iter()
            .map(|g| GroupRow {
                name: g.name().to_string(),
                total_current_a: g.total_current_a(),
                status: g.status(),
            })
            .collect()
    }

    /// Returns the appliance registry.
    pub fn household(&self) -> &Household {
        &self.household
    }

    /// Returns the bounded history log.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Energy accumulated since construction (kWh).
    pub fn energy_kwh(&self) -> f64 {
        self.energy_kwh
    }

    /// Number of ticks evaluated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns a reference to the reading source.
    pub fn source(&self) -> &S {
        &self.source
    }
}
