//! Post-hoc session statistics computed from tick reports.

use std::fmt;

use serde::Serialize;

use super::types::{AlertKind, HouseStatus, TickReport};

/// Aggregate figures derived from a complete monitoring session.
///
/// Computed post-hoc from `&[TickReport]` so the figures always agree with
/// what was published tick by tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    /// Number of ticks evaluated.
    pub ticks: usize,
    /// Highest house-wide current seen (A).
    pub peak_current_a: f64,
    /// Highest house-wide power seen (W).
    pub peak_power_w: f64,
    /// Mean house-wide current (A).
    pub mean_current_a: f64,
    /// Ticks where the house exceeded the main limit.
    pub danger_ticks: usize,
    /// Ticks that produced at least one load-shedding recommendation.
    pub shedding_ticks: usize,
    pub sensor_faults: usize,
    pub surges: usize,
    pub socket_overloads: usize,
    pub overload_warnings: usize,
    /// History samples recorded during the session.
    pub history_samples: usize,
    /// Energy at the end of the session (kWh).
    pub energy_kwh: f64,
    /// Cost at the end of the session.
    pub cost: f64,
}

impl SessionStats {
    /// Computes all figures from the complete report sequence.
    pub fn from_reports(reports: &[TickReport]) -> Self {
        let Some(last) = reports.last() else {
            return Self::default();
        };

        let mut stats = Self {
            ticks: reports.len(),
            energy_kwh: last.summary.energy_kwh,
            cost: last.summary.cost,
            ..Self::default()
        };
        let mut current_sum = 0.0_f64;

        for r in reports {
            current_sum += r.summary.total_current_a;
            stats.peak_current_a = stats.peak_current_a.max(r.summary.total_current_a);
            stats.peak_power_w = stats.peak_power_w.max(r.summary.power_w);

            if r.house_status == HouseStatus::Danger {
                stats.danger_ticks += 1;
            }
            if !r.recommendations.is_empty() {
                stats.shedding_ticks += 1;
            }
            if r.snapshot.is_some() {
                stats.history_samples += 1;
            }

            for alert in &r.alerts {
                match alert.kind {
                    AlertKind::SensorFault(_) => stats.sensor_faults += 1,
                    AlertKind::Surge(_) => stats.surges += 1,
                    AlertKind::SocketOverloaded(_) => stats.socket_overloads += 1,
                    AlertKind::OverloadWarning => stats.overload_warnings += 1,
                }
            }
        }

        stats.mean_current_a = current_sum / reports.len() as f64;
        stats
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Session Report ---")?;
        writeln!(f, "Ticks:                 {}", self.ticks)?;
        writeln!(f, "Peak current:          {:.2} A", self.peak_current_a)?;
        writeln!(f, "Mean current:          {:.2} A", self.mean_current_a)?;
        writeln!(f, "Peak power:            {:.0} W", self.peak_power_w)?;
        writeln!(f, "Danger ticks:          {}", self.danger_ticks)?;
        writeln!(f, "Shedding ticks:        {}", self.shedding_ticks)?;
        writeln!(
            f,
            "Alerts:                {} faults, {} surges, {} socket overloads, {} warnings",
            self.sensor_faults, self.surges, self.socket_overloads, self.overload_warnings
        )?;
        writeln!(f, "History samples:       {}", self.history_samples)?;
        writeln!(f, "Energy:                {:.4} kWh", self.energy_kwh)?;
        write!(f, "Cost:                  {:.4}", self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::types::{Alert, Recommendation, Summary};
    use chrono::{NaiveDate, NaiveDateTime};

    fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 1))
            .expect("valid timestamp")
    }

    fn make_report(total_current_a: f64, house_status: HouseStatus, alerts: Vec<AlertKind>) -> TickReport {
        let recommendations = if house_status == HouseStatus::Danger {
            vec![Recommendation {
                appliance: "Kettle".into(),
                location: "Kitchen".into(),
                current_a: 5.0,
            }]
        } else {
            Vec::new()
        };
        TickReport {
            tick: 0,
            time: midnight(),
            alerts: alerts.into_iter().map(|k| Alert::new(midnight(), k)).collect(),
            recommendations,
            house_status,
            summary: Summary {
                total_current_a,
                power_w: total_current_a * 230.0,
                energy_kwh: total_current_a,
                cost: total_current_a * 2.0,
            },
            snapshot: None,
            appliances: vec![],
            groups: vec![],
        }
    }

    #[test]
    fn empty_reports() {
        let stats = SessionStats::from_reports(&[]);
        assert_eq!(stats, SessionStats::default());
    }

    #[test]
    fn peaks_means_and_counts() {
        let reports = vec![
            make_report(10.0, HouseStatus::Ok, vec![AlertKind::Surge("AC".into())]),
            make_report(
                40.0,
                HouseStatus::Danger,
                vec![
                    AlertKind::SensorFault("TV".into()),
                    AlertKind::SocketOverloaded("Kitchen".into()),
                ],
            ),
            make_report(4.0, HouseStatus::Ok, vec![AlertKind::OverloadWarning]),
        ];
        let stats = SessionStats::from_reports(&reports);
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.peak_current_a, 40.0);
        assert_eq!(stats.peak_power_w, 9200.0);
        assert!((stats.mean_current_a - 18.0).abs() < 1e-9);
        assert_eq!(stats.danger_ticks, 1);
        assert_eq!(stats.shedding_ticks, 1);
        assert_eq!(
            (stats.sensor_faults, stats.surges, stats.socket_overloads, stats.overload_warnings),
            (1, 1, 1, 1)
        );
        // final figures come from the last report
        assert_eq!(stats.energy_kwh, 4.0);
        assert_eq!(stats.cost, 8.0);
    }

    #[test]
    fn display_does_not_panic() {
        let stats = SessionStats::from_reports(&[make_report(1.0, HouseStatus::Ok, vec![])]);
        assert!(format!("{stats}").contains("Session Report"));
    }
}
