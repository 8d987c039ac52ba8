//! Tick output types handed to the display collaborator.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::devices::{GroupStatus, Priority, ReadingStatus};
use crate::monitor::history::HistoryEntry;

/// House-level status derived from the total current against the main limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HouseStatus {
    #[default]
    Ok,
    Danger,
}

impl fmt::Display for HouseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::Danger => "DANGER",
        })
    }
}

/// Condition raised during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "subject", rename_all = "snake_case")]
pub enum AlertKind {
    /// An appliance reading was rejected.
    SensorFault(String),
    /// An appliance reading rose by at least the surge threshold.
    Surge(String),
    /// A socket group total exceeded the danger band.
    SocketOverloaded(String),
    /// Rate-limited synthetic anomaly warning.
    OverloadWarning,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorFault(name) => write!(f, "Sensor fault on {name}"),
            Self::Surge(name) => write!(f, "Surge on {name}"),
            Self::SocketOverloaded(group) => write!(f, "{group} socket overloaded"),
            Self::OverloadWarning => f.write_str("WARNING OVERLOAD"),
        }
    }
}

/// An alert stamped with the wall-clock time of its tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub time: NaiveTime,
    pub kind: AlertKind,
}

impl Alert {
    /// Stamps `kind` with `now`, truncated to whole seconds.
    pub fn new(now: NaiveDateTime, kind: AlertKind) -> Self {
        let time = now.time().with_nanosecond(0).unwrap_or_else(|| now.time());
        Self { time, kind }
    }

    /// The alert text without its timestamp.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.time.format("%H:%M:%S"), self.kind)
    }
}

/// Suggestion to switch off one non-essential appliance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub appliance: String,
    pub location: String,
    /// Current the appliance drew when the recommendation was made (A).
    pub current_a: f64,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Switch off {}", self.appliance)
    }
}

/// House-wide figures for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of socket-group totals (A).
    pub total_current_a: f64,
    /// `total_current_a * voltage` (W).
    pub power_w: f64,
    /// Energy accumulated since the engine started (kWh).
    pub energy_kwh: f64,
    /// `energy_kwh * tariff`.
    pub cost: f64,
}

/// Per-appliance row for the display table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplianceRow {
    pub name: String,
    pub location: String,
    pub group: String,
    pub current_a: f64,
    pub priority: Priority,
    pub status: ReadingStatus,
}

/// Per-socket-group row for the display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub name: String,
    pub total_current_a: f64,
    pub status: GroupStatus,
}

/// Everything one tick publishes.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    /// 0-based tick counter.
    pub tick: u64,
    pub time: NaiveDateTime,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
    pub house_status: HouseStatus,
    pub summary: Summary,
    /// History entry appended on this tick, if it was a sampling instant.
    pub snapshot: Option<HistoryEntry>,
    pub appliances: Vec<ApplianceRow>,
    pub groups: Vec<GroupRow>,
}

impl TickReport {
    /// Alert texts without timestamps, in emission order.
    pub fn alert_messages(&self) -> Vec<String> {
        self.alerts.iter().map(Alert::message).collect()
    }

    /// Recommendation texts in priority order.
    pub fn recommendation_messages(&self) -> Vec<String> {
        self.recommendations.iter().map(ToString::to_string).collect()
    }

    pub fn has_alert(&self, kind: &AlertKind) -> bool {
        self.alerts.iter().any(|a| &a.kind == kind)
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>5} {} | I={:>6.2} A  P={:>6.0} W  E={:.4} kWh  cost={:.4} | house={} alerts={} shed={}",
            self.tick,
            self.time.format("%H:%M:%S"),
            self.summary.total_current_a,
            self.summary.power_w,
            self.summary.energy_kwh,
            self.summary.cost,
            self.house_status,
            self.alerts.len(),
            self.recommendations.len(),
        )
    }
}
