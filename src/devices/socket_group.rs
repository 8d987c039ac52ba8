use crate::devices::appliance::Appliance;
use crate::devices::types::{ApplianceId, GroupStatus};

/// Total current below which a socket group is OK (amps).
pub const WARNING_THRESHOLD_A: f64 = 10.0;
/// Total current above which a socket group is in DANGER (amps).
pub const DANGER_THRESHOLD_A: f64 = 13.0;

/// A wiring circuit aggregating the current of the appliances plugged into it.
///
/// The group does not own its appliances; it holds their ids in the
/// [`super::Household`] registry and is evaluated against that slice.
#[derive(Debug, Clone)]
pub struct SocketGroup {
    name: String,
    members: Vec<ApplianceId>,
    total_current_a: f64,
    status: GroupStatus,
}

impl SocketGroup {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            total_current_a: 0.0,
            status: GroupStatus::Ok,
        }
    }

    /// Wires an appliance into this group.
    pub fn add(&mut self, id: ApplianceId) {
        self.members.push(id);
    }

    /// Recomputes the total current and status from member readings.
    ///
    /// Members whose latest reading is invalid are left out of the sum.
    ///
    /// # Panics
    ///
    /// Panics if a member id is out of range for `appliances`.
    pub fn evaluate(&mut self, appliances: &[Appliance]) -> GroupStatus {
        self.total_current_a = self
            .members
            .iter()
            .filter_map(|&id| appliances[id].counted_current_a())
            .sum();
        self.status = classify(self.total_current_a);
        self.status
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[ApplianceId] {
        &self.members
    }

    /// Total current from the last [`Self::evaluate`] call.
    pub fn total_current_a(&self) -> f64 {
        self.total_current_a
    }

    pub fn status(&self) -> GroupStatus {
        self.status
    }
}

/// Maps a group total onto the fixed OK / WARNING / DANGER bands.
///
/// Both band edges belong to WARNING: `10.0` and `13.0` are WARNING.
pub fn classify(total_current_a: f64) -> GroupStatus {
    if total_current_a < WARNING_THRESHOLD_A {
        GroupStatus::Ok
    } else if total_current_a <= DANGER_THRESHOLD_A {
        GroupStatus::Warning
    } else {
        GroupStatus::Danger
    }
}
