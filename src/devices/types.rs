//! Common status and priority types shared by appliances and socket groups.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of an appliance inside the [`super::Household`] registry.
pub type ApplianceId = usize;

/// Load-shedding priority of an appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Must stay on; never recommended for switch-off.
    Essential,
    /// Candidate for load shedding.
    NonEssential,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Essential => "ESSENTIAL",
            Self::NonEssential => "NON_ESSENTIAL",
        })
    }
}

/// Classification of the latest reading of a single appliance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadingStatus {
    #[default]
    Ok,
    /// Reading was `<= 0` or above the rated maximum and was rejected.
    Invalid,
    /// Tick-to-tick increase reached the surge threshold.
    Surge,
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::Invalid => "INVALID",
            Self::Surge => "SURGE",
        })
    }
}

/// Danger classification of a socket group, derived from its total current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupStatus {
    #[default]
    Ok,
    Warning,
    Danger,
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
        })
    }
}
