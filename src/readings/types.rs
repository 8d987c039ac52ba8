//! Common types and the trait every reading source implements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::devices::ApplianceId;

/// How readings are produced for a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingMode {
    /// Deterministic counter-driven sequence with injected faults.
    Scripted,
    /// Independent random draws with small fault and surge probabilities.
    #[default]
    Random,
}

impl fmt::Display for ReadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scripted => "scripted",
            Self::Random => "random",
        })
    }
}

/// Information passed to a source for each requested reading.
///
/// # Fields
/// * `appliance` - Registry id of the appliance being read
/// * `rated_max_a` - Rated maximum current of that appliance
/// * `mode` - Reading mode from the configuration snapshot of this tick
#[derive(Debug, Clone, Copy)]
pub struct ReadingContext {
    pub appliance: ApplianceId,
    pub rated_max_a: f64,
    pub mode: ReadingMode,
}

impl ReadingContext {
    pub fn new(appliance: ApplianceId, rated_max_a: f64, mode: ReadingMode) -> Self {
        Self {
            appliance,
            rated_max_a,
            mode,
        }
    }
}

/// Producer of raw current readings, consumed once per appliance per tick.
///
/// Sources are free to return implausible values (negative, above the rated
/// maximum); validation is the appliance's job.
pub trait ReadingSource {
    /// Returns the next raw current reading in amps for `context.appliance`.
    fn next_reading(&mut self, context: &ReadingContext) -> f64;

    /// Returns a short human-readable name for the source.
    fn source_type(&self) -> &'static str;
}
