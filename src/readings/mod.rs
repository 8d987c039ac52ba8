//! Current-reading sources feeding the monitor engine.

/// Mode-switching source driven by the settings snapshot.
pub mod configured;
/// Randomized readings with injected faults and surges.
pub mod random;
/// Deterministic counter-driven readings.
pub mod scripted;
pub mod types;

pub use configured::ConfiguredSource;
pub use random::RandomSource;
pub use scripted::{Injected, ScriptEvent, ScriptedSource};
pub use types::{ReadingContext, ReadingMode, ReadingSource};
