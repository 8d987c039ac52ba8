/// Simulated scheduler clock.
pub mod clock;
pub mod engine;
/// Bounded history of periodic snapshots.
pub mod history;
/// Load-shedding recommendation ordering.
pub mod shedding;
pub mod stats;
/// Rate-limited overload warning.
pub mod throttle;
pub mod types;

pub use engine::MonitorEngine;
pub use history::{HistoryEntry, HistoryLog};
pub use stats::SessionStats;
pub use types::{Alert, AlertKind, HouseStatus, Recommendation, Summary, TickReport};
