//! Household model: appliances, socket groups, and the registry owning them.

/// Single appliance reading validation and classification.
pub mod appliance;
pub mod household;
/// Socket-group aggregation and danger classification.
pub mod socket_group;
pub mod types;

pub use appliance::Appliance;
pub use household::Household;
pub use socket_group::SocketGroup;
pub use types::{ApplianceId, GroupStatus, Priority, ReadingStatus};
