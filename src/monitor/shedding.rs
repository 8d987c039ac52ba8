//! Load-shedding recommendations for an overloaded house.

use crate::devices::{Appliance, Priority};
use crate::monitor::types::Recommendation;

/// Orders non-essential appliances by current draw, highest first.
///
/// Essential appliances are never recommended. Equal draws keep registry
/// order, so the result is deterministic.
pub fn recommend_load_shedding(appliances: &[Appliance]) -> Vec<Recommendation> {
    let mut candidates: Vec<&Appliance> = appliances
        .iter()
        .filter(|a| a.priority() == Priority::NonEssential)
        .collect();
    // stable sort keeps registry order for ties
    candidates.sort_by(|a, b| b.current_a().total_cmp(&a.current_a()));

    candidates
        .into_iter()
        .map(|a| Recommendation {
            appliance: a.name().to_string(),
            location: a.location().to_string(),
            current_a: a.current_a(),
        })
        .collect()
}
