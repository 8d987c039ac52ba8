//! Rate-limited synthetic overload warning.

use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;

/// Minimum quiet period between two overload warnings, in seconds.
pub const WARNING_COOLDOWN_SECS: i64 = 10 * 60;

/// Default odds of a warning on an eligible tick (one in this many).
pub const DEFAULT_ONE_IN: u32 = 100;

/// Gate for the low-probability "WARNING OVERLOAD" alert.
///
/// Once more than [`WARNING_COOLDOWN_SECS`] have passed since the last warning (or
/// none has fired yet), every tick draws once with odds `1 / one_in`. A
/// successful draw fires and restarts the cooldown.
#[derive(Debug, Clone)]
pub struct OverloadThrottle {
    one_in: u32,
    last_warning: Option<NaiveDateTime>,
}

impl OverloadThrottle {
    /// Creates a throttle firing with odds `1 / one_in` (`one_in` >= 1).
    pub fn new(one_in: u32) -> Self {
        Self {
            one_in: one_in.max(1),
            last_warning: None,
        }
    }

    /// Returns `true` when the cooldown has elapsed at `now`.
    pub fn is_eligible(&self, now: NaiveDateTime) -> bool {
        self.last_warning
            .is_none_or(|last| now - last > TimeDelta::seconds(WARNING_COOLDOWN_SECS))
    }

    /// Draws for a warning at `now`; returns `true` if one fires.
    pub fn poll<R: Rng>(&mut self, now: NaiveDateTime, rng: &mut R) -> bool {
        if !self.is_eligible(now) {
            return false;
        }
        if rng.random_range(0..self.one_in) == 0 {
            self.last_warning = Some(now);
            return true;
        }
        false
    }

    pub fn last_warning(&self) -> Option<NaiveDateTime> {
        self.last_warning
    }
}

impl Default for OverloadThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_ONE_IN)
    }
}
