use chrono::{NaiveDateTime, TimeDelta};

/// A simulated wall clock that yields one timestamp per tick.
///
/// The `TickClock` stands in for the periodic scheduler: it produces `total`
/// timestamps spaced `interval` apart, starting at `start`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use load_monitor::monitor::clock::TickClock;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let mut clock = TickClock::new(start, TimeDelta::seconds(1), 3);
/// let mut seconds = Vec::new();
///
/// clock.run(|now| seconds.push((now - start).num_seconds()));
/// assert_eq!(seconds, vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct TickClock {
    /// Timestamp of the next tick; `None` once the calendar range is exhausted
    next: Option<NaiveDateTime>,
    interval: TimeDelta,
    /// Ticks issued so far
    current: u64,
    /// Total ticks to issue
    total: u64,
}

impl TickClock {
    /// Creates a new clock.
    ///
    /// # Arguments
    ///
    /// * `start` - Timestamp of the first tick
    /// * `interval` - Spacing between consecutive ticks
    /// * `total` - The total number of ticks the clock will issue
    pub fn new(start: NaiveDateTime, interval: TimeDelta, total: u64) -> Self {
        Self {
            next: Some(start),
            interval,
            current: 0,
            total,
        }
    }

    /// Advances the clock by one tick.
    ///
    /// # Returns
    ///
    /// * `Some(now)` - Timestamp of the tick being issued
    /// * `None` - If the clock has issued all its ticks
    pub fn tick(&mut self) -> Option<NaiveDateTime> {
        if self.current >= self.total {
            return None;
        }
        let now = self.next?;
        self.next = now.checked_add_signed(self.interval);
        self.current += 1;
        Some(now)
    }

    /// Runs a function for each remaining tick.
    pub fn run(&mut self, mut f: impl FnMut(NaiveDateTime)) {
        while let Some(now) = self.tick() {
            f(now);
        }
    }

    /// Ticks left before the clock is exhausted.
    pub fn remaining(&self) -> u64 {
        if self.next.is_none() {
            return 0;
        }
        self.total - self.current
    }
}

impl Iterator for TickClock {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        self.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn test_tick() {
        let mut clock = TickClock::new(midnight(), TimeDelta::seconds(1), 2);
        assert_eq!(clock.tick(), Some(midnight()));
        assert_eq!(clock.tick(), Some(midnight() + TimeDelta::seconds(1)));
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_interval_spacing() {
        let clock = TickClock::new(midnight(), TimeDelta::seconds(5), 4);
        let times: Vec<i64> = clock.map(|t| (t - midnight()).num_seconds()).collect();
        assert_eq!(times, vec![0, 5, 10, 15]);
    }

    #[test]
    fn test_long_runs_keep_ticking() {
        let mut clock = TickClock::new(midnight(), TimeDelta::milliseconds(1), u64::MAX);
        clock.current = u64::from(u32::MAX);
        assert_eq!(clock.tick(), Some(midnight()));
        assert_eq!(clock.tick(), Some(midnight() + TimeDelta::milliseconds(1)));
        assert_eq!(clock.remaining(), u64::MAX - u64::from(u32::MAX) - 2);
    }

    #[test]
    fn test_end_of_calendar_stops_cleanly() {
        let start = NaiveDateTime::MAX - TimeDelta::seconds(1);
        let mut clock = TickClock::new(start, TimeDelta::seconds(1), 5);
        assert_eq!(clock.by_ref().count(), 2);
        assert_eq!(clock.remaining(), 0);
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_empty_clock() {
        let mut clock = TickClock::new(midnight(), TimeDelta::seconds(1), 0);
        assert_eq!(clock.tick(), None);

        let mut was_called = false;
        clock.run(|_| was_called = true);
        assert!(!was_called);
    }
}
