//! Bounded log of periodic house-wide snapshots.

use std::collections::VecDeque;
use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// Maximum number of entries kept: one day at one sample per ten minutes.
pub const HISTORY_CAPACITY: usize = 144;

/// Minutes between sampling instants.
pub const SAMPLE_EVERY_MINUTES: u32 = 10;

/// Immutable snapshot of house-wide current and power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub time: NaiveDateTime,
    pub total_current_a: f64,
    pub total_power_w: f64,
}

impl HistoryEntry {
    pub fn new(time: NaiveDateTime, total_current_a: f64, total_power_w: f64) -> Self {
        Self {
            time,
            total_current_a,
            total_power_w,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Current: {:.2}A | Power: {:.0}W",
            self.time.format("%H:%M:%S"),
            self.total_current_a,
            self.total_power_w
        )
    }
}

/// Returns `true` at second 0 of every tenth minute of the hour.
pub fn is_sampling_instant(now: NaiveDateTime) -> bool {
    now.minute() % SAMPLE_EVERY_MINUTES == 0 && now.second() == 0
}

/// Returns the whole-minute boundary `now` samples for, or `None` outside a
/// sampling instant. Sub-second ticks inside the same second share one
/// boundary.
pub fn sampling_boundary(now: NaiveDateTime) -> Option<NaiveDateTime> {
    if is_sampling_instant(now) {
        now.with_nanosecond(0)
    } else {
        None
    }
}

/// Fixed-capacity FIFO of [`HistoryEntry`] values; the oldest entry is
/// evicted once capacity is exceeded.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    /// Creates a log holding at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry and returns the evicted one, if any.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn entries(&self) -> &VecDeque<HistoryEntry> {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .expect("valid timestamp")
    }

    #[test]
    fn sampling_boundary_truncates_sub_second_ticks() {
        let half = at(10, 0, 0) + TimeDelta::milliseconds(500);
        assert_eq!(sampling_boundary(at(10, 0, 0)), Some(at(10, 0, 0)));
        assert_eq!(sampling_boundary(half), Some(at(10, 0, 0)));
        assert_eq!(sampling_boundary(at(10, 0, 1)), None);
        assert_eq!(sampling_boundary(at(10, 5, 0)), None);
    }

    #[test]
    fn sampling_instants() {
        assert!(is_sampling_instant(at(0, 0, 0)));
        assert!(is_sampling_instant(at(13, 50, 0)));
        assert!(!is_sampling_instant(at(13, 50, 1)));
        assert!(!is_sampling_instant(at(13, 55, 0)));
        assert!(!is_sampling_instant(at(13, 9, 0)));
    }

    #[test]
    fn never_exceeds_capacity_and_evicts_oldest_first() {
        let mut log = HistoryLog::default();
        let start = at(0, 0, 0);
        for i in 0..200_i64 {
            let time = start + TimeDelta::minutes(10 * i);
            let evicted = log.push(HistoryEntry::new(time, i as f64, 0.0));
            assert!(log.len() <= HISTORY_CAPACITY);
            if i >= HISTORY_CAPACITY as i64 {
                let evicted = evicted.expect("full log evicts");
                assert_eq!(evicted.total_current_a, (i - HISTORY_CAPACITY as i64) as f64);
            } else {
                assert!(evicted.is_none());
            }
        }
        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.entries().front().map(|e| e.total_current_a), Some(56.0));
        assert_eq!(log.latest().map(|e| e.total_current_a), Some(199.0));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut log = HistoryLog::with_capacity(0);
        log.push(HistoryEntry::new(at(0, 0, 0), 1.0, 230.0));
        log.push(HistoryEntry::new(at(0, 10, 0), 2.0, 460.0));
        assert_eq!(log.len(), 1);
        assert_eq!(log.capacity(), 1);
    }

    #[test]
    fn entry_display() {
        let e = HistoryEntry::new(at(8, 30, 0), 12.346, 2839.35);
        assert_eq!(e.to_string(), "08:30:00 | Current: 12.35A | Power: 2839W");
    }
}
