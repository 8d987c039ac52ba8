use crate::readings::types::{ReadingContext, ReadingSource};

/// Fraction of the rated maximum returned on steps without a scripted event.
pub const DEFAULT_BASELINE_FRACTION: f64 = 0.3;

/// Value injected by a [`ScriptEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Injected {
    /// Multiple of the appliance's rated maximum (e.g. `1.4` is over-rated).
    RatedFraction(f64),
    /// Absolute value in amps (e.g. `-2.0` for a sensor fault).
    Amps(f64),
}

/// A reading injected at a fixed call count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptEvent {
    /// 1-based call number the event fires on.
    pub step: u64,
    pub value: Injected,
}

impl ScriptEvent {
    pub fn new(step: u64, value: Injected) -> Self {
        Self { step, value }
    }
}

/// Deterministic reading source for repeatable runs.
///
/// Every call advances a counter. Calls matching a scripted event return the
/// injected value; all other calls return `baseline_fraction * rated_max_a`.
/// The default script injects an over-rated reading at call 5, a negative
/// reading at call 8 and a full-rating jump at call 12.
///
/// # Examples
///
/// ```
/// use load_monitor::readings::{ReadingContext, ReadingMode, ReadingSource, ScriptedSource};
///
/// let mut source = ScriptedSource::default();
/// let ctx = ReadingContext::new(0, 10.0, ReadingMode::Scripted);
/// let first: Vec<f64> = (0..5).map(|_| source.next_reading(&ctx)).collect();
/// assert_eq!(first[..4], [3.0, 3.0, 3.0, 3.0]);
/// assert!(first[4] > 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    step: u64,
    baseline_fraction: f64,
    events: Vec<ScriptEvent>,
}

impl ScriptedSource {
    /// Creates a source with a custom script.
    pub fn new(baseline_fraction: f64, events: Vec<ScriptEvent>) -> Self {
        Self {
            step: 0,
            baseline_fraction,
            events,
        }
    }

    /// Number of readings produced so far.
    pub fn step(&self) -> u64 {
        self.step
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new(
            DEFAULT_BASELINE_FRACTION,
            vec![
                ScriptEvent::new(5, Injected::RatedFraction(1.4)),
                ScriptEvent::new(8, Injected::Amps(-2.0)),
                ScriptEvent::new(12, Injected::RatedFraction(1.0)),
            ],
        )
    }
}

impl ReadingSource for ScriptedSource {
    fn next_reading(&mut self, context: &ReadingContext) -> f64 {
        self.step += 1;
        let event = self.events.iter().find(|e| e.step == self.step);
        match event.map(|e| e.value) {
            Some(Injected::RatedFraction(f)) => context.rated_max_a * f,
            Some(Injected::Amps(a)) => a,
            None => context.rated_max_a * self.baseline_fraction,
        }
    }

    fn source_type(&self) -> &'static str {
        "Scripted"
    }
}
