use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::readings::types::{ReadingContext, ReadingSource};

/// Default probability of a sensor-fault (negative) reading.
pub const DEFAULT_FAULT_PROBABILITY: f64 = 0.1;
/// Default probability of an over-rated surge reading.
pub const DEFAULT_SURGE_PROBABILITY: f64 = 0.1;
/// Over-rated readings are this multiple of the rated maximum.
pub const SURGE_FACTOR: f64 = 1.3;
/// Value returned for a simulated sensor fault.
pub const FAULT_READING_A: f64 = -1.0;

/// Randomized reading source with injected fault and surge probabilities.
///
/// Each call first draws for a sensor fault, then for an over-rated surge,
/// and otherwise returns a value uniformly distributed in `(0, rated_max_a]`.
///
/// # Examples
///
/// ```
/// use load_monitor::readings::{RandomSource, ReadingContext, ReadingMode, ReadingSource};
///
/// let mut source = RandomSource::seeded(0.0, 0.0, 42);
/// let ctx = ReadingContext::new(0, 8.0, ReadingMode::Random);
/// let reading = source.next_reading(&ctx);
/// assert!(reading > 0.0 && reading <= 8.0);
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource<R: Rng = StdRng> {
    /// Probability of returning [`FAULT_READING_A`].
    pub fault_probability: f64,
    /// Probability of returning an over-rated reading.
    pub surge_probability: f64,
    rng: R,
}

impl RandomSource<StdRng> {
    /// Creates a source backed by a seeded [`StdRng`].
    pub fn seeded(fault_probability: f64, surge_probability: f64, seed: u64) -> Self {
        Self::new(fault_probability, surge_probability, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource<R> {
    /// Creates a source drawing from `rng`.
    ///
    /// Probabilities are clamped into `[0, 1]`.
    pub fn new(fault_probability: f64, surge_probability: f64, rng: R) -> Self {
        Self {
            fault_probability: fault_probability.clamp(0.0, 1.0),
            surge_probability: surge_probability.clamp(0.0, 1.0),
            rng,
        }
    }
}

impl<R: Rng> ReadingSource for RandomSource<R> {
    fn next_reading(&mut self, context: &ReadingContext) -> f64 {
        if self.rng.random::<f64>() < self.fault_probability {
            return FAULT_READING_A;
        }
        if self.rng.random::<f64>() < self.surge_probability {
            return context.rated_max_a * SURGE_FACTOR;
        }
        // random() is in [0, 1), so this lands in (0, max]
        context.rated_max_a * (1.0 - self.rng.random::<f64>())
    }

    fn source_type(&self) -> &'static str {
        "Random"
    }
}
