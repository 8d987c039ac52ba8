use crate::devices::types::{Priority, ReadingStatus};

/// A monitored household load with a fixed identity and rated maximum current.
///
/// `Appliance` keeps the last two accepted readings and classifies every new
/// reading against them. Rejected readings freeze the observable state: only
/// the status changes.
///
/// # Examples
///
/// ```
/// use load_monitor::devices::{Appliance, Priority, ReadingStatus};
///
/// let mut kettle = Appliance::new("Kettle", "Kitchen", "Kitchen", 10.0, Priority::NonEssential);
/// kettle.update(5.0, 3.0);
/// kettle.update(9.0, 3.0);
/// assert_eq!(kettle.status(), ReadingStatus::Surge);
///
/// kettle.update(-1.0, 3.0);
/// assert_eq!(kettle.status(), ReadingStatus::Invalid);
/// assert_eq!(kettle.current_a(), 9.0);
/// ```
#[derive(Debug, Clone)]
pub struct Appliance {
    name: String,
    location: String,
    group: String,
    rated_max_a: f64,
    priority: Priority,
    current_a: f64,
    previous_a: f64,
    status: ReadingStatus,
}

impl Appliance {
    /// Creates an appliance with no accepted reading yet (both currents at zero).
    ///
    /// # Arguments
    ///
    /// * `name` - Display name, used in alerts and recommendations
    /// * `location` - Room the appliance sits in
    /// * `group` - Name of the socket group it is wired to
    /// * `rated_max_a` - Highest plausible reading in amps
    /// * `priority` - Load-shedding priority
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        group: impl Into<String>,
        rated_max_a: f64,
        priority: Priority,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            group: group.into(),
            rated_max_a,
            priority,
            current_a: 0.0,
            previous_a: 0.0,
            status: ReadingStatus::Ok,
        }
    }

    /// Validates and classifies a new reading.
    ///
    /// Readings `<= 0` or above the rated maximum mark the appliance
    /// [`ReadingStatus::Invalid`] and leave both currents untouched. Otherwise
    /// the reading is accepted and classified as [`ReadingStatus::Surge`] when
    /// it rose by at least `surge_threshold_a` since the previous reading.
    pub fn update(&mut self, reading_a: f64, surge_threshold_a: f64) -> ReadingStatus {
        // NaN fails both comparisons, so reject it explicitly.
        if reading_a.is_nan() || reading_a <= 0.0 || reading_a > self.rated_max_a {
            self.status = ReadingStatus::Invalid;
            return self.status;
        }

        self.previous_a = self.current_a;
        self.current_a = reading_a;

        let delta = self.current_a - self.previous_a;
        self.status = if delta >= surge_threshold_a {
            ReadingStatus::Surge
        } else {
            ReadingStatus::Ok
        };
        self.status
    }

    /// Current that counts towards load accounting (`None` while invalid).
    pub fn counted_current_a(&self) -> Option<f64> {
        (self.status != ReadingStatus::Invalid).then_some(self.current_a)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Name of the socket group this appliance is wired to.
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn rated_max_a(&self) -> f64 {
        self.rated_max_a
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Last accepted reading in amps.
    pub fn current_a(&self) -> f64 {
        self.current_a
    }

    /// Accepted reading before [`Self::current_a`].
    pub fn previous_a(&self) -> f64 {
        self.previous_a
    }

    pub fn status(&self) -> ReadingStatus {
        self.status
    }
}
