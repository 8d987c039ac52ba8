//! TOML-based monitor configuration, settings snapshots and preset households.

use std::fs;
use std::path::Path;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::devices::{Household, Priority};
use crate::monitor::throttle::DEFAULT_ONE_IN;
use crate::readings::random::{DEFAULT_FAULT_PROBABILITY, DEFAULT_SURGE_PROBABILITY};
use crate::readings::{ConfiguredSource, RandomSource, ReadingMode, ScriptedSource};

/// Shortest accepted tick length in seconds.
pub const MIN_TICK_SECONDS: f64 = 0.001;

/// Top-level monitor configuration parsed from TOML.
///
/// All sections have defaults matching the `household` preset. Load from
/// TOML with [`MonitorConfig::from_toml_file`] or use
/// [`MonitorConfig::household`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Operating parameters read by the engine on every tick.
    #[serde(default)]
    pub settings: Settings,
    /// Seeds and odds for the randomized parts of a run.
    #[serde(default)]
    pub randomness: RandomnessConfig,
    /// Appliances to monitor, in registry order.
    #[serde(default = "default_appliances", rename = "appliance")]
    pub appliances: Vec<ApplianceConfig>,
}

/// Operating parameters of the monitor.
///
/// A `Settings` value is an immutable snapshot handed to each tick; edits
/// produce a new snapshot through [`Settings::with_field`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Tick-to-tick rise that classifies a reading as a surge (A).
    pub surge_threshold_a: f64,
    /// House total above which the house is in danger (A).
    pub main_limit_a: f64,
    /// Cost per kWh.
    pub tariff_per_kwh: f64,
    /// Supply voltage used for `power = current * voltage` (V).
    pub voltage_v: f64,
    /// Reading mode: `"scripted"` or `"random"`.
    pub mode: ReadingMode,
    /// Seconds between ticks; scales energy integration.
    pub tick_seconds: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            surge_threshold_a: 3.0,
            main_limit_a: 30.0,
            tariff_per_kwh: 1.5,
            voltage_v: 230.0,
            mode: ReadingMode::Random,
            tick_seconds: 1.0,
        }
    }
}

/// Seeds and odds for randomized readings and the overload warning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomnessConfig {
    /// Master random seed.
    pub seed: u64,
    /// Probability of a negative sensor-fault reading.
    pub fault_probability: f64,
    /// Probability of an over-rated reading.
    pub surge_probability: f64,
    /// The overload warning fires with odds one in this many.
    pub overload_one_in: u32,
}

impl Default for RandomnessConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fault_probability: DEFAULT_FAULT_PROBABILITY,
            surge_probability: DEFAULT_SURGE_PROBABILITY,
            overload_one_in: DEFAULT_ONE_IN,
        }
    }
}

/// One `[[appliance]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceConfig {
    pub name: String,
    pub location: String,
    /// Socket group the appliance is wired to.
    pub group: String,
    /// Rated maximum current (A).
    pub rated_max_a: f64,
    pub priority: Priority,
}

impl ApplianceConfig {
    fn new(name: &str, location: &str, group: &str, rated_max_a: f64, priority: Priority) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            group: group.to_string(),
            rated_max_a,
            priority,
        }
    }
}

/// The reference household: kitchen, living room, bedroom and laundry
/// sockets plus the hardwired circuit.
fn default_appliances() -> Vec<ApplianceConfig> {
    use Priority::{Essential, NonEssential};
    vec![
        ApplianceConfig::new("Kettle", "Kitchen", "Kitchen", 10.0, NonEssential),
        ApplianceConfig::new("Microwave", "Kitchen", "Kitchen", 8.0, NonEssential),
        ApplianceConfig::new("Fridge", "Kitchen", "Kitchen", 4.0, Essential),
        ApplianceConfig::new("TV", "Living Room", "Living", 2.0, Essential),
        ApplianceConfig::new("Decoder", "Living Room", "Living", 1.5, NonEssential),
        ApplianceConfig::new("Standing Fan", "Bedroom", "Bedroom", 1.5, Essential),
        ApplianceConfig::new("Iron", "Bedroom", "Bedroom", 10.0, NonEssential),
        ApplianceConfig::new("Washing Machine", "Laundry", "Laundry", 8.0, NonEssential),
        ApplianceConfig::new("AC", "Bedroom", "Hardwired", 12.0, NonEssential),
        ApplianceConfig::new("Ceiling Lights", "Bedroom", "Hardwired", 3.0, Essential),
        ApplianceConfig::new("Ceiling Fan", "Bedroom", "Hardwired", 1.5, Essential),
        ApplianceConfig::new("AC", "Living Room", "Hardwired", 12.0, NonEssential),
        ApplianceConfig::new("Ceiling Lights", "Living Room", "Hardwired", 3.0, Essential),
        ApplianceConfig::new("Ceiling Fan", "Living Room", "Hardwired", 1.5, Essential),
    ]
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"settings.main_limit_a"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Settings {
    /// Names accepted by [`Self::with_field`].
    pub const FIELDS: &[&str] = &[
        "surge_threshold_a",
        "main_limit_a",
        "tariff_per_kwh",
        "voltage_v",
        "mode",
        "tick_seconds",
    ];

    /// Returns a new snapshot with one field replaced by a parsed textual value.
    ///
    /// This is the setter surface used by settings editors between ticks.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the field is unknown, the value does not
    /// parse, or the resulting snapshot fails validation.
    pub fn with_field(&self, field: &str, value: &str) -> Result<Self, ConfigError> {
        let path = format!("settings.{field}");
        let number = || {
            value
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::new(path.clone(), format!("\"{value}\" is not a number: {e}")))
        };

        let mut next = self.clone();
        match field {
            "surge_threshold_a" => next.surge_threshold_a = number()?,
            "main_limit_a" => next.main_limit_a = number()?,
            "tariff_per_kwh" => next.tariff_per_kwh = number()?,
            "voltage_v" => next.voltage_v = number()?,
            "tick_seconds" => next.tick_seconds = number()?,
            "mode" => {
                next.mode = match value.trim() {
                    "scripted" => ReadingMode::Scripted,
                    "random" => ReadingMode::Random,
                    other => {
                        return Err(ConfigError::new(
                            path,
                            format!("must be \"scripted\" or \"random\", got \"{other}\""),
                        ));
                    }
                }
            }
            _ => {
                return Err(ConfigError::new(
                    path,
                    format!("unknown setting, available: {}", Self::FIELDS.join(", ")),
                ));
            }
        }

        match next.validate().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(next),
        }
    }

    /// Applies a `field=value` assignment, as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the assignment has no `=` or
    /// [`Self::with_field`] rejects it.
    pub fn with_assignment(&self, assignment: &str) -> Result<Self, ConfigError> {
        let (field, value) = assignment.split_once('=').ok_or_else(|| {
            ConfigError::new("settings", format!("expected field=value, got \"{assignment}\""))
        })?;
        self.with_field(field.trim(), value)
    }

    /// Spacing between scheduled ticks, matching the `tick_seconds` used
    /// for energy integration to the nanosecond.
    pub fn tick_interval(&self) -> TimeDelta {
        TimeDelta::nanoseconds((self.tick_seconds * 1e9).round() as i64)
    }

    /// Validates all fields and returns a list of errors.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let positive = [
            ("settings.surge_threshold_a", self.surge_threshold_a),
            ("settings.main_limit_a", self.main_limit_a),
            ("settings.voltage_v", self.voltage_v),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ConfigError::new(field, "must be a finite number > 0"));
            }
        }
        if !(self.tick_seconds.is_finite() && self.tick_seconds >= MIN_TICK_SECONDS) {
            errors.push(ConfigError::new(
                "settings.tick_seconds",
                format!("must be a finite number >= {MIN_TICK_SECONDS}"),
            ));
        }
        if !(self.tariff_per_kwh.is_finite() && self.tariff_per_kwh >= 0.0) {
            errors.push(ConfigError::new(
                "settings.tariff_per_kwh",
                "must be a finite number >= 0",
            ));
        }
        errors
    }
}

impl MonitorConfig {
    /// Returns the reference household with default settings.
    pub fn household() -> Self {
        Self {
            settings: Settings::default(),
            randomness: RandomnessConfig::default(),
            appliances: default_appliances(),
        }
    }

    /// Returns the scripted demo preset: deterministic readings with a
    /// low surge threshold so the injected jump registers as a surge.
    pub fn scripted_demo() -> Self {
        Self {
            settings: Settings {
                mode: ReadingMode::Scripted,
                surge_threshold_a: 2.0,
                ..Settings::default()
            },
            ..Self::household()
        }
    }

    /// Returns the tight-main preset: a 15 A main limit that routinely trips
    /// load shedding.
    pub fn tight_main() -> Self {
        Self {
            settings: Settings {
                main_limit_a: 15.0,
                ..Settings::default()
            },
            randomness: RandomnessConfig {
                fault_probability: 0.02,
                surge_probability: 0.02,
                ..RandomnessConfig::default()
            },
            ..Self::household()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["household", "scripted_demo", "tight_main"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "household" => Ok(Self::household()),
            "scripted_demo" => Ok(Self::scripted_demo()),
            "tight_main" => Ok(Self::tight_main()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.settings.validate();

        let r = &self.randomness;
        for (field, p) in [
            ("randomness.fault_probability", r.fault_probability),
            ("randomness.surge_probability", r.surge_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                errors.push(ConfigError::new(field, "must be in [0.0, 1.0]"));
            }
        }
        if r.overload_one_in == 0 {
            errors.push(ConfigError::new("randomness.overload_one_in", "must be > 0"));
        }

        if self.appliances.is_empty() {
            errors.push(ConfigError::new("appliance", "at least one appliance is required"));
        }
        for (i, a) in self.appliances.iter().enumerate() {
            if a.name.trim().is_empty() {
                errors.push(ConfigError::new(format!("appliance[{i}].name"), "must not be empty"));
            }
            if a.group.trim().is_empty() {
                errors.push(ConfigError::new(format!("appliance[{i}].group"), "must not be empty"));
            }
            if !(a.rated_max_a.is_finite() && a.rated_max_a > 0.0) {
                errors.push(ConfigError::new(
                    format!("appliance[{i}].rated_max_a"),
                    "must be a finite number > 0",
                ));
            }
        }

        errors
    }

    /// Builds the appliance registry in configuration order.
    pub fn build_household(&self) -> Household {
        let mut household = Household::new();
        for a in &self.appliances {
            household.add_new(&a.name, &a.location, &a.group, a.rated_max_a, a.priority);
        }
        household
    }

    /// Builds the mode-switching reading source seeded from this configuration.
    pub fn build_source(&self) -> ConfiguredSource {
        let r = &self.randomness;
        ConfiguredSource::new(
            ScriptedSource::default(),
            RandomSource::seeded(r.fault_probability, r.surge_probability, r.seed),
        )
    }
}
