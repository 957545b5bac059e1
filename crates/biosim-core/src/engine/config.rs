use crate::core::dynamics::environment::EnvironmentTolerances;
use crate::core::dynamics::metabolism::MediumConfig;
use crate::core::response::DEFAULT_HILL_COEFFICIENT;
use thiserror::Error;

pub const DEFAULT_NUM_MODES: usize = 9;
pub const MAX_NUM_MODES: usize = 20;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DockingConfig {
    /// Modes generated when a request does not ask for a specific count.
    pub num_modes: usize,
    /// Upper bound accepted for a requested mode count.
    pub max_modes: usize,
    /// Overrides the input-derived seed.
    pub seed: Option<u64>,
}

impl Default for DockingConfig {
    fn default() -> Self {
        Self {
            num_modes: DEFAULT_NUM_MODES,
            max_modes: MAX_NUM_MODES,
            seed: None,
        }
    }
}

#[derive(Default)]
pub struct DockingConfigBuilder {
    num_modes: Option<usize>,
    max_modes: Option<usize>,
    seed: Option<u64>,
}

impl DockingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_modes(mut self, n: usize) -> Self {
        self.num_modes = Some(n);
        self
    }
    pub fn max_modes(mut self, n: usize) -> Self {
        self.max_modes = Some(n);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<DockingConfig, ConfigError> {
        let defaults = DockingConfig::default();
        let max_modes = self.max_modes.unwrap_or(defaults.max_modes);
        let num_modes = self.num_modes.unwrap_or(defaults.num_modes);

        if max_modes == 0 {
            return Err(invalid("max_modes", "must be at least 1"));
        }
        if !(1..=max_modes).contains(&num_modes) {
            return Err(invalid(
                "num_modes",
                format!("{num_modes} is outside 1..={max_modes}"),
            ));
        }
        Ok(DockingConfig {
            num_modes,
            max_modes,
            seed: self.seed,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoseResponseConfig {
    pub hill_coefficient: f64,
}

impl Default for DoseResponseConfig {
    fn default() -> Self {
        Self {
            hill_coefficient: DEFAULT_HILL_COEFFICIENT,
        }
    }
}

#[derive(Default)]
pub struct DoseResponseConfigBuilder {
    hill_coefficient: Option<f64>,
}

impl DoseResponseConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hill_coefficient(mut self, h: f64) -> Self {
        self.hill_coefficient = Some(h);
        self
    }

    pub fn build(self) -> Result<DoseResponseConfig, ConfigError> {
        let hill_coefficient = self.hill_coefficient.unwrap_or(DEFAULT_HILL_COEFFICIENT);
        if !(hill_coefficient.is_finite() && hill_coefficient > 0.0) {
            return Err(invalid(
                "hill_coefficient",
                format!("must be positive and finite, got {hill_coefficient}"),
            ));
        }
        Ok(DoseResponseConfig { hill_coefficient })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Largest number of sampling intervals a run may request.
    pub max_steps: u64,
    /// Longest integration substep, in hours.
    pub max_substep: f64,
    /// Largest number of substeps a whole run may integrate.
    pub max_integration_steps: u64,
    /// Cell count at which division is deferred.
    pub max_population: usize,
    /// Per-hour death rate under nominal conditions.
    pub base_death_rate: f64,
    pub record_metabolism: bool,
    pub record_phases: bool,
    pub seed: Option<u64>,
    pub tolerances: EnvironmentTolerances,
    pub medium: MediumConfig,
    pub dose_response: DoseResponseConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: 5000,
            max_substep: 0.25,
            max_integration_steps: 20_000,
            max_population: 20_000,
            base_death_rate: 0.002,
            record_metabolism: true,
            record_phases: true,
            seed: None,
            tolerances: EnvironmentTolerances::default(),
            medium: MediumConfig::default(),
            dose_response: DoseResponseConfig::default(),
        }
    }
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    max_steps: Option<u64>,
    max_substep: Option<f64>,
    max_integration_steps: Option<u64>,
    max_population: Option<usize>,
    base_death_rate: Option<f64>,
    record_metabolism: Option<bool>,
    record_phases: Option<bool>,
    seed: Option<u64>,
    tolerances: Option<EnvironmentTolerances>,
    medium: Option<MediumConfig>,
    dose_response: Option<DoseResponseConfig>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }
    pub fn max_substep(mut self, hours: f64) -> Self {
        self.max_substep = Some(hours);
        self
    }
    pub fn max_integration_steps(mut self, steps: u64) -> Self {
        self.max_integration_steps = Some(steps);
        self
    }
    pub fn max_population(mut self, cells: usize) -> Self {
        self.max_population = Some(cells);
        self
    }
    pub fn base_death_rate(mut self, rate: f64) -> Self {
        self.base_death_rate = Some(rate);
        self
    }
    pub fn record_metabolism(mut self, enabled: bool) -> Self {
        self.record_metabolism = Some(enabled);
        self
    }
    pub fn record_phases(mut self, enabled: bool) -> Self {
        self.record_phases = Some(enabled);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn tolerances(mut self, tolerances: EnvironmentTolerances) -> Self {
        self.tolerances = Some(tolerances);
        self
    }
    pub fn medium(mut self, medium: MediumConfig) -> Self {
        self.medium = Some(medium);
        self
    }
    pub fn dose_response(mut self, config: DoseResponseConfig) -> Self {
        self.dose_response = Some(config);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            max_steps: self.max_steps.unwrap_or(defaults.max_steps),
            max_substep: self.max_substep.unwrap_or(defaults.max_substep),
            max_integration_steps: self
                .max_integration_steps
                .unwrap_or(defaults.max_integration_steps),
            max_population: self.max_population.unwrap_or(defaults.max_population),
            base_death_rate: self.base_death_rate.unwrap_or(defaults.base_death_rate),
            record_metabolism: self.record_metabolism.unwrap_or(defaults.record_metabolism),
            record_phases: self.record_phases.unwrap_or(defaults.record_phases),
            seed: self.seed,
            tolerances: self.tolerances.unwrap_or(defaults.tolerances),
            medium: self.medium.unwrap_or(defaults.medium),
            dose_response: self.dose_response.unwrap_or(defaults.dose_response),
        };
        config.validate()?;
        Ok(config)
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(invalid("max_steps", "must be at least 1"));
        }
        if !(self.max_substep.is_finite() && self.max_substep > 0.0) {
            return Err(invalid(
                "max_substep",
                format!("must be positive and finite, got {}", self.max_substep),
            ));
        }
        if self.max_integration_steps == 0 {
            return Err(invalid("max_integration_steps", "must be at least 1"));
        }
        if self.max_population == 0 {
            return Err(invalid("max_population", "must be at least 1"));
        }
        if !(self.base_death_rate.is_finite() && self.base_death_rate >= 0.0) {
            return Err(invalid(
                "base_death_rate",
                format!("must be non-negative, got {}", self.base_death_rate),
            ));
        }
        self.tolerances
            .temperature
            .validate()
            .map_err(|r| invalid("tolerances.temperature", r))?;
        self.tolerances
            .co2
            .validate()
            .map_err(|r| invalid("tolerances.co2", r))?;
        self.tolerances
            .humidity
            .validate()
            .map_err(|r| invalid("tolerances.humidity", r))?;
        self.medium.validate().map_err(|r| invalid("medium", r))?;
        DoseResponseConfigBuilder::new()
            .hill_coefficient(self.dose_response.hill_coefficient)
            .build()?;
        Ok(())
    }
}
