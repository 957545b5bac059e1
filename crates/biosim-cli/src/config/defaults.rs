use biosim::core::dynamics::environment::EnvironmentTolerances;
use biosim::core::dynamics::metabolism::MediumConfig;
use biosim::core::response::DEFAULT_HILL_COEFFICIENT;
use biosim::engine::config::{DEFAULT_NUM_MODES, MAX_NUM_MODES};

pub struct DefaultsConfig {
    pub num_modes: usize,
    pub max_modes: usize,
    pub max_steps: u64,
    pub max_substep: f64,
    pub max_integration_steps: u64,
    pub max_population: usize,
    pub base_death_rate: f64,
    pub record_metabolism: bool,
    pub record_phases: bool,
    pub tolerances: EnvironmentTolerances,
    pub medium: MediumConfig,
    pub hill_coefficient: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            num_modes: DEFAULT_NUM_MODES,
            max_modes: MAX_NUM_MODES,
            max_steps: 5000,
            max_substep: 0.25,
            max_integration_steps: 20_000,
            max_population: 20_000,
            base_death_rate: 0.002,
            record_metabolism: true,
            record_phases: true,
            tolerances: EnvironmentTolerances::default(),
            medium: MediumConfig::default(),
            hill_coefficient: DEFAULT_HILL_COEFFICIENT,
        }
    }
}
