use biosim::engine::config::{DockingConfig, DoseResponseConfig, SimulationConfig};

/// Fully merged and validated engine configuration for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub docking: DockingConfig,
    pub simulation: SimulationConfig,
    pub dose_response: DoseResponseConfig,
}
