use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileToleranceConfig, FileTolerancesConfig};
use super::models::AppConfig;
use crate::error::{CliError, Result};
use biosim::core::dynamics::environment::{EnvironmentTolerances, Tolerance};
use biosim::engine::config::{
    DockingConfigBuilder, DoseResponseConfigBuilder, SimulationConfigBuilder,
};
use std::path::Path;
use std::str::FromStr;

/// Values given as dedicated command-line flags; these win over every other layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
}

pub fn build_config(
    config_path: Option<&Path>,
    set_values: &[String],
    overrides: &CliOverrides,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(path) = config_path {
        FileConfig::from_file(path)?
    } else {
        FileConfig::default()
    };
    let mut file_config = apply_set_values(file_config, set_values)?;

    let dose_file = file_config.dose_response.take().unwrap_or_default();
    let dose_response = DoseResponseConfigBuilder::new()
        .hill_coefficient(
            dose_file
                .hill_coefficient
                .unwrap_or(defaults.hill_coefficient),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let docking_file = file_config.docking.take().unwrap_or_default();
    let mut docking = DockingConfigBuilder::new()
        .num_modes(docking_file.num_modes.unwrap_or(defaults.num_modes))
        .max_modes(docking_file.max_modes.unwrap_or(defaults.max_modes));
    if let Some(seed) = overrides.seed.or(docking_file.seed) {
        docking = docking.seed(seed);
    }
    let docking = docking
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let sim_file = file_config.simulation.take().unwrap_or_default();
    let medium = sim_file
        .medium
        .unwrap_or_default()
        .merge_onto(defaults.medium);
    let tolerances = merge_tolerances(sim_file.tolerances.unwrap_or_default(), &defaults);
    let mut simulation = SimulationConfigBuilder::new()
        .max_steps(sim_file.max_steps.unwrap_or(defaults.max_steps))
        .max_substep(sim_file.max_substep.unwrap_or(defaults.max_substep))
        .max_integration_steps(
            sim_file
                .max_integration_steps
                .unwrap_or(defaults.max_integration_steps),
        )
        .max_population(sim_file.max_population.unwrap_or(defaults.max_population))
        .base_death_rate(sim_file.base_death_rate.unwrap_or(defaults.base_death_rate))
        .record_metabolism(
            sim_file
                .record_metabolism
                .unwrap_or(defaults.record_metabolism),
        )
        .record_phases(sim_file.record_phases.unwrap_or(defaults.record_phases))
        .tolerances(tolerances)
        .medium(medium)
        .dose_response(dose_response);
    if let Some(seed) = overrides.seed.or(sim_file.seed) {
        simulation = simulation.seed(seed);
    }
    let simulation = simulation
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        docking,
        simulation,
        dose_response,
    })
}

fn merge_tolerances(file: FileTolerancesConfig, defaults: &DefaultsConfig) -> EnvironmentTolerances {
    let merge = |entry: Option<FileToleranceConfig>, base: Tolerance| {
        entry.map_or(base, |t| t.merge_onto(base))
    };
    EnvironmentTolerances {
        temperature: merge(file.temperature, defaults.tolerances.temperature),
        co2: merge(file.co2, defaults.tolerances.co2),
        humidity: merge(file.humidity, defaults.tolerances.humidity),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "docking.num-modes" => {
                config.docking.get_or_insert_with(Default::default).num_modes =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "docking.max-modes" => {
                config.docking.get_or_insert_with(Default::default).max_modes =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "docking.seed" => {
                config.docking.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "simulation.max-steps" => {
                config.simulation.get_or_insert_with(Default::default).max_steps =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "simulation.max-substep" => {
                config
                    .simulation
                    .get_or_insert_with(Default::default)
                    .max_substep = Some(parse_value(key, value_str, "float")?);
            }
            "simulation.max-integration-steps" => {
                config
                    .simulation
                    .get_or_insert_with(Default::default)
                    .max_integration_steps = Some(parse_value(key, value_str, "integer")?);
            }
            "simulation.max-population" => {
                config
                    .simulation
                    .get_or_insert_with(Default::default)
                    .max_population = Some(parse_value(key, value_str, "integer")?);
            }
            "simulation.base-death-rate" => {
                config
                    .simulation
                    .get_or_insert_with(Default::default)
                    .base_death_rate = Some(parse_value(key, value_str, "float")?);
            }
            "simulation.record-metabolism" => {
                config
                    .simulation
                    .get_or_insert_with(Default::default)
                    .record_metabolism = Some(parse_value(key, value_str, "boolean")?);
            }
            "simulation.record-phases" => {
                config
                    .simulation
                    .get_or_insert_with(Default::default)
                    .record_phases = Some(parse_value(key, value_str, "boolean")?);
            }
            "simulation.seed" => {
                config.simulation.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "simulation.medium.volume-ml"
            | "simulation.medium.glucose-mm"
            | "simulation.medium.oxygen-mm"
            | "simulation.medium.oxygen-transfer-rate" => {
                let value = Some(parse_value(key, value_str, "float")?);
                let medium = config
                    .simulation
                    .get_or_insert_with(Default::default)
                    .medium
                    .get_or_insert_with(Default::default);
                match key {
                    "simulation.medium.volume-ml" => medium.volume_ml = value,
                    "simulation.medium.glucose-mm" => medium.glucose_mm = value,
                    "simulation.medium.oxygen-mm" => medium.oxygen_mm = value,
                    _ => medium.oxygen_transfer_rate = value,
                }
            }
            "dose-response.hill-coefficient" => {
                config
                    .dose_response
                    .get_or_insert_with(Default::default)
                    .hill_coefficient = Some(parse_value(key, value_str, "float")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
