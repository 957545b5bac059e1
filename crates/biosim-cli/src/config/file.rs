use crate::error::{CliError, Result};
use biosim::core::dynamics::environment::Tolerance;
use biosim::core::dynamics::metabolism::MediumConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileDockingConfig {
    #[serde(rename = "num-modes")]
    pub num_modes: Option<usize>,
    #[serde(rename = "max-modes")]
    pub max_modes: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileMediumConfig {
    #[serde(rename = "volume-ml")]
    pub volume_ml: Option<f64>,
    #[serde(rename = "glucose-mm")]
    pub glucose_mm: Option<f64>,
    #[serde(rename = "oxygen-mm")]
    pub oxygen_mm: Option<f64>,
    #[serde(rename = "oxygen-transfer-rate")]
    pub oxygen_transfer_rate: Option<f64>,
}

impl FileMediumConfig {
    pub fn merge_onto(&self, base: MediumConfig) -> MediumConfig {
        MediumConfig {
            volume_ml: self.volume_ml.unwrap_or(base.volume_ml),
            glucose_mm: self.glucose_mm.unwrap_or(base.glucose_mm),
            oxygen_mm: self.oxygen_mm.unwrap_or(base.oxygen_mm),
            oxygen_transfer_rate: self
                .oxygen_transfer_rate
                .unwrap_or(base.oxygen_transfer_rate),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileToleranceConfig {
    pub nominal: Option<f64>,
    pub width: Option<f64>,
    #[serde(rename = "viable-min")]
    pub viable_min: Option<f64>,
    #[serde(rename = "viable-max")]
    pub viable_max: Option<f64>,
}

impl FileToleranceConfig {
    pub fn merge_onto(&self, base: Tolerance) -> Tolerance {
        Tolerance::new(
            self.nominal.unwrap_or(base.nominal),
            self.width.unwrap_or(base.width),
            self.viable_min.unwrap_or(base.viable_min),
            self.viable_max.unwrap_or(base.viable_max),
        )
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileTolerancesConfig {
    pub temperature: Option<FileToleranceConfig>,
    pub co2: Option<FileToleranceConfig>,
    pub humidity: Option<FileToleranceConfig>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileSimulationConfig {
    #[serde(rename = "max-steps")]
    pub max_steps: Option<u64>,
    #[serde(rename = "max-substep")]
    pub max_substep: Option<f64>,
    #[serde(rename = "max-integration-steps")]
    pub max_integration_steps: Option<u64>,
    #[serde(rename = "max-population")]
    pub max_population: Option<usize>,
    #[serde(rename = "base-death-rate")]
    pub base_death_rate: Option<f64>,
    #[serde(rename = "record-metabolism")]
    pub record_metabolism: Option<bool>,
    #[serde(rename = "record-phases")]
    pub record_phases: Option<bool>,
    pub seed: Option<u64>,
    pub medium: Option<FileMediumConfig>,
    pub tolerances: Option<FileTolerancesConfig>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileDoseResponseConfig {
    #[serde(rename = "hill-coefficient")]
    pub hill_coefficient: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub docking: Option<FileDockingConfig>,
    pub simulation: Option<FileSimulationConfig>,
    #[serde(rename = "dose-response")]
    pub dose_response: Option<FileDoseResponseConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_all_sections_with_kebab_case_keys() {
        let content = r#"
[docking]
num-modes = 5
seed = 7

[simulation]
max-population = 5000
record-phases = false

[simulation.medium]
glucose-mm = 5.5

[simulation.tolerances.temperature]
nominal = 36.5
viable-max = 41.0

[dose-response]
hill-coefficient = 2.0
"#;
        let config: FileConfig = toml::from_str(content).unwrap();
        let docking = config.docking.unwrap();
        assert_eq!(docking.num_modes, Some(5));
        assert_eq!(docking.seed, Some(7));

        let simulation = config.simulation.unwrap();
        assert_eq!(simulation.max_population, Some(5000));
        assert_eq!(simulation.record_phases, Some(false));
        assert_eq!(simulation.medium.unwrap().glucose_mm, Some(5.5));
        let temperature = simulation.tolerances.unwrap().temperature.unwrap();
        assert_eq!(temperature.nominal, Some(36.5));
        assert_eq!(temperature.width, None);

        assert_eq!(config.dose_response.unwrap().hill_coefficient, Some(2.0));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<FileConfig, _> =
            toml::from_str("[docking]\nnum_modes = 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn from_file_reports_path_on_parse_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("biosim.toml");
        fs::write(&path, "[simulation]\nmax-steps = \"many\"\n").unwrap();

        match FileConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected FileParsing error, got {other:?}"),
        }
    }

    #[test]
    fn partial_tables_merge_onto_defaults() {
        let medium = FileMediumConfig {
            volume_ml: Some(4.0),
            ..Default::default()
        }
        .merge_onto(MediumConfig::default());
        assert_eq!(medium.volume_ml, 4.0);
        assert_eq!(medium.glucose_mm, MediumConfig::default().glucose_mm);
    }
}
