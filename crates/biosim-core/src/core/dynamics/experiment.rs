use serde::{Deserialize, Serialize};

/// Sampling plan of a culture run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentParams {
    pub initial_cells: u64,
    /// Total simulated time, in hours.
    pub duration: f64,
    /// Spacing between snapshots, in hours.
    pub time_interval: f64,
}

impl ExperimentParams {
    /// Number of intervals after t = 0; the run emits `steps() + 1` snapshots.
    ///
    /// A small tolerance absorbs representation error, so that 72 / 0.5 yields 144.
    pub fn steps(&self) -> u64 {
        (self.duration / self.time_interval + 1e-9).floor() as u64
    }
}

/// A drug exposure held constant for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    /// Drug class looked up in the cell line's sensitivity table.
    #[serde(rename = "type", alias = "drugClass")]
    pub drug_class: String,
    /// Concentration in µM.
    pub concentration: f64,
}

impl Treatment {
    pub fn new(drug_class: impl Into<String>, concentration: f64) -> Self {
        Self {
            drug_class: drug_class.into(),
            concentration,
        }
    }

    /// The `"none"` placebo class (or an empty class) skips the sensitivity lookup.
    pub fn is_placebo(&self) -> bool {
        let class = self.drug_class.trim();
        class.is_empty() || class.eq_ignore_ascii_case("none")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_tolerate_floating_point_division() {
        let params = ExperimentParams {
            initial_cells: 50,
            duration: 72.0,
            time_interval: 0.5,
        };
        assert_eq!(params.steps(), 144);
        let params = ExperimentParams {
            initial_cells: 1,
            duration: 0.3,
            time_interval: 0.1,
        };
        assert_eq!(params.steps(), 3);
        let params = ExperimentParams {
            initial_cells: 1,
            duration: 1.0,
            time_interval: 0.3,
        };
        assert_eq!(params.steps(), 3);
    }

    #[test]
    fn placebo_treatments() {
        assert!(Treatment::new("none", 5.0).is_placebo());
        assert!(Treatment::new("None", 0.0).is_placebo());
        assert!(Treatment::new(" ", 1.0).is_placebo());
        assert!(!Treatment::new("taxol", 0.0).is_placebo());
    }

    #[test]
    fn experiment_params_use_camel_case_keys() {
        let json = r#"{"initialCells": 50, "duration": 72, "timeInterval": 0.5}"#;
        let params: ExperimentParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.initial_cells, 50);
        assert_eq!(params.time_interval, 0.5);

        let treatment: Treatment =
            serde_json::from_str(r#"{"type": "cisplatin", "concentration": 2.5}"#).unwrap();
        assert_eq!(treatment.drug_class, "cisplatin");
    }
}
