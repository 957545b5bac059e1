use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Cancer,
    Normal,
    Stem,
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CellType::Cancer => "Cancer",
            CellType::Normal => "Normal",
            CellType::Stem => "Stem",
        };
        f.write_str(s)
    }
}

/// Biological profile of a cultured cell line.
///
/// Phase durations are given in hours; their sum defines one nominal cycle.
/// Metabolic rates are per cell and per hour (pmol/cell/h). The drug
/// sensitivity table maps a drug-class identifier to an IC50 in µM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellLineProfile {
    pub name: String,
    pub cell_type: CellType,
    pub origin: String,
    pub doubling_time: f64,
    #[serde(default = "default_adherent")]
    pub adherent: bool,

    pub g1_duration: f64,
    pub s_duration: f64,
    pub g2_duration: f64,
    pub m_duration: f64,

    pub glucose_consumption: f64,
    pub oxygen_consumption: f64,
    pub lactate_production: f64,

    #[serde(default)]
    pub drug_sensitivity: BTreeMap<String, f64>,

    #[serde(default = "default_growth_factor_dependence")]
    pub growth_factor_dependence: f64,
    #[serde(default)]
    pub contact_inhibition: f64,
}

fn default_adherent() -> bool {
    true
}

fn default_growth_factor_dependence() -> f64 {
    1.0
}

impl CellLineProfile {
    /// Length of one unscaled cell cycle (G1 + S + G2 + M), in hours.
    pub fn cycle_duration(&self) -> f64 {
        self.g1_duration + self.s_duration + self.g2_duration + self.m_duration
    }

    pub fn ic50(&self, drug_class: &str) -> Option<f64> {
        self.drug_sensitivity.get(drug_class).copied()
    }

    pub fn drug_classes(&self) -> impl Iterator<Item = &str> {
        self.drug_sensitivity.keys().map(String::as_str)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        let positive = [
            ("doubling time", self.doubling_time),
            ("G1 duration", self.g1_duration),
            ("S duration", self.s_duration),
            ("G2 duration", self.g2_duration),
            ("M duration", self.m_duration),
        ];
        for (label, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be positive, got {}", label, value));
            }
        }
        let non_negative = [
            ("glucose consumption", self.glucose_consumption),
            ("oxygen consumption", self.oxygen_consumption),
            ("lactate production", self.lactate_production),
        ];
        for (label, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{} must be non-negative, got {}", label, value));
            }
        }
        for (label, value) in [
            ("growth factor dependence", self.growth_factor_dependence),
            ("contact inhibition", self.contact_inhibition),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must lie in [0, 1], got {}", label, value));
            }
        }
        for (drug, ic50) in &self.drug_sensitivity {
            if !(ic50.is_finite() && *ic50 > 0.0) {
                return Err(format!("IC50 for '{}' must be positive, got {}", drug, ic50));
            }
        }
        Ok(())
    }
}
