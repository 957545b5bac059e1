//! Dose-response model shared by efficacy prediction and treated culture runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_HILL_COEFFICIENT: f64 = 1.5;

#[derive(Debug, Error, PartialEq)]
pub enum ResponseError {
    #[error("IC50 must be positive and finite, got {0}")]
    InvalidIc50(f64),
    #[error("Hill coefficient must be positive and finite, got {0}")]
    InvalidHillCoefficient(f64),
    #[error("Concentration must be non-negative and finite, got {0}")]
    InvalidConcentration(f64),
}

/// Sigmoidal Hill dose-response curve.
///
/// Efficacy in percent is `100 · c^h / (IC50^h + c^h)`, evaluated in the equivalent
/// form `100 / (1 + (IC50 / c)^h)` so that very large concentrations do not overflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HillCurve {
    ic50: f64,
    hill_coefficient: f64,
}

impl HillCurve {
    pub fn new(ic50: f64, hill_coefficient: f64) -> Result<Self, ResponseError> {
        if !(ic50.is_finite() && ic50 > 0.0) {
            return Err(ResponseError::InvalidIc50(ic50));
        }
        if !(hill_coefficient.is_finite() && hill_coefficient > 0.0) {
            return Err(ResponseError::InvalidHillCoefficient(hill_coefficient));
        }
        Ok(Self {
            ic50,
            hill_coefficient,
        })
    }

    pub fn ic50(&self) -> f64 {
        self.ic50
    }

    pub fn hill_coefficient(&self) -> f64 {
        self.hill_coefficient
    }

    /// Efficacy in percent, bounded to `[0, 100]`.
    pub fn efficacy(&self, concentration: f64) -> Result<f64, ResponseError> {
        if !(concentration.is_finite() && concentration >= 0.0) {
            return Err(ResponseError::InvalidConcentration(concentration));
        }
        if concentration == 0.0 {
            return Ok(0.0);
        }
        let ratio = (self.ic50 / concentration).powf(self.hill_coefficient);
        Ok((100.0 / (1.0 + ratio)).clamp(0.0, 100.0))
    }

    /// Efficacy as a fraction in `[0, 1]`.
    pub fn fractional_effect(&self, concentration: f64) -> Result<f64, ResponseError> {
        Ok(self.efficacy(concentration)? / 100.0)
    }

    pub fn viability(&self, concentration: f64) -> Result<f64, ResponseError> {
        Ok((100.0 - self.efficacy(concentration)?).clamp(0.0, 100.0))
    }
}

/// Single-point evaluation of a cell line's dose-response curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseResponsePrediction {
    pub cell_line: String,
    pub drug_class: String,
    pub concentration: f64,
    pub ic50: f64,
    pub hill_coefficient: f64,
    #[serde(rename = "predicted_efficacy")]
    pub efficacy: f64,
    #[serde(rename = "predicted_viability")]
    pub viability: f64,
}
