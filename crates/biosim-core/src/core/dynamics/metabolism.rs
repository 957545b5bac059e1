use crate::core::catalog::CellLineProfile;
use serde::{Deserialize, Serialize};

/// pmol per µmol; converts per-cell pmol consumption into µmol for mM/ml arithmetic.
const PMOL_PER_UMOL: f64 = 1.0e6;
/// Half-saturation constant of the nutrient factor, as an availability fraction.
const MONOD_K: f64 = 0.05;
const ANAEROBIC_ATP_YIELD: f64 = 0.3;
const MAX_NUTRIENT_STRESS: f64 = 9.0;

/// Culture medium parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediumConfig {
    pub volume_ml: f64,
    /// Initial glucose concentration in mM.
    pub glucose_mm: f64,
    /// Saturation oxygen concentration in mM.
    pub oxygen_mm: f64,
    /// First-order oxygen re-equilibration rate, per hour.
    pub oxygen_transfer_rate: f64,
}

impl Default for MediumConfig {
    fn default() -> Self {
        Self {
            volume_ml: 2.0,
            glucose_mm: 25.0,
            oxygen_mm: 0.2,
            oxygen_transfer_rate: 0.5,
        }
    }
}

impl MediumConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        let fields = [
            ("volume_ml", self.volume_ml),
            ("glucose_mm", self.glucose_mm),
            ("oxygen_mm", self.oxygen_mm),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be positive and finite, got {value}"));
            }
        }
        if !(self.oxygen_transfer_rate.is_finite() && self.oxygen_transfer_rate >= 0.0) {
            return Err(format!(
                "oxygen_transfer_rate must be non-negative, got {}",
                self.oxygen_transfer_rate
            ));
        }
        Ok(())
    }
}

/// Aggregate metabolic readout of a culture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetabolicState {
    /// Relative ATP level in `[0, 1]`.
    pub atp: f64,
    /// Glucose concentration in mM.
    pub glucose: f64,
    /// Oxygen concentration in mM.
    pub oxygen: f64,
    /// Lactate concentration in mM.
    pub lactate: f64,
}

/// Well-mixed medium shared by all cells of a culture.
#[derive(Debug, Clone, PartialEq)]
pub struct Medium {
    config: MediumConfig,
    glucose: f64,
    oxygen: f64,
    lactate: f64,
}

impl Medium {
    pub fn new(config: MediumConfig) -> Self {
        Self {
            config,
            glucose: config.glucose_mm,
            oxygen: config.oxygen_mm,
            lactate: 0.0,
        }
    }

    #[inline]
    fn concentration_change(&self, cells: usize, rate: f64, dt: f64) -> f64 {
        cells as f64 * rate * dt / (self.config.volume_ml * PMOL_PER_UMOL)
    }

    /// Applies `dt` hours of consumption by `viable` cells.
    pub fn consume(&mut self, profile: &CellLineProfile, viable: usize, dt: f64) {
        let glucose_used = self.concentration_change(viable, profile.glucose_consumption, dt);
        let oxygen_used = self.concentration_change(viable, profile.oxygen_consumption, dt);
        let lactate_made = self.concentration_change(viable, profile.lactate_production, dt);

        self.glucose = (self.glucose - glucose_used).max(0.0);

        let saturation = self.config.oxygen_mm;
        let relaxation = (-self.config.oxygen_transfer_rate * dt).exp();
        let reoxygenated = saturation - (saturation - self.oxygen) * relaxation;
        self.oxygen = (reoxygenated - oxygen_used).clamp(0.0, saturation);

        self.lactate += lactate_made;
    }

    #[inline]
    pub fn glucose_fraction(&self) -> f64 {
        (self.glucose / self.config.glucose_mm).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn oxygen_fraction(&self) -> f64 {
        (self.oxygen / self.config.oxygen_mm).clamp(0.0, 1.0)
    }

    /// Glycolysis alone yields a baseline fraction of ATP; oxidative phosphorylation
    /// contributes the rest when oxygen is available.
    pub fn atp_level(&self) -> f64 {
        let g = self.glucose_fraction();
        let o = self.oxygen_fraction();
        g * (ANAEROBIC_ATP_YIELD + (1.0 - ANAEROBIC_ATP_YIELD) * o)
    }

    /// Monod-type growth factor, normalised to 1 in fresh medium.
    pub fn nutrient_factor(&self) -> f64 {
        let g = self.glucose_fraction();
        g * (1.0 + MONOD_K) / (g + MONOD_K)
    }

    /// Death-rate multiplier from energy starvation; 1 at full ATP.
    pub fn nutrient_stress(&self) -> f64 {
        let deficit = 1.0 - self.atp_level();
        1.0 + MAX_NUTRIENT_STRESS * deficit * deficit
    }

    pub fn state(&self) -> MetabolicState {
        MetabolicState {
            atp: self.atp_level(),
            glucose: self.glucose,
            oxygen: self.oxygen,
            lactate: self.lactate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    fn hela() -> CellLineProfile {
        Catalog::builtin().cell_line("HeLa").unwrap().clone()
    }

    #[test]
    fn fresh_medium_is_fully_supportive() {
        let medium = Medium::new(MediumConfig::default());
        assert_eq!(medium.atp_level(), 1.0);
        assert!((medium.nutrient_factor() - 1.0).abs() < 1e-12);
        assert_eq!(medium.nutrient_stress(), 1.0);
        assert_eq!(medium.state().lactate, 0.0);
    }

    #[test]
    fn consumption_scales_with_cell_count_and_time() {
        let profile = hela();
        let mut small = Medium::new(MediumConfig::default());
        let mut large = Medium::new(MediumConfig::default());
        small.consume(&profile, 1_000, 1.0);
        large.consume(&profile, 10_000, 1.0);

        let used_small = 25.0 - small.state().glucose;
        let used_large = 25.0 - large.state().glucose;
        assert!((used_small - 1_000.0 * 2.5 / 2.0e6).abs() < 1e-12);
        assert!((used_large - 10.0 * used_small).abs() < 1e-9);
        assert!(large.state().lactate > small.state().lactate);
    }

    #[test]
    fn concentrations_never_go_negative() {
        let profile = hela();
        let mut medium = Medium::new(MediumConfig::default());
        for _ in 0..100 {
            medium.consume(&profile, 10_000_000, 1.0);
        }
        let state = medium.state();
        assert_eq!(state.glucose, 0.0);
        assert!(state.oxygen >= 0.0);
        assert_eq!(state.atp, 0.0);
        assert_eq!(medium.nutrient_factor(), 0.0);
        assert_eq!(medium.nutrient_stress(), 1.0 + MAX_NUTRIENT_STRESS);
    }

    #[test]
    fn oxygen_recovers_toward_saturation_without_consumers() {
        let profile = hela();
        let mut medium = Medium::new(MediumConfig::default());
        medium.consume(&profile, 5_000_000, 1.0);
        let depleted = medium.state().oxygen;
        medium.consume(&profile, 0, 2.0);
        let recovered = medium.state().oxygen;
        assert!(recovered > depleted);
        assert!(recovered <= MediumConfig::default().oxygen_mm);
    }

    #[test]
    fn medium_config_validation() {
        assert!(MediumConfig::default().validate().is_ok());
        let bad = MediumConfig {
            volume_ml: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = MediumConfig {
            oxygen_transfer_rate: -1.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
