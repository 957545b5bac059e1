use super::config::{DoseResponseConfig, SimulationConfig};
use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::catalog::{CellLineProfile, EntityKind, LigandProfile, ProteinProfile};
use crate::core::docking::scoring::{base_affinity, pose_spread};
use crate::core::dynamics::cell::CycleSchedule;
use crate::core::dynamics::environment::{EnvironmentConditions, EnvironmentEffect};
use crate::core::dynamics::experiment::Treatment;
use crate::core::response::HillCurve;
use std::f64::consts::LN_2;

/// Read-only inputs shared by every pose of one docking run.
#[derive(Clone, Copy)]
pub struct DockingContext<'a> {
    pub protein: &'a ProteinProfile,
    pub ligand: &'a LigandProfile,
    pub reporter: &'a ProgressReporter<'a>,
    pub seed: u64,
    pub base_affinity: f64,
    pub spread: f64,
}

impl<'a> DockingContext<'a> {
    pub fn new(
        protein: &'a ProteinProfile,
        ligand: &'a LigandProfile,
        reporter: &'a ProgressReporter<'a>,
        seed: u64,
    ) -> Self {
        Self {
            protein,
            ligand,
            reporter,
            seed,
            base_affinity: base_affinity(protein, ligand),
            spread: pose_spread(protein),
        }
    }
}

/// Growth and kill modifiers of a constant drug exposure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreatmentEffect {
    /// Fractional efficacy `E` in `[0, 1]`.
    pub efficacy: f64,
    /// Multiplier on cycle progression, `1 - E/2`.
    pub growth_factor: f64,
    /// Additional per-hour death rate, `E · ln 2 / doubling_time`.
    pub kill_rate: f64,
}

impl TreatmentEffect {
    pub const NONE: Self = Self {
        efficacy: 0.0,
        growth_factor: 1.0,
        kill_rate: 0.0,
    };

    pub fn resolve(
        profile: &CellLineProfile,
        treatment: Option<&Treatment>,
        dose_response: &DoseResponseConfig,
    ) -> Result<Self, EngineError> {
        let Some(treatment) = treatment.filter(|t| !t.is_placebo()) else {
            return Ok(Self::NONE);
        };
        let ic50 = profile
            .ic50(&treatment.drug_class)
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::DrugClass,
                id: treatment.drug_class.clone(),
            })?;
        let curve = HillCurve::new(ic50, dose_response.hill_coefficient)?;
        let efficacy = curve.fractional_effect(treatment.concentration)?;
        Ok(Self {
            efficacy,
            growth_factor: 1.0 - 0.5 * efficacy,
            kill_rate: efficacy * LN_2 / profile.doubling_time,
        })
    }
}

/// Read-only inputs of one culture run.
#[derive(Clone, Copy)]
pub struct CultureContext<'a> {
    pub profile: &'a CellLineProfile,
    pub config: &'a SimulationConfig,
    pub schedule: CycleSchedule,
    pub environment: EnvironmentEffect,
    pub treatment: TreatmentEffect,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> CultureContext<'a> {
    pub fn new(
        profile: &'a CellLineProfile,
        config: &'a SimulationConfig,
        conditions: &EnvironmentConditions,
        treatment: Option<&Treatment>,
        reporter: &'a ProgressReporter<'a>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            profile,
            config,
            schedule: CycleSchedule::from_profile(profile),
            environment: config.tolerances.effect(conditions),
            treatment: TreatmentEffect::resolve(profile, treatment, &config.dose_response)?,
            reporter,
        })
    }
}
