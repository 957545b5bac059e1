use crate::core::catalog::{LigandProfile, ProteinProfile};
use serde::Serialize;
use std::ops::{Add, AddAssign};

pub const BASELINE_AFFINITY: f64 = -6.0; // kcal/mol
pub const MIN_AFFINITY: f64 = -20.0;
pub const MAX_AFFINITY: f64 = 0.0;

const SIZE_WEIGHT: f64 = 2.5;
const LIPOPHILICITY_WEIGHT: f64 = 1.5;
const LIPOPHILICITY_SATURATION_LOGP: f64 = 5.0;
const HBOND_WEIGHT: f64 = 2.0;
const HBOND_FACTOR_CAP: f64 = 1.5;
const DRUGGABILITY_WEIGHT: f64 = 1.5;
const ROTATABLE_BOND_PENALTY: f64 = 0.15;
const SITE_FLEXIBILITY_RELIEF: f64 = 0.5;

const BASE_POSE_SPREAD: f64 = 0.3;
const FLEXIBLE_POSE_SPREAD: f64 = 1.2;
const RANK_PENALTY: f64 = 0.25;

/// Additive decomposition of a base affinity estimate, in kcal/mol.
///
/// Negative contributions favour binding; the rotatable-bond term is a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AffinityTerms {
    pub baseline: f64,
    pub size: f64,
    pub lipophilicity: f64,
    pub hydrogen_bonding: f64,
    pub druggability: f64,
    pub flexibility: f64,
}

impl AffinityTerms {
    #[inline]
    pub fn total(&self) -> f64 {
        self.baseline
            + self.size
            + self.lipophilicity
            + self.hydrogen_bonding
            + self.druggability
            + self.flexibility
    }
}

impl Add for AffinityTerms {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            baseline: self.baseline + rhs.baseline,
            size: self.size + rhs.size,
            lipophilicity: self.lipophilicity + rhs.lipophilicity,
            hydrogen_bonding: self.hydrogen_bonding + rhs.hydrogen_bonding,
            druggability: self.druggability + rhs.druggability,
            flexibility: self.flexibility + rhs.flexibility,
        }
    }
}

impl AddAssign for AffinityTerms {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Scores the size, lipophilicity, hydrogen-bonding, druggability and flexibility
/// complementarity of a ligand against a binding site.
pub fn affinity_terms(protein: &ProteinProfile, ligand: &LigandProfile) -> AffinityTerms {
    let size_ratio = if protein.binding_site_volume > 0.0 {
        (ligand.molecular_weight / protein.binding_site_volume).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let lipophilicity = (ligand.log_p / LIPOPHILICITY_SATURATION_LOGP).clamp(0.0, 1.0);
    let hbond = (ligand.h_bond_capacity() as f64 / 10.0).min(HBOND_FACTOR_CAP);
    let site_flexibility = protein.flexibility_score.clamp(0.0, 1.0);

    AffinityTerms {
        baseline: BASELINE_AFFINITY,
        size: -SIZE_WEIGHT * size_ratio,
        lipophilicity: -LIPOPHILICITY_WEIGHT * lipophilicity,
        hydrogen_bonding: -HBOND_WEIGHT * hbond,
        druggability: -DRUGGABILITY_WEIGHT * protein.druggability.clamp(0.0, 1.0),
        flexibility: ROTATABLE_BOND_PENALTY
            * ligand.rotatable_bonds as f64
            * (1.0 - SITE_FLEXIBILITY_RELIEF * site_flexibility),
    }
}

#[inline]
pub fn base_affinity(protein: &ProteinProfile, ligand: &LigandProfile) -> f64 {
    affinity_terms(protein, ligand).total()
}

/// Standard deviation of pose affinities around the base estimate: a rigid site yields
/// tightly clustered modes, a flexible one a wider spread.
#[inline]
pub fn pose_spread(protein: &ProteinProfile) -> f64 {
    BASE_POSE_SPREAD + FLEXIBLE_POSE_SPREAD * protein.flexibility_score.clamp(0.0, 1.0)
}

/// Affinity of the `search_index`-th pose given a standard-normal deviate.
///
/// Later poses in the search are penalised slightly; the result is clamped to
/// `[MIN_AFFINITY, MAX_AFFINITY]`. Non-finite inputs propagate as non-finite output.
#[inline]
pub fn pose_affinity(base: f64, spread: f64, deviate: f64, search_index: usize) -> f64 {
    let raw = base + spread * deviate + RANK_PENALTY * search_index as f64;
    if raw.is_finite() {
        raw.clamp(MIN_AFFINITY, MAX_AFFINITY)
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn protein(volume: f64, flexibility: f64, druggability: f64) -> ProteinProfile {
        ProteinProfile {
            pdb_id: "P".to_string(),
            name: "P".to_string(),
            organism: "X".to_string(),
            resolution: 2.0,
            binding_site_volume: volume,
            flexibility_score: flexibility,
            druggability,
            binding_site_residues: vec![],
        }
    }

    fn ligand(mw: f64, log_p: f64, hbd: u32, hba: u32, rot: u32) -> LigandProfile {
        LigandProfile {
            id: "l".to_string(),
            name: "L".to_string(),
            smiles: "CCO".to_string(),
            molecular_weight: mw,
            log_p,
            h_bond_donors: hbd,
            h_bond_acceptors: hba,
            rotatable_bonds: rot,
        }
    }

    #[test]
    fn affinity_terms_match_hand_computed_values() {
        let terms = affinity_terms(&protein(450.0, 0.6, 0.85), &ligand(180.0, 1.0, 1, 4, 3));
        assert!((terms.size - (-2.5 * 0.4)).abs() < TOLERANCE);
        assert!((terms.lipophilicity - (-1.5 * 0.2)).abs() < TOLERANCE);
        assert!((terms.hydrogen_bonding - (-1.0)).abs() < TOLERANCE);
        assert!((terms.druggability - (-1.275)).abs() < TOLERANCE);
        assert!((terms.flexibility - 0.15 * 3.0 * 0.7).abs() < TOLERANCE);
        assert!((terms.total() - base_affinity(&protein(450.0, 0.6, 0.85), &ligand(180.0, 1.0, 1, 4, 3))).abs() < TOLERANCE);
    }

    #[test]
    fn higher_druggability_binds_more_strongly() {
        let l = ligand(300.0, 2.0, 2, 4, 5);
        assert!(base_affinity(&protein(500.0, 0.5, 0.9), &l) < base_affinity(&protein(500.0, 0.5, 0.3), &l));
    }

    #[test]
    fn flexible_site_reduces_rotatable_bond_penalty() {
        let l = ligand(300.0, 2.0, 2, 4, 10);
        let rigid = affinity_terms(&protein(500.0, 0.0, 0.5), &l);
        let flexible = affinity_terms(&protein(500.0, 1.0, 0.5), &l);
        assert!(flexible.flexibility < rigid.flexibility);
    }

    #[test]
    fn size_and_hbond_factors_saturate() {
        let terms = affinity_terms(&protein(100.0, 0.5, 0.5), &ligand(900.0, 12.0, 10, 20, 0));
        assert!((terms.size + SIZE_WEIGHT).abs() < TOLERANCE);
        assert!((terms.lipophilicity + LIPOPHILICITY_WEIGHT).abs() < TOLERANCE);
        assert!((terms.hydrogen_bonding + HBOND_WEIGHT * HBOND_FACTOR_CAP).abs() < TOLERANCE);
    }

    #[test]
    fn negative_logp_contributes_nothing() {
        let terms = affinity_terms(&protein(400.0, 0.5, 0.5), &ligand(200.0, -1.5, 0, 0, 0));
        assert_eq!(terms.lipophilicity, 0.0);
    }

    #[test]
    fn pose_spread_grows_with_flexibility() {
        assert!(pose_spread(&protein(400.0, 0.1, 0.5)) < pose_spread(&protein(400.0, 0.9, 0.5)));
        assert!((pose_spread(&protein(400.0, 0.0, 0.5)) - BASE_POSE_SPREAD).abs() < TOLERANCE);
    }

    #[test]
    fn pose_affinity_is_clamped_to_valid_range() {
        assert_eq!(pose_affinity(-30.0, 1.0, -5.0, 0), MIN_AFFINITY);
        assert_eq!(pose_affinity(-1.0, 1.0, 5.0, 3), MAX_AFFINITY);
        assert!((pose_affinity(-8.0, 0.5, 1.0, 2) - (-7.0)).abs() < TOLERANCE);
    }

    #[test]
    fn pose_affinity_propagates_non_finite_values() {
        assert!(pose_affinity(-8.0, 1.0, f64::NAN, 0).is_nan());
    }

    #[test]
    fn add_assign_accumulates_each_term() {
        let mut a = AffinityTerms {
            baseline: -1.0,
            size: -1.0,
            ..Default::default()
        };
        a += AffinityTerms {
            baseline: -1.0,
            flexibility: 0.5,
            ..Default::default()
        };
        assert_eq!(a.baseline, -2.0);
        assert_eq!(a.size, -1.0);
        assert_eq!(a.flexibility, 0.5);
        assert_eq!(a.total(), -2.5);
    }
}
