use super::fingerprint::{InteractionFingerprint, ResidueContact};
use serde::{Deserialize, Serialize};

/// One ranked candidate pose of a ligand in a binding site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingMode {
    /// 1-based rank; mode 1 has the most negative affinity.
    pub mode: usize,
    /// Predicted affinity in kcal/mol.
    pub affinity: f64,
    pub fingerprint: InteractionFingerprint,
    /// Boltzmann-weighted share of the pose cluster, summing to 1 across a run.
    pub population: f64,
    pub rmsd_lower_bound: f64,
    pub rmsd_upper_bound: f64,
    pub contacts: Vec<ResidueContact>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BindingSiteSummary {
    pub volume: f64,
    pub druggability: f64,
    pub flexibility: f64,
}

/// Outcome of one docking run. `modes` is sorted ascending by affinity and
/// `best_affinity` equals `modes[0].affinity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockingResult {
    pub protein_id: String,
    pub ligand_id: String,
    pub seed: u64,
    pub modes: Vec<BindingMode>,
    pub best_affinity: f64,
    pub binding_site: BindingSiteSummary,
}

impl DockingResult {
    pub fn best_mode(&self) -> Option<&BindingMode> {
        self.modes.first()
    }
}
