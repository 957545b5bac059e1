use super::metabolism::MetabolicState;
use serde::{Deserialize, Serialize};

/// Viable-cell counts per cell-cycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhaseDistribution {
    pub g1: u64,
    pub s: u64,
    pub g2: u64,
    pub m: u64,
}

impl PhaseDistribution {
    pub fn total(&self) -> u64 {
        self.g1 + self.s + self.g2 + self.m
    }
}

/// Population readout at one sampled time point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    /// Hours since the start of the run.
    pub time: f64,
    pub total: u64,
    pub viable: u64,
    /// `viable / total × 100`; 0 for an empty culture.
    pub viability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metabolism: Option<MetabolicState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<PhaseDistribution>,
}

impl PopulationSnapshot {
    pub fn viability_percent(viable: u64, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            viable as f64 / total as f64 * 100.0
        }
    }
}

/// Ordered time series produced by one culture run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSimulationResult {
    pub cell_line: String,
    pub seed: u64,
    pub snapshots: Vec<PopulationSnapshot>,
}

impl CellSimulationResult {
    pub fn final_snapshot(&self) -> Option<&PopulationSnapshot> {
        self.snapshots.last()
    }
}
