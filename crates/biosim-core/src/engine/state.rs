use super::context::CultureContext;
use crate::core::dynamics::cell::{Cell, CellId, CellPhase};
use crate::core::dynamics::metabolism::Medium;
use crate::core::dynamics::snapshot::{PhaseDistribution, PopulationSnapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slotmap::SlotMap;

/// Cycle-speed jitter drawn for every new cell.
pub const SPEED_RANGE: std::ops::RangeInclusive<f64> = 0.9..=1.1;

/// Mutable state of one culture run.
///
/// All randomness of the run flows through the single generator held here, and cells are
/// always visited in slot order, so a run is fully determined by its seed.
#[derive(Debug, Clone)]
pub struct CultureState {
    cells: SlotMap<CellId, Cell>,
    medium: Medium,
    rng: ChaCha8Rng,
    time: f64,
}

impl CultureState {
    /// Seeds `initial_cells` viable cells spread uniformly over the cell cycle.
    pub fn new(context: &CultureContext, initial_cells: u64, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut cells = SlotMap::with_capacity_and_key(initial_cells as usize);
        let cycle = context.schedule.total();

        for _ in 0..initial_cells {
            let offset = rng.gen_range(0.0..cycle);
            let (phase, elapsed) = context.schedule.locate(offset);
            let speed = rng.gen_range(SPEED_RANGE);
            cells.insert(Cell::new(phase, elapsed, speed));
        }

        Self {
            cells,
            medium: Medium::new(context.config.medium),
            rng,
            time: 0.0,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub(crate) fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn total(&self) -> usize {
        self.cells.len()
    }

    pub fn viable(&self) -> usize {
        self.cells.values().filter(|c| c.is_viable()).count()
    }

    pub fn cells(&self) -> &SlotMap<CellId, Cell> {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut SlotMap<CellId, Cell> {
        &mut self.cells
    }

    pub fn medium(&self) -> &Medium {
        &self.medium
    }

    pub(crate) fn medium_mut(&mut self) -> &mut Medium {
        &mut self.medium
    }

    pub(crate) fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Viable cells in slot order.
    pub(crate) fn viable_ids(&self) -> Vec<CellId> {
        self.cells
            .iter()
            .filter(|(_, c)| c.is_viable())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn phase_distribution(&self) -> PhaseDistribution {
        let mut distribution = PhaseDistribution::default();
        for cell in self.cells.values().filter(|c| c.is_viable()) {
            match cell.phase {
                CellPhase::G1 => distribution.g1 += 1,
                CellPhase::S => distribution.s += 1,
                CellPhase::G2 => distribution.g2 += 1,
                CellPhase::M => distribution.m += 1,
            }
        }
        distribution
    }

    pub fn snapshot(&self, context: &CultureContext) -> PopulationSnapshot {
        let total = self.total() as u64;
        let viable = self.viable() as u64;
        PopulationSnapshot {
            time: self.time,
            total,
            viable,
            viability: PopulationSnapshot::viability_percent(viable, total),
            metabolism: context
                .config
                .record_metabolism
                .then(|| self.medium.state()),
            phases: context
                .config
                .record_phases
                .then(|| self.phase_distribution()),
        }
    }
}
