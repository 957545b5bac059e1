use crate::core::catalog::CellLineProfile;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    pub struct CellId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellPhase {
    G1,
    S,
    G2,
    M,
}

impl CellPhase {
    pub const ALL: [CellPhase; 4] = [CellPhase::G1, CellPhase::S, CellPhase::G2, CellPhase::M];

    /// The phase entered after this one; M wraps to G1 on division.
    pub fn next(self) -> Self {
        match self {
            CellPhase::G1 => CellPhase::S,
            CellPhase::S => CellPhase::G2,
            CellPhase::G2 => CellPhase::M,
            CellPhase::M => CellPhase::G1,
        }
    }
}

impl fmt::Display for CellPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CellPhase::G1 => "G1",
            CellPhase::S => "S",
            CellPhase::G2 => "G2",
            CellPhase::M => "M",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Viable,
    Dead,
}

/// Phase durations of a cell line, rescaled so that one full cycle takes exactly the
/// line's doubling time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSchedule {
    durations: [f64; 4],
}

impl CycleSchedule {
    pub fn from_profile(profile: &CellLineProfile) -> Self {
        let scale = profile.doubling_time / profile.cycle_duration();
        Self {
            durations: [
                profile.g1_duration * scale,
                profile.s_duration * scale,
                profile.g2_duration * scale,
                profile.m_duration * scale,
            ],
        }
    }

    #[inline]
    pub fn duration(&self, phase: CellPhase) -> f64 {
        self.durations[phase as usize]
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.durations.iter().sum()
    }

    /// Maps a time offset since the start of G1 onto `(phase, elapsed_in_phase)`.
    ///
    /// Offsets beyond one cycle are wrapped.
    pub fn locate(&self, offset: f64) -> (CellPhase, f64) {
        let mut remaining = offset.rem_euclid(self.total());
        for phase in CellPhase::ALL {
            let duration = self.duration(phase);
            if remaining < duration {
                return (phase, remaining);
            }
            remaining -= duration;
        }
        (CellPhase::M, self.duration(CellPhase::M))
    }
}

/// One agent of the culture.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub phase: CellPhase,
    /// Hours of progress accumulated in the current phase.
    pub elapsed: f64,
    /// Individual cycle-speed multiplier.
    pub speed: f64,
    pub state: CellState,
    pub generation: u32,
}

impl Cell {
    pub fn new(phase: CellPhase, elapsed: f64, speed: f64) -> Self {
        Self {
            phase,
            elapsed,
            speed,
            state: CellState::Viable,
            generation: 0,
        }
    }

    #[inline]
    pub fn is_viable(&self) -> bool {
        self.state == CellState::Viable
    }

    /// Advances the cell by `progress` hours of cycle time.
    ///
    /// Progress that overflows a phase carries into the next one. When M is completed
    /// the cell stays at the end of M and the leftover progress is returned, so that the
    /// caller decides whether the cell may divide.
    ///
    /// # Return
    ///
    /// `Some(overflow)` once the cell is ready to divide, `None` otherwise.
    pub fn advance(&mut self, progress: f64, schedule: &CycleSchedule) -> Option<f64> {
        self.elapsed += progress;
        loop {
            let duration = schedule.duration(self.phase);
            if self.elapsed < duration {
                return None;
            }
            if self.phase == CellPhase::M {
                let overflow = self.elapsed - duration;
                self.elapsed = duration;
                return Some(overflow);
            }
            self.elapsed -= duration;
            self.phase = self.phase.next();
        }
    }

    /// Splits a cell that completed M into two G1 cells.
    ///
    /// The mother restarts G1 with `overflow` hours of progress (bounded by the G1
    /// duration); the returned daughter starts G1 from zero with its own `speed`.
    pub fn divide(&mut self, overflow: f64, speed: f64, schedule: &CycleSchedule) -> Cell {
        self.generation += 1;
        self.phase = CellPhase::G1;
        self.elapsed = overflow.clamp(0.0, schedule.duration(CellPhase::G1));
        Cell {
            phase: CellPhase::G1,
            elapsed: 0.0,
            speed,
            state: CellState::Viable,
            generation: self.generation,
        }
    }

    pub fn kill(&mut self) {
        self.state = CellState::Dead;
    }
}
