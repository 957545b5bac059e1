//! Computational units of the workflows.
//!
//! The docking workflow runs a single [`pose_search`]; a culture run applies
//! [`metabolism`], [`mortality`] and [`cell_cycle`] in that order on every substep.

pub mod cell_cycle;
pub mod metabolism;
pub mod mortality;
pub mod pose_search;
