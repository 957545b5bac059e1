//! Models behind the cell-culture simulation.
//!
//! Each cell is an agent walking through G1, S, G2 and M at a speed modulated by the
//! incubator environment, the shared medium and an optional drug exposure. The types
//! here are pure state and arithmetic; the time loop lives in `engine::tasks`.

pub mod cell;
pub mod environment;
pub mod experiment;
pub mod metabolism;
pub mod snapshot;
