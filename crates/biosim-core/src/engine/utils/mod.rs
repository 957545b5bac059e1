//! Utility functions for the engine module.
//!
//! Deterministic seeding of the random streams and the small sampling helpers shared by
//! the docking and culture tasks.

pub mod sampling;
pub mod seed;
