//! # BioSim Core Library
//!
//! Deterministic simulation engines for two laboratory questions: how strongly might a
//! small molecule bind a protein target, and how does a cell culture evolve over time
//! under given incubator conditions and drug exposure.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Reference catalog, stateless data models and the pure
//!   arithmetic of scoring, fingerprints, environment stress, metabolism and dose
//!   response, plus file formats.
//!
//! - **[`engine`]: The Logic Core.** Configuration, error taxonomy, progress reporting,
//!   deterministic seeding and the per-run state and tasks of both engines.
//!
//! - **[`workflows`]: The Public API.** `dock`, `simulate` and `predict` tie the other two
//!   layers together into complete, reproducible operations.

pub mod core;
pub mod engine;
pub mod workflows;
