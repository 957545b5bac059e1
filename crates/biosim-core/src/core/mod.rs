//! # Core Module
//!
//! Stateless data models and the pure arithmetic of both simulation engines.
//!
//! ## Overview
//!
//! Nothing in this layer owns a run or draws its own randomness: functions take their
//! inputs (and, where contacts or deviates are needed, a caller-supplied generator) and
//! return values. The stateful loops live in [`crate::engine`].
//!
//! ## Architecture
//!
//! - **Reference data** ([`catalog`]) - Protein, ligand and cell-line profiles
//! - **Docking math** ([`docking`]) - Affinity scoring, aromaticity and interaction fingerprints
//! - **Culture models** ([`dynamics`]) - Cells, cycle schedule, environment stress and medium
//! - **Dose response** ([`response`]) - Hill curve used for prediction and treatment
//! - **File I/O** ([`io`]) - Catalog TOML and snapshot CSV formats

pub mod catalog;
pub mod docking;
pub mod dynamics;
pub mod io;
pub mod response;
