//! # Workflows Module
//!
//! The public operations of the library. Each workflow resolves its inputs against the
//! [`Catalog`](crate::core::catalog::Catalog), validates them, drives the engine and
//! returns a plain serialisable result.
//!
//! - **Docking** ([`dock`]) - Ranked binding modes with interaction fingerprints
//! - **Culture simulation** ([`simulate`]) - Time series of population snapshots, eager
//!   ([`simulate::run`]) or lazy ([`simulate::CultureRun`])
//! - **Efficacy prediction** ([`predict`]) - Single-point and log-spaced dose-response
//!   evaluation

pub mod dock;
pub mod predict;
pub mod simulate;
