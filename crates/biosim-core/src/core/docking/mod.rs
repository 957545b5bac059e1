//! # Docking Module
//!
//! Heuristic protein-ligand docking estimates. The scoring function combines ligand
//! descriptors with binding-site properties into a base affinity ([`scoring`]); each
//! candidate pose is then characterised by an interaction fingerprint derived from its
//! affinity and the aromatic character of both partners ([`fingerprint`],
//! [`aromaticity`]). The search over poses itself lives in the engine layer.

pub mod aromaticity;
pub mod fingerprint;
pub mod pose;
pub mod scoring;
