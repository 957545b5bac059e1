//! # Reference Catalog
//!
//! Immutable lookup tables of protein targets, small-molecule ligands and cultured
//! cell lines. The catalog is built once (either from the bundled reference tables via
//! [`Catalog::builtin`] or from a TOML file via [`Catalog::load`]) and is only ever read
//! by the engines, so a single instance can be shared freely across threads.

mod builtin;
pub mod cell_line;
pub mod ligand;
pub mod protein;
pub mod registry;

pub use cell_line::{CellLineProfile, CellType};
pub use ligand::LigandProfile;
pub use protein::ProteinProfile;
pub use registry::{Catalog, CatalogData, CatalogError, EntityKind};
