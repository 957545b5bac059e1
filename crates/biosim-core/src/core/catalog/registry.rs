use super::builtin;
use super::cell_line::CellLineProfile;
use super::ligand::LigandProfile;
use super::protein::ProteinProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Protein,
    Ligand,
    CellLine,
    DrugClass,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Protein => "Protein",
            EntityKind::Ligand => "Ligand",
            EntityKind::CellLine => "Cell line",
            EntityKind::DrugClass => "Drug class",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} '{id}' not found in catalog")]
    NotFound { kind: EntityKind, id: String },

    #[error("Invalid {kind} profile '{id}': {reason}")]
    InvalidProfile {
        kind: EntityKind,
        id: String,
        reason: String,
    },

    #[error("Duplicate {kind} identifier '{id}' in catalog")]
    Duplicate { kind: EntityKind, id: String },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// On-disk layout of a catalog file: three arrays of tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogData {
    #[serde(default)]
    pub proteins: Vec<ProteinProfile>,
    #[serde(default)]
    pub ligands: Vec<LigandProfile>,
    #[serde(default)]
    pub cell_lines: Vec<CellLineProfile>,
}

/// Read-only reference tables consumed by the simulation engines.
///
/// Lookups are exact-match on the identifier; listings iterate in identifier order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    proteins: BTreeMap<String, ProteinProfile>,
    ligands: BTreeMap<String, LigandProfile>,
    cell_lines: BTreeMap<String, CellLineProfile>,
}

impl Catalog {
    /// The reference tables shipped with the library.
    pub fn builtin() -> Self {
        let data = builtin::catalog_data();
        Self {
            proteins: data
                .proteins
                .into_iter()
                .map(|p| (p.pdb_id.clone(), p))
                .collect(),
            ligands: data
                .ligands
                .into_iter()
                .map(|l| (l.id.clone(), l))
                .collect(),
            cell_lines: data
                .cell_lines
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
        }
    }

    /// Builds a catalog from raw tables, rejecting duplicates and invalid profiles.
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for protein in data.proteins {
            let id = protein.pdb_id.clone();
            if catalog.proteins.insert(id.clone(), protein).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: EntityKind::Protein,
                    id,
                });
            }
        }
        for ligand in data.ligands {
            let id = ligand.id.clone();
            if catalog.ligands.insert(id.clone(), ligand).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: EntityKind::Ligand,
                    id,
                });
            }
        }
        for line in data.cell_lines {
            let id = line.name.clone();
            if catalog.cell_lines.insert(id.clone(), line).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: EntityKind::CellLine,
                    id,
                });
            }
        }

        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let data: CatalogData = toml::from_str(&content).map_err(|e| CatalogError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_data(data)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |kind, id: &str, reason| CatalogError::InvalidProfile {
            kind,
            id: id.to_string(),
            reason,
        };
        for (id, protein) in &self.proteins {
            protein
                .validate()
                .map_err(|reason| invalid(EntityKind::Protein, id, reason))?;
        }
        for (id, ligand) in &self.ligands {
            ligand
                .validate()
                .map_err(|reason| invalid(EntityKind::Ligand, id, reason))?;
        }
        for (id, line) in &self.cell_lines {
            line.validate()
                .map_err(|reason| invalid(EntityKind::CellLine, id, reason))?;
        }
        Ok(())
    }

    pub fn protein(&self, pdb_id: &str) -> Result<&ProteinProfile, CatalogError> {
        self.proteins
            .get(pdb_id)
            .ok_or_else(|| CatalogError::NotFound {
                kind: EntityKind::Protein,
                id: pdb_id.to_string(),
            })
    }

    pub fn ligand(&self, id: &str) -> Result<&LigandProfile, CatalogError> {
        self.ligands.get(id).ok_or_else(|| CatalogError::NotFound {
            kind: EntityKind::Ligand,
            id: id.to_string(),
        })
    }

    pub fn cell_line(&self, name: &str) -> Result<&CellLineProfile, CatalogError> {
        self.cell_lines
            .get(name)
            .ok_or_else(|| CatalogError::NotFound {
                kind: EntityKind::CellLine,
                id: name.to_string(),
            })
    }

    pub fn proteins(&self) -> impl Iterator<Item = &ProteinProfile> {
        self.proteins.values()
    }

    pub fn ligands(&self) -> impl Iterator<Item = &LigandProfile> {
        self.ligands.values()
    }

    pub fn cell_lines(&self) -> impl Iterator<Item = &CellLineProfile> {
        self.cell_lines.values()
    }

    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            proteins: self.proteins.values().cloned().collect(),
            ligands: self.ligands.values().cloned().collect(),
            cell_lines: self.cell_lines.values().cloned().collect(),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.to_data())
    }
}
