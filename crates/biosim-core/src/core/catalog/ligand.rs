use serde::{Deserialize, Serialize};

/// Physicochemical descriptors of a small-molecule ligand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LigandProfile {
    /// Catalog key, lower-case by convention (e.g. `aspirin`).
    pub id: String,
    pub name: String,
    /// Structure as a SMILES string.
    pub smiles: String,
    /// Molecular weight in g/mol.
    pub molecular_weight: f64,
    /// Octanol/water partition coefficient.
    pub log_p: f64,
    pub h_bond_donors: u32,
    pub h_bond_acceptors: u32,
    pub rotatable_bonds: u32,
}

impl LigandProfile {
    #[inline]
    pub fn h_bond_capacity(&self) -> u32 {
        self.h_bond_donors + self.h_bond_acceptors
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("identifier must not be empty".to_string());
        }
        if self.smiles.trim().is_empty() {
            return Err("SMILES must not be empty".to_string());
        }
        if !(self.molecular_weight.is_finite() && self.molecular_weight > 0.0) {
            return Err(format!(
                "molecular weight must be positive, got {}",
                self.molecular_weight
            ));
        }
        if !self.log_p.is_finite() {
            return Err(format!("LogP must be finite, got {}", self.log_p));
        }
        Ok(())
    }
}
