use phf::phf_set;
use serde::{Deserialize, Serialize};

/// Residue names whose side chains carry an aromatic ring able to stack with a ligand.
static AROMATIC_RESIDUES: phf::Set<&'static str> = phf_set! {
    "HIS", "PHE", "TYR", "TRP",
};

/// Structural and pharmacological summary of a protein target.
///
/// Profiles are loaded once into a [`Catalog`](super::Catalog) and are never
/// mutated afterwards; the docking engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProteinProfile {
    /// PDB accession code, used as the catalog key.
    pub pdb_id: String,
    pub name: String,
    pub organism: String,
    /// Crystallographic resolution in Å.
    pub resolution: f64,
    /// Binding-site volume in Å³.
    pub binding_site_volume: f64,
    /// Conformational flexibility of the binding site, in `[0, 1]`.
    pub flexibility_score: f64,
    /// Druggability estimate of the binding site, in `[0, 1]`.
    pub druggability: f64,
    /// Residue labels lining the pocket (e.g. `HIS41`).
    #[serde(default)]
    pub binding_site_residues: Vec<String>,
}

impl ProteinProfile {
    /// Number of pocket residues with an aromatic side chain.
    pub fn aromatic_residue_count(&self) -> usize {
        self.binding_site_residues
            .iter()
            .filter(|label| is_aromatic_residue(label))
            .count()
    }

    /// Pocket residues with an aromatic side chain, in catalog order.
    pub fn aromatic_residues(&self) -> impl Iterator<Item = &str> {
        self.binding_site_residues
            .iter()
            .map(String::as_str)
            .filter(|label| is_aromatic_residue(label))
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.pdb_id.trim().is_empty() {
            return Err("identifier must not be empty".to_string());
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(format!("resolution must be positive, got {}", self.resolution));
        }
        if !(self.binding_site_volume.is_finite() && self.binding_site_volume > 0.0) {
            return Err(format!(
                "binding site volume must be positive, got {}",
                self.binding_site_volume
            ));
        }
        if !(0.0..=1.0).contains(&self.flexibility_score) {
            return Err(format!(
                "flexibility score must lie in [0, 1], got {}",
                self.flexibility_score
            ));
        }
        if !(0.0..=1.0).contains(&self.druggability) {
            return Err(format!(
                "druggability must lie in [0, 1], got {}",
                self.druggability
            ));
        }
        Ok(())
    }
}

/// Returns `true` when a residue label such as `TYR355` or `his` names an aromatic residue.
pub fn is_aromatic_residue(label: &str) -> bool {
    let name: String = label
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    AROMATIC_RESIDUES.contains(name.as_str())
}
