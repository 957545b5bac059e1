use super::aromaticity::{aromatic_ring_count, ligand_is_aromatic};
use crate::core::catalog::{LigandProfile, ProteinProfile};
use rand::Rng;
use serde::{Deserialize, Serialize};

const STRENGTH_SCALE: f64 = 10.0; // kcal/mol for unit strength
const MAX_STRENGTH: f64 = 1.5;
const HBOND_SATURATION: f64 = 0.35;
const HYDROPHOBIC_PER_LOGP: f64 = 1.2;

/// Counts of the non-covalent interactions formed by one binding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InteractionFingerprint {
    pub hydrogen_bonds: u32,
    pub hydrophobic_contacts: u32,
    pub pi_stacking: u32,
}

impl InteractionFingerprint {
    pub fn total(&self) -> u32 {
        self.hydrogen_bonds + self.hydrophobic_contacts + self.pi_stacking
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    #[serde(rename = "Hydrogen Bond")]
    HydrogenBond,
    #[serde(rename = "Hydrophobic Contact")]
    HydrophobicContact,
    #[serde(rename = "π-π Stacking")]
    PiStacking,
}

impl InteractionKind {
    /// Typical donor-acceptor or centroid distance range in Å.
    fn distance_range(self) -> (f64, f64) {
        match self {
            InteractionKind::HydrogenBond => (2.6, 3.3),
            InteractionKind::HydrophobicContact => (3.5, 4.5),
            InteractionKind::PiStacking => (3.4, 4.0),
        }
    }

    /// Typical per-contact energy range in kcal/mol.
    fn energy_range(self) -> (f64, f64) {
        match self {
            InteractionKind::HydrogenBond => (-2.5, -1.0),
            InteractionKind::HydrophobicContact => (-1.0, -0.3),
            InteractionKind::PiStacking => (-2.0, -1.0),
        }
    }
}

/// One interaction between the ligand and a named pocket residue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidueContact {
    pub residue: String,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub distance: f64,
    pub energy: f64,
}

/// Maps an affinity onto a non-negative binding strength; 1.0 corresponds to −10 kcal/mol.
#[inline]
pub fn binding_strength(affinity: f64) -> f64 {
    (-affinity / STRENGTH_SCALE).clamp(0.0, MAX_STRENGTH)
}

/// π–π stacking is only possible when the ligand is aromatic and the pocket offers at
/// least one aromatic side chain; the count is bounded by both partners.
pub fn pi_stacking_count(protein: &ProteinProfile, ligand: &LigandProfile) -> u32 {
    if !ligand_is_aromatic(ligand) {
        return 0;
    }
    let residues = protein.aromatic_residue_count() as u32;
    aromatic_ring_count(&ligand.smiles).min(residues)
}

/// Derives the interaction fingerprint of a pose from the ligand descriptors and the
/// pose affinity.
pub fn fingerprint(
    protein: &ProteinProfile,
    ligand: &LigandProfile,
    affinity: f64,
) -> InteractionFingerprint {
    let strength = binding_strength(affinity);
    let capacity = ligand.h_bond_capacity();

    let hydrogen_bonds =
        ((capacity as f64 * HBOND_SATURATION * strength).round() as u32).min(capacity);
    let hydrophobic_contacts =
        (ligand.log_p.max(0.0) * HYDROPHOBIC_PER_LOGP * (0.5 + 0.5 * strength)).round() as u32;

    InteractionFingerprint {
        hydrogen_bonds,
        hydrophobic_contacts,
        pi_stacking: pi_stacking_count(protein, ligand),
    }
}

/// Places each interaction of a fingerprint on a pocket residue.
///
/// π–π contacts are only assigned to aromatic residues. Returns an empty list when the
/// protein has no annotated pocket residues.
pub fn assign_contacts(
    protein: &ProteinProfile,
    fingerprint: &InteractionFingerprint,
    rng: &mut impl Rng,
) -> Vec<ResidueContact> {
    let residues = &protein.binding_site_residues;
    if residues.is_empty() {
        return Vec::new();
    }
    let all: Vec<&str> = residues.iter().map(String::as_str).collect();
    let aromatic: Vec<&str> = protein.aromatic_residues().collect();

    let mut contacts = Vec::with_capacity(fingerprint.total() as usize);
    for _ in 0..fingerprint.hydrogen_bonds {
        contacts.push(contact(InteractionKind::HydrogenBond, &all, rng));
    }
    for _ in 0..fingerprint.hydrophobic_contacts {
        contacts.push(contact(InteractionKind::HydrophobicContact, &all, rng));
    }
    if !aromatic.is_empty() {
        for _ in 0..fingerprint.pi_stacking {
            contacts.push(contact(InteractionKind::PiStacking, &aromatic, rng));
        }
    }

    contacts
}

fn contact(kind: InteractionKind, pool: &[&str], rng: &mut impl Rng) -> ResidueContact {
    let residue = pool[rng.gen_range(0..pool.len())];
    let (d_lo, d_hi) = kind.distance_range();
    let (e_lo, e_hi) = kind.energy_range();
    ResidueContact {
        residue: residue.to_string(),
        kind,
        distance: round2(rng.gen_range(d_lo..=d_hi)),
        energy: round2(rng.gen_range(e_lo..=e_hi)),
    }
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::docking::aromaticity::AROMATIC_LOGP_THRESHOLD;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn protein(residues: &[&str]) -> ProteinProfile {
        ProteinProfile {
            pdb_id: "P".to_string(),
            name: "P".to_string(),
            organism: "X".to_string(),
            resolution: 2.0,
            binding_site_volume: 480.0,
            flexibility_score: 0.5,
            druggability: 0.88,
            binding_site_residues: residues.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn ligand(smiles: &str, log_p: f64, hbd: u32, hba: u32) -> LigandProfile {
        LigandProfile {
            id: "l".to_string(),
            name: "L".to_string(),
            smiles: smiles.to_string(),
            molecular_weight: 250.0,
            log_p,
            h_bond_donors: hbd,
            h_bond_acceptors: hba,
            rotatable_bonds: 2,
        }
    }

    #[test]
    fn binding_strength_is_zero_for_unfavourable_affinity_and_capped() {
        assert_eq!(binding_strength(0.0), 0.0);
        assert_eq!(binding_strength(2.0), 0.0);
        assert!((binding_strength(-10.0) - 1.0).abs() < 1e-12);
        assert_eq!(binding_strength(-40.0), MAX_STRENGTH);
    }

    #[test]
    fn hydrogen_bonds_scale_with_capacity_and_strength() {
        let p = protein(&["SER1"]);
        let weak = fingerprint(&p, &ligand("CCO", 0.5, 4, 13), -3.0);
        let strong = fingerprint(&p, &ligand("CCO", 0.5, 4, 13), -12.0);
        assert!(strong.hydrogen_bonds > weak.hydrogen_bonds);
        assert!(strong.hydrogen_bonds <= 17);
        let none = fingerprint(&p, &ligand("CCO", 0.5, 0, 0), -12.0);
        assert_eq!(none.hydrogen_bonds, 0);
    }

    #[test]
    fn hydrophobic_contacts_follow_logp() {
        let p = protein(&["LEU1"]);
        let low = fingerprint(&p, &ligand("CCO", 0.5, 1, 1), -8.0);
        let high = fingerprint(&p, &ligand("CCO", 4.0, 1, 1), -8.0);
        assert!(high.hydrophobic_contacts > low.hydrophobic_contacts);
        let negative = fingerprint(&p, &ligand("CCO", -2.0, 1, 1), -8.0);
        assert_eq!(negative.hydrophobic_contacts, 0);
    }

    #[test]
    fn pi_stacking_requires_aromatic_ligand_and_pocket() {
        let aromatic_pocket = protein(&["HIS41", "MET49"]);
        let aliphatic_pocket = protein(&["MET49", "LEU27"]);
        let benzene_like = ligand("c1ccccc1CC", 2.0, 0, 0);

        assert_eq!(pi_stacking_count(&aromatic_pocket, &benzene_like), 1);
        assert_eq!(pi_stacking_count(&aliphatic_pocket, &benzene_like), 0);
        assert_eq!(
            pi_stacking_count(&aromatic_pocket, &ligand("CCCCCC", 2.0, 0, 0)),
            0
        );
    }

    #[test]
    fn pi_stacking_switches_on_exactly_at_logp_threshold() {
        let pocket = protein(&["PHE80", "TYR81"]);
        let at = ligand("c1ccc2ccccc2c1", AROMATIC_LOGP_THRESHOLD, 0, 0);
        let below = ligand("c1ccc2ccccc2c1", AROMATIC_LOGP_THRESHOLD - 0.01, 0, 0);
        assert_eq!(pi_stacking_count(&pocket, &at), 2);
        assert_eq!(pi_stacking_count(&pocket, &below), 0);
    }

    #[test]
    fn contacts_match_fingerprint_counts_and_use_aromatic_residues_for_stacking() {
        let p = protein(&["HIS41", "CYS145", "MET49"]);
        let fp = InteractionFingerprint {
            hydrogen_bonds: 3,
            hydrophobic_contacts: 2,
            pi_stacking: 1,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let contacts = assign_contacts(&p, &fp, &mut rng);

        assert_eq!(contacts.len(), 6);
        let stacking: Vec<_> = contacts
            .iter()
            .filter(|c| c.kind == InteractionKind::PiStacking)
            .collect();
        assert_eq!(stacking.len(), 1);
        assert_eq!(stacking[0].residue, "HIS41");
        for c in &contacts {
            let (lo, hi) = c.kind.distance_range();
            assert!(c.distance >= lo - 0.005 && c.distance <= hi + 0.005);
            assert!(c.energy < 0.0);
        }
    }

    #[test]
    fn contacts_are_empty_without_annotated_residues() {
        let fp = InteractionFingerprint {
            hydrogen_bonds: 2,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(assign_contacts(&protein(&[]), &fp, &mut rng).is_empty());
    }
}
