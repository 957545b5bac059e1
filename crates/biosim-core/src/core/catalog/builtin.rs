use super::cell_line::{CellLineProfile, CellType};
use super::ligand::LigandProfile;
use super::protein::ProteinProfile;
use super::registry::CatalogData;
use std::collections::BTreeMap;

#[allow(clippy::too_many_arguments)]
fn protein(
    pdb_id: &str,
    name: &str,
    organism: &str,
    resolution: f64,
    binding_site_volume: f64,
    flexibility_score: f64,
    druggability: f64,
    residues: &[&str],
) -> ProteinProfile {
    ProteinProfile {
        pdb_id: pdb_id.to_string(),
        name: name.to_string(),
        organism: organism.to_string(),
        resolution,
        binding_site_volume,
        flexibility_score,
        druggability,
        binding_site_residues: residues.iter().map(|r| r.to_string()).collect(),
    }
}

fn ligand(
    id: &str,
    name: &str,
    smiles: &str,
    molecular_weight: f64,
    log_p: f64,
    (h_bond_donors, h_bond_acceptors): (u32, u32),
    rotatable_bonds: u32,
) -> LigandProfile {
    LigandProfile {
        id: id.to_string(),
        name: name.to_string(),
        smiles: smiles.to_string(),
        molecular_weight,
        log_p,
        h_bond_donors,
        h_bond_acceptors,
        rotatable_bonds,
    }
}

fn sensitivity(entries: [(&str, f64); 5]) -> BTreeMap<String, f64> {
    entries
        .into_iter()
        .map(|(drug, ic50)| (drug.to_string(), ic50))
        .collect()
}

pub(super) fn catalog_data() -> CatalogData {
    let proteins = vec![
        protein(
            "1HVH",
            "HIV-1 Protease",
            "HIV-1",
            1.8,
            450.0,
            0.6,
            0.85,
            &["ILE50", "ASP25", "GLY27", "ALA28", "ASP29", "ASP30"],
        ),
        protein(
            "2OXY",
            "Cyclooxygenase-2",
            "Human",
            2.1,
            520.0,
            0.4,
            0.92,
            &["ARG120", "TYR355", "VAL349", "SER530", "LEU352"],
        ),
        protein(
            "6LU7",
            "SARS-CoV-2 Main Protease",
            "SARS-CoV-2",
            2.16,
            480.0,
            0.5,
            0.88,
            &["HIS41", "CYS145", "MET49", "GLU166", "HIS163"],
        ),
        protein(
            "5R81",
            "EGFR Kinase",
            "Human",
            2.3,
            560.0,
            0.7,
            0.90,
            &["MET793", "LEU718", "VAL726", "ALA743", "LYS745"],
        ),
    ];

    let ligands = vec![
        ligand(
            "aspirin",
            "Aspirin",
            "CC(=O)Oc1ccccc1C(=O)O",
            180.16,
            1.19,
            (1, 4),
            3,
        ),
        ligand(
            "ibuprofen",
            "Ibuprofen",
            "CC(C)Cc1ccc(cc1)C(C)C(=O)O",
            206.28,
            3.97,
            (1, 2),
            4,
        ),
        ligand(
            "remdesivir",
            "Remdesivir",
            "CCC(CC)COC(=O)C(C)NP(=O)(OCC1C(C(C(O1)C#N)(C(=O)OC)C)O)OC2=CC=CC3=C2N=CN=C3N",
            602.58,
            1.9,
            (4, 13),
            14,
        ),
    ];

    let cell_lines = vec![
        CellLineProfile {
            name: "HeLa".to_string(),
            cell_type: CellType::Cancer,
            origin: "Cervical carcinoma".to_string(),
            doubling_time: 24.0,
            adherent: true,
            g1_duration: 10.0,
            s_duration: 8.0,
            g2_duration: 4.0,
            m_duration: 2.0,
            glucose_consumption: 2.5,
            oxygen_consumption: 1.8,
            lactate_production: 3.2,
            drug_sensitivity: sensitivity([
                ("taxol", 8.5),
                ("cisplatin", 12.3),
                ("doxorubicin", 6.7),
                ("gemcitabine", 15.2),
                ("targeted", 20.0),
            ]),
            growth_factor_dependence: 0.6,
            contact_inhibition: 0.2,
        },
        CellLineProfile {
            name: "MCF-7".to_string(),
            cell_type: CellType::Cancer,
            origin: "Breast adenocarcinoma".to_string(),
            doubling_time: 29.0,
            adherent: true,
            g1_duration: 14.0,
            s_duration: 9.0,
            g2_duration: 4.0,
            m_duration: 2.0,
            glucose_consumption: 2.1,
            oxygen_consumption: 1.5,
            lactate_production: 2.8,
            drug_sensitivity: sensitivity([
                ("taxol", 6.2),
                ("cisplatin", 18.5),
                ("doxorubicin", 4.3),
                ("gemcitabine", 22.1),
                ("targeted", 8.5),
            ]),
            growth_factor_dependence: 0.8,
            contact_inhibition: 0.5,
        },
        CellLineProfile {
            name: "A549".to_string(),
            cell_type: CellType::Cancer,
            origin: "Lung carcinoma".to_string(),
            doubling_time: 22.0,
            adherent: true,
            g1_duration: 9.0,
            s_duration: 7.0,
            g2_duration: 4.0,
            m_duration: 2.0,
            glucose_consumption: 2.8,
            oxygen_consumption: 2.1,
            lactate_production: 3.5,
            drug_sensitivity: sensitivity([
                ("taxol", 10.5),
                ("cisplatin", 15.8),
                ("doxorubicin", 8.9),
                ("gemcitabine", 12.3),
                ("targeted", 25.0),
            ]),
            growth_factor_dependence: 0.7,
            contact_inhibition: 0.3,
        },
        CellLineProfile {
            name: "HEK293".to_string(),
            cell_type: CellType::Normal,
            origin: "Embryonic kidney".to_string(),
            doubling_time: 20.0,
            adherent: true,
            g1_duration: 8.0,
            s_duration: 7.0,
            g2_duration: 3.0,
            m_duration: 2.0,
            glucose_consumption: 1.8,
            oxygen_consumption: 1.3,
            lactate_production: 2.0,
            drug_sensitivity: sensitivity([
                ("taxol", 15.0),
                ("cisplatin", 25.0),
                ("doxorubicin", 18.0),
                ("gemcitabine", 30.0),
                ("targeted", 50.0),
            ]),
            growth_factor_dependence: 0.5,
            contact_inhibition: 0.7,
        },
    ];

    CatalogData {
        proteins,
        ligands,
        cell_lines,
    }
}
