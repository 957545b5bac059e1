use crate::core::catalog::Catalog;
use crate::core::docking::pose::{BindingMode, BindingSiteSummary, DockingResult};
use crate::engine::config::DockingConfig;
use crate::engine::context::DockingContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use crate::engine::utils::sampling::boltzmann_weights;
use crate::engine::utils::seed::SeedBuilder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{info, instrument};

/// Gas constant times 298 K, in kcal/mol.
pub const RT_KCAL_PER_MOL: f64 = 0.593;

/// A docking request as received from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockingRequest {
    pub protein_id: String,
    pub ligand_id: String,
    /// Falls back to [`DockingConfig::num_modes`] when absent.
    #[serde(default)]
    pub num_modes: Option<usize>,
}

impl DockingRequest {
    pub fn new(protein_id: impl Into<String>, ligand_id: impl Into<String>) -> Self {
        Self {
            protein_id: protein_id.into(),
            ligand_id: ligand_id.into(),
            num_modes: None,
        }
    }

    pub fn with_num_modes(mut self, num_modes: usize) -> Self {
        self.num_modes = Some(num_modes);
        self
    }
}

/// Seed of a docking run: the configured override, or a hash of both identifiers.
pub fn docking_seed(request: &DockingRequest, config: &DockingConfig) -> u64 {
    config.seed.unwrap_or_else(|| {
        SeedBuilder::new()
            .with_str(&request.protein_id)
            .with_str(&request.ligand_id)
            .finish()
    })
}

/// Docks a ligand into a protein's binding site and returns the ranked binding modes.
///
/// # Arguments
///
/// * `catalog` - Reference tables used to resolve both identifiers.
/// * `request` - Protein and ligand identifiers and the optional mode count.
/// * `config` - Mode-count limits and seed override.
/// * `reporter` - Receives phase and per-pose progress events.
///
/// # Return
///
/// A [`DockingResult`] whose modes are sorted by ascending affinity and numbered from 1.
///
/// # Errors
///
/// Returns [`EngineError::NotFound`] for an unknown protein or ligand and
/// [`EngineError::InvalidParameter`] for a mode count outside `1..=max_modes`.
#[instrument(skip_all, name = "docking_workflow", fields(protein = %request.protein_id, ligand = %request.ligand_id))]
pub fn run(
    catalog: &Catalog,
    request: &DockingRequest,
    config: &DockingConfig,
    reporter: &ProgressReporter,
) -> Result<DockingResult, EngineError> {
    let num_modes = request.num_modes.unwrap_or(config.num_modes);
    if !(1..=config.max_modes).contains(&num_modes) {
        return Err(EngineError::invalid(
            "num_modes",
            num_modes,
            format!("must lie within 1..={}", config.max_modes),
        ));
    }

    let protein = catalog.protein(&request.protein_id)?;
    let ligand = catalog.ligand(&request.ligand_id)?;
    let seed = docking_seed(request, config);

    reporter.report(Progress::PhaseStart { name: "Docking" });
    let context = DockingContext::new(protein, ligand, reporter, seed);
    info!(
        base_affinity = context.base_affinity,
        spread = context.spread,
        seed,
        num_modes,
        "Starting pose search."
    );

    let candidates: Vec<_> = tasks::pose_search::run(&context, num_modes)?
        .into_iter()
        .sorted_by(|a, b| {
            a.affinity
                .partial_cmp(&b.affinity)
                .unwrap_or(Ordering::Equal)
                .then(a.search_index.cmp(&b.search_index))
        })
        .collect();

    let affinities: Vec<f64> = candidates.iter().map(|c| c.affinity).collect();
    let populations = boltzmann_weights(&affinities, 1.0 / RT_KCAL_PER_MOL)?;

    let modes: Vec<BindingMode> = candidates
        .into_iter()
        .zip(populations)
        .enumerate()
        .map(|(rank, (candidate, population))| {
            let (rmsd_lower_bound, rmsd_upper_bound) = if rank == 0 {
                (0.0, 0.0)
            } else {
                candidate.rmsd_bounds
            };
            BindingMode {
                mode: rank + 1,
                affinity: candidate.affinity,
                fingerprint: candidate.fingerprint,
                population,
                rmsd_lower_bound,
                rmsd_upper_bound,
                contacts: candidate.contacts,
            }
        })
        .collect();

    let best_affinity = modes[0].affinity;
    reporter.report(Progress::PhaseFinish);
    info!(best_affinity, "Docking complete.");

    Ok(DockingResult {
        protein_id: protein.pdb_id.clone(),
        ligand_id: ligand.id.clone(),
        seed,
        modes,
        best_affinity,
        binding_site: BindingSiteSummary {
            volume: protein.binding_site_volume,
            druggability: protein.druggability,
            flexibility: protein.flexibility_score,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::EntityKind;
    use crate::engine::config::DockingConfigBuilder;

    fn dock(protein: &str, ligand: &str, num_modes: Option<usize>) -> Result<DockingResult, EngineError> {
        let mut request = DockingRequest::new(protein, ligand);
        request.num_modes = num_modes;
        run(
            &Catalog::builtin(),
            &request,
            &DockingConfig::default(),
            &ProgressReporter::new(),
        )
    }

    #[test]
    fn remdesivir_in_main_protease_yields_nine_ranked_modes() {
        let result = dock("6LU7", "remdesivir", Some(9)).unwrap();

        assert_eq!(result.modes.len(), 9);
        for pair in result.modes.windows(2) {
            assert!(pair[0].affinity <= pair[1].affinity);
        }
        let min = result
            .modes
            .iter()
            .map(|m| m.affinity)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(result.best_affinity, min);
        assert_eq!(result.best_affinity, result.modes[0].affinity);
        for (i, mode) in result.modes.iter().enumerate() {
            assert_eq!(mode.mode, i + 1);
        }
    }

    #[test]
    fn default_mode_count_comes_from_config() {
        let result = dock("1HVH", "aspirin", None).unwrap();
        assert_eq!(result.modes.len(), 9);
    }

    #[test]
    fn populations_sum_to_one_and_best_mode_has_zero_rmsd() {
        let result = dock("2OXY", "ibuprofen", Some(12)).unwrap();
        let total: f64 = result.modes.iter().map(|m| m.population).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(result.modes[0].population >= result.modes[11].population);
        assert_eq!(result.modes[0].rmsd_lower_bound, 0.0);
        assert_eq!(result.modes[0].rmsd_upper_bound, 0.0);
        for mode in &result.modes[1..] {
            assert!(mode.rmsd_upper_bound > mode.rmsd_lower_bound);
        }
    }

    #[test]
    fn docking_is_deterministic() {
        let a = dock("6LU7", "remdesivir", Some(9)).unwrap();
        let b = dock("6LU7", "remdesivir", Some(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fewer_modes_sample_a_subset_of_the_same_poses() {
        let few = dock("6LU7", "aspirin", Some(3)).unwrap();
        let many = dock("6LU7", "aspirin", Some(9)).unwrap();
        for mode in &few.modes {
            assert!(many.modes.iter().any(|m| m.affinity == mode.affinity));
        }
    }

    #[test]
    fn seed_override_changes_the_poses() {
        let config = DockingConfigBuilder::new().seed(12345).build().unwrap();
        let request = DockingRequest::new("6LU7", "remdesivir");
        let seeded = run(
            &Catalog::builtin(),
            &request,
            &config,
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(seeded.seed, 12345);
        assert_ne!(seeded, dock("6LU7", "remdesivir", None).unwrap());
    }

    #[test]
    fn fingerprints_are_consistent_with_ligand_chemistry() {
        // remdesivir's two Kekulé rings stack on HIS41 and HIS163
        let result = dock("6LU7", "remdesivir", Some(9)).unwrap();
        assert!(result.modes.iter().all(|m| m.fingerprint.pi_stacking == 2));
        assert!(result.modes.iter().any(|m| m.fingerprint.hydrogen_bonds > 0));

        // aspirin (logP 1.19, one benzene ring) stacks on HIS41 or HIS163
        let result = dock("6LU7", "aspirin", Some(9)).unwrap();
        assert!(result.modes.iter().all(|m| m.fingerprint.pi_stacking == 1));
    }

    #[test]
    fn mode_count_outside_limits_is_rejected() {
        for n in [0, 21] {
            let err = dock("6LU7", "remdesivir", Some(n)).unwrap_err();
            assert!(matches!(
                err,
                EngineError::InvalidParameter {
                    name: "num_modes",
                    ..
                }
            ));
        }
        assert_eq!(dock("6LU7", "remdesivir", Some(20)).unwrap().modes.len(), 20);
    }

    #[test]
    fn unknown_identifiers_are_not_found() {
        let err = dock("0XXX", "aspirin", None).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { kind: EntityKind::Protein, ref id } if id == "0XXX"));
        let err = dock("6LU7", "caffeine", None).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { kind: EntityKind::Ligand, ref id } if id == "caffeine"));
    }

    #[test]
    fn request_uses_camel_case_keys() {
        let request: DockingRequest =
            serde_json::from_str(r#"{"proteinId": "6LU7", "ligandId": "aspirin", "numModes": 5}"#)
                .unwrap();
        assert_eq!(request.num_modes, Some(5));
    }
}
