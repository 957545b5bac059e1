use crate::core::docking::fingerprint::{
    InteractionFingerprint, ResidueContact, assign_contacts, fingerprint,
};
use crate::core::docking::scoring::pose_affinity;
use crate::engine::context::DockingContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::utils::seed::stream_seed;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An unranked pose produced by the search.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseCandidate {
    /// Position in the search order; also selects the random stream.
    pub search_index: usize,
    pub affinity: f64,
    pub fingerprint: InteractionFingerprint,
    pub contacts: Vec<ResidueContact>,
    /// RMSD bounds to the best pose, used unless this pose ranks first.
    pub rmsd_bounds: (f64, f64),
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn generate(context: &DockingContext, search_index: usize) -> Result<PoseCandidate, EngineError> {
    let mut rng = ChaCha8Rng::seed_from_u64(stream_seed(context.seed, search_index as u64));

    let deviate: f64 = StandardNormal.sample(&mut rng);
    let affinity = pose_affinity(context.base_affinity, context.spread, deviate, search_index);
    if !affinity.is_finite() {
        return Err(EngineError::Computation {
            context: "pose affinity",
            value: affinity,
        });
    }

    let fingerprint = fingerprint(context.protein, context.ligand, affinity);
    let contacts = assign_contacts(context.protein, &fingerprint, &mut rng);

    // wider spread in affinity goes with larger conformational distance
    let scale = 0.5 + context.protein.flexibility_score.clamp(0.0, 1.0);
    let lower = round2(rng.gen_range(0.5..=2.0) * scale);
    let upper = round2(lower + rng.gen_range(0.5..=2.0));

    context.reporter.report(Progress::TaskIncrement);
    Ok(PoseCandidate {
        search_index,
        affinity,
        fingerprint,
        contacts,
        rmsd_bounds: (lower, upper),
    })
}

/// Generates `num_modes` candidate poses, each from its own seeded stream.
///
/// Pose `i` depends only on the run seed and `i`, so the candidates are identical whether
/// generated serially or in parallel, and a shorter search is a prefix of a longer one.
#[instrument(skip_all, name = "pose_search_task", fields(num_modes))]
pub fn run(context: &DockingContext, num_modes: usize) -> Result<Vec<PoseCandidate>, EngineError> {
    context.reporter.report(Progress::TaskStart {
        total_steps: num_modes as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..num_modes;

    #[cfg(feature = "parallel")]
    let iterator = (0..num_modes).into_par_iter();

    let candidates = iterator
        .map(|i| generate(context, i))
        .collect::<Result<Vec<_>, _>>()?;

    context.reporter.report(Progress::TaskFinish);
    debug!(
        base_affinity = context.base_affinity,
        spread = context.spread,
        "Generated {} pose candidates.",
        candidates.len()
    );
    Ok(candidates)
}
