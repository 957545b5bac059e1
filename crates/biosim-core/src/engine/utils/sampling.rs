use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("Input energies list is empty, cannot compute populations")]
    EmptyEnergies,
    #[error(
        "All energies are too high or beta is zero, resulting in zero total weight for the ensemble"
    )]
    ZeroTotalWeight,
    #[error("Invalid beta value: {0}. Beta must be positive for Boltzmann weighting")]
    InvalidBeta(f64),
    #[error("Non-finite energy {0} in Boltzmann ensemble")]
    NonFiniteEnergy(f64),
}

/// Normalised Boltzmann populations `exp(-β(E - E_min)) / Σ` of an energy ensemble.
///
/// Shifting by the minimum keeps the largest weight at exactly 1 before normalisation,
/// so the result cannot underflow to an all-zero vector for finite energies.
#[instrument(level = "trace", skip_all, fields(beta, n = energies.len()))]
pub fn boltzmann_weights(energies: &[f64], beta: f64) -> Result<Vec<f64>, SamplingError> {
    if energies.is_empty() {
        return Err(SamplingError::EmptyEnergies);
    }
    if !(beta.is_finite() && beta > 0.0) {
        return Err(SamplingError::InvalidBeta(beta));
    }
    if let Some(&bad) = energies.iter().find(|e| !e.is_finite()) {
        return Err(SamplingError::NonFiniteEnergy(bad));
    }

    let min_energy = energies.iter().copied().fold(f64::INFINITY, f64::min);
    let weights: Vec<f64> = energies
        .iter()
        .map(|&e| (-(e - min_energy) * beta).exp())
        .collect();

    let total_weight: f64 = weights.iter().sum();
    if total_weight <= f64::EPSILON {
        return Err(SamplingError::ZeroTotalWeight);
    }

    Ok(weights.into_iter().map(|w| w / total_weight).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one_and_favour_low_energy() {
        let weights = boltzmann_weights(&[-9.0, -8.0, -7.5], 1.0 / 0.593).unwrap();
        let total: f64 = weights.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(weights[0] > weights[1] && weights[1] > weights[2]);
    }

    #[test]
    fn degenerate_energies_share_population_equally() {
        let weights = boltzmann_weights(&[-5.0; 4], 2.0).unwrap();
        for w in weights {
            assert!((w - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(matches!(
            boltzmann_weights(&[], 1.0),
            Err(SamplingError::EmptyEnergies)
        ));
        assert!(matches!(
            boltzmann_weights(&[-1.0], 0.0),
            Err(SamplingError::InvalidBeta(_))
        ));
        assert!(matches!(
            boltzmann_weights(&[-1.0, f64::NAN], 1.0),
            Err(SamplingError::NonFiniteEnergy(_))
        ));
    }
}
