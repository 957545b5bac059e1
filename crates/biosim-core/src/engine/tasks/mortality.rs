use crate::engine::context::CultureContext;
use crate::engine::error::EngineError;
use crate::engine::state::CultureState;
use rand::Rng;
use tracing::trace;

/// Per-hour death hazard of a viable cell under the current conditions.
pub fn death_rate(context: &CultureContext, state: &CultureState) -> f64 {
    context.config.base_death_rate
        * context.environment.death_multiplier
        * state.medium().nutrient_stress()
        + context.treatment.kill_rate
}

/// Kills each viable cell with probability `1 - exp(-rate · dt)`.
///
/// Dead cells stay in the culture and are never revived.
///
/// # Return
///
/// The number of cells that died during this substep.
pub fn run(
    context: &CultureContext,
    state: &mut CultureState,
    dt: f64,
) -> Result<usize, EngineError> {
    let rate = death_rate(context, state);
    let probability = 1.0 - (-rate * dt).exp();
    if !probability.is_finite() {
        return Err(EngineError::Computation {
            context: "death probability",
            value: probability,
        });
    }
    let probability = probability.clamp(0.0, 1.0);
    if probability == 0.0 {
        return Ok(0);
    }

    let mut deaths = 0;
    for id in state.viable_ids() {
        if state.rng().gen_bool(probability) {
            if let Some(cell) = state.cells_mut().get_mut(id) {
                cell.kill();
                deaths += 1;
            }
        }
    }

    trace!(rate, deaths, "Mortality applied.");
    Ok(deaths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::dynamics::environment::EnvironmentConditions;
    use crate::engine::config::{SimulationConfig, SimulationConfigBuilder};
    use crate::engine::progress::ProgressReporter;

    #[test]
    fn nominal_death_rate_is_the_base_rate() {
        let catalog = Catalog::builtin();
        let config = SimulationConfig::default();
        let reporter = ProgressReporter::new();
        let context = CultureContext::new(
            catalog.cell_line("HeLa").unwrap(),
            &config,
            &EnvironmentConditions::default(),
            None,
            &reporter,
        )
        .unwrap();
        let state = CultureState::new(&context, 10, 1);
        assert!((death_rate(&context, &state) - 0.002).abs() < 1e-15);
    }

    #[test]
    fn dead_cells_stay_counted_and_do_not_revive() {
        let catalog = Catalog::builtin();
        let config = SimulationConfigBuilder::new()
            .base_death_rate(5.0)
            .build()
            .unwrap();
        let reporter = ProgressReporter::new();
        let context = CultureContext::new(
            catalog.cell_line("HeLa").unwrap(),
            &config,
            &EnvironmentConditions::default(),
            None,
            &reporter,
        )
        .unwrap();
        let mut state = CultureState::new(&context, 300, 9);

        let first = run(&context, &mut state, 0.25).unwrap();
        assert!(first > 0);
        assert_eq!(state.total(), 300);
        assert_eq!(state.viable(), 300 - first);

        let mut previous = state.viable();
        for _ in 0..10 {
            run(&context, &mut state, 0.25).unwrap();
            assert!(state.viable() <= previous);
            previous = state.viable();
        }
        assert_eq!(state.total(), 300);
    }

    #[test]
    fn zero_rate_kills_nothing() {
        let catalog = Catalog::builtin();
        let config = SimulationConfigBuilder::new()
            .base_death_rate(0.0)
            .build()
            .unwrap();
        let reporter = ProgressReporter::new();
        let context = CultureContext::new(
            catalog.cell_line("HeLa").unwrap(),
            &config,
            &EnvironmentConditions::default(),
            None,
            &reporter,
        )
        .unwrap();
        let mut state = CultureState::new(&context, 50, 2);
        assert_eq!(run(&context, &mut state, 1.0).unwrap(), 0);
    }
}
