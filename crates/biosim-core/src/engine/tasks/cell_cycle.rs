use crate::engine::context::CultureContext;
use crate::engine::state::{CultureState, SPEED_RANGE};
use rand::Rng;
use tracing::{trace, warn};

/// Growth response to the medium, `nutrient_factor ^ dependence`.
///
/// Lines that rely less on growth factors supplied by the medium keep cycling longer as it
/// is depleted; an exhausted medium stops every line with non-zero dependence.
#[inline]
pub fn nutrient_response(nutrient_factor: f64, dependence: f64) -> f64 {
    nutrient_factor.clamp(0.0, 1.0).powf(dependence.clamp(0.0, 1.0))
}

/// Growth modifier applied to cycle progression: environment, nutrients, drug and
/// confluence combined.
pub fn growth_modifier(context: &CultureContext, state: &CultureState) -> f64 {
    let occupancy = state.total() as f64 / context.config.max_population as f64;
    let confluence = (1.0 - context.profile.contact_inhibition * occupancy).max(0.0);
    let nutrients = nutrient_response(
        state.medium().nutrient_factor(),
        context.profile.growth_factor_dependence,
    );
    context.environment.growth_factor * nutrients * context.treatment.growth_factor * confluence
}

/// Advances every viable cell by `dt` hours and performs the divisions that complete.
///
/// Division is deferred while the culture is at `max_population`; such cells wait at
/// the end of M.
///
/// # Return
///
/// The number of divisions performed.
pub fn run(context: &CultureContext, state: &mut CultureState, dt: f64) -> usize {
    let growth = growth_modifier(context, state);
    if growth <= 0.0 {
        return 0;
    }

    let max_population = context.config.max_population;
    let mut divisions = 0;
    let mut deferred = 0;

    for id in state.viable_ids() {
        let Some(cell) = state.cells_mut().get_mut(id) else {
            continue;
        };
        let progress = dt * cell.speed * growth;
        let Some(overflow) = cell.advance(progress, &context.schedule) else {
            continue;
        };

        if state.total() >= max_population {
            deferred += 1;
            continue;
        }

        let speed = state.rng().gen_range(SPEED_RANGE);
        let daughter = match state.cells_mut().get_mut(id) {
            Some(mother) => mother.divide(overflow, speed, &context.schedule),
            None => continue,
        };
        state.cells_mut().insert(daughter);
        divisions += 1;
    }

    if deferred > 0 {
        warn!(
            deferred,
            max_population, "Population cap reached; division deferred."
        );
    }
    trace!(growth, divisions, "Cell cycle advanced.");
    divisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::dynamics::cell::CellPhase;
    use crate::core::dynamics::environment::EnvironmentConditions;
    use crate::engine::config::{SimulationConfig, SimulationConfigBuilder};
    use crate::engine::progress::ProgressReporter;

    #[test]
    fn growth_modifier_is_one_for_fresh_nominal_culture_without_inhibition() {
        let catalog = Catalog::builtin();
        let mut profile = catalog.cell_line("HeLa").unwrap().clone();
        profile.contact_inhibition = 0.0;
        let config = SimulationConfig::default();
        let reporter = ProgressReporter::new();
        let context = CultureContext::new(
            &profile,
            &config,
            &EnvironmentConditions::default(),
            None,
            &reporter,
        )
        .unwrap();
        let state = CultureState::new(&context, 10, 1);
        assert!((growth_modifier(&context, &state) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nutrient_response_scales_with_growth_factor_dependence() {
        assert_eq!(nutrient_response(1.0, 0.8), 1.0);
        assert_eq!(nutrient_response(0.0, 0.5), 0.0);
        assert!((nutrient_response(0.25, 1.0) - 0.25).abs() < 1e-12);
        assert!((nutrient_response(0.25, 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn depleted_medium_slows_dependent_lines_more() {
        let catalog = Catalog::builtin();
        let config = SimulationConfig::default();
        let reporter = ProgressReporter::new();
        let mut profile = catalog.cell_line("HeLa").unwrap().clone();
        profile.contact_inhibition = 0.0;

        let modifier_for = |dependence: f64| {
            let mut profile = profile.clone();
            profile.growth_factor_dependence = dependence;
            let context = CultureContext::new(
                &profile,
                &config,
                &EnvironmentConditions::default(),
                None,
                &reporter,
            )
            .unwrap();
            let mut state = CultureState::new(&context, 10, 1);
            // consume half of the glucose in one hour
            let medium = config.medium;
            let cells = medium.glucose_mm / 2.0 * medium.volume_ml * 1e6
                / profile.glucose_consumption;
            state.medium_mut().consume(&profile, cells as usize, 1.0);
            let nutrient_factor = state.medium().nutrient_factor();
            assert!(nutrient_factor > 0.0 && nutrient_factor < 1.0);
            growth_modifier(&context, &state)
        };

        let tolerant = modifier_for(0.2);
        let dependent = modifier_for(1.0);
        assert!(dependent < tolerant && tolerant < 1.0);
        assert!((modifier_for(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn a_full_doubling_time_doubles_the_population() {
        let catalog = Catalog::builtin();
        let mut profile = catalog.cell_line("HeLa").unwrap().clone();
        profile.contact_inhibition = 0.0;
        let config = SimulationConfig::default();
        let reporter = ProgressReporter::new();
        let context = CultureContext::new(
            &profile,
            &config,
            &EnvironmentConditions::default(),
            None,
            &reporter,
        )
        .unwrap();
        let mut state = CultureState::new(&context, 100, 4);

        let substeps = (profile.doubling_time / 0.25) as usize;
        let mut divisions = 0;
        for _ in 0..substeps {
            divisions += run(&context, &mut state, 0.25);
        }
        // speed jitter of ±10% lets a few cells lag or lead by one division
        assert!((80..=120).contains(&divisions), "divisions = {divisions}");
        assert_eq!(state.total(), 100 + divisions);
    }

    #[test]
    fn population_cap_defers_division() {
        let catalog = Catalog::builtin();
        let config = SimulationConfigBuilder::new()
            .max_population(20)
            .build()
            .unwrap();
        let reporter = ProgressReporter::new();
        let context = CultureContext::new(
            catalog.cell_line("HEK293").unwrap(),
            &config,
            &EnvironmentConditions::default(),
            None,
            &reporter,
        )
        .unwrap();
        let mut state = CultureState::new(&context, 20, 8);
        for _ in 0..200 {
            assert_eq!(run(&context, &mut state, 0.25), 0);
        }
        assert_eq!(state.total(), 20);
        assert!(state.cells().values().any(|c| c.phase == CellPhase::M));
    }
}
