use crate::engine::context::CultureContext;
use crate::engine::state::CultureState;
use tracing::trace;

/// Lets the viable cells consume the medium for `dt` hours.
pub fn run(context: &CultureContext, state: &mut CultureState, dt: f64) {
    let viable = state.viable();
    state.medium_mut().consume(context.profile, viable, dt);
    trace!(
        viable,
        atp = state.medium().atp_level(),
        "Medium updated."
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::dynamics::environment::EnvironmentConditions;
    use crate::engine::config::SimulationConfig;
    use crate::engine::progress::ProgressReporter;

    #[test]
    fn consumption_lowers_glucose_and_accumulates_lactate() {
        let catalog = Catalog::builtin();
        let config = SimulationConfig::default();
        let reporter = ProgressReporter::new();
        let context = CultureContext::new(
            catalog.cell_line("A549").unwrap(),
            &config,
            &EnvironmentConditions::default(),
            None,
            &reporter,
        )
        .unwrap();
        let mut state = CultureState::new(&context, 1_000, 5);

        run(&context, &mut state, 1.0);
        let after = state.medium().state();
        assert!(after.glucose < config.medium.glucose_mm);
        assert!(after.lactate > 0.0);
    }
}
