use crate::core::catalog::Catalog;
use crate::core::dynamics::environment::EnvironmentConditions;
use crate::core::dynamics::experiment::{ExperimentParams, Treatment};
use crate::core::dynamics::snapshot::{CellSimulationResult, PopulationSnapshot};
use crate::engine::config::SimulationConfig;
use crate::engine::context::CultureContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::CultureState;
use crate::engine::tasks;
use crate::engine::utils::seed::SeedBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A culture simulation request as received from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub cell_line_name: String,
    pub experiment_params: ExperimentParams,
    #[serde(default)]
    pub environment: EnvironmentConditions,
    #[serde(default)]
    pub treatment: Option<Treatment>,
}

impl SimulationRequest {
    pub fn new(cell_line_name: impl Into<String>, experiment_params: ExperimentParams) -> Self {
        Self {
            cell_line_name: cell_line_name.into(),
            experiment_params,
            environment: EnvironmentConditions::default(),
            treatment: None,
        }
    }

    pub fn with_environment(mut self, environment: EnvironmentConditions) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_treatment(mut self, treatment: Treatment) -> Self {
        self.treatment = Some(treatment);
        self
    }
}

/// Seed of a culture run: the configured override, or a hash of every request field.
pub fn simulation_seed(request: &SimulationRequest, config: &SimulationConfig) -> u64 {
    if let Some(seed) = config.seed {
        return seed;
    }
    let params = &request.experiment_params;
    let env = &request.environment;
    let builder = SeedBuilder::new()
        .with_str(&request.cell_line_name)
        .with_u64(params.initial_cells)
        .with_f64(params.duration)
        .with_f64(params.time_interval)
        .with_f64(env.temperature)
        .with_f64(env.co2)
        .with_f64(env.humidity);
    match &request.treatment {
        Some(t) => builder
            .with_str(&t.drug_class)
            .with_f64(t.concentration)
            .finish(),
        None => builder.with_str("none").finish(),
    }
}

fn validate_params(params: &ExperimentParams, config: &SimulationConfig) -> Result<(), EngineError> {
    if !(params.duration.is_finite() && params.duration > 0.0) {
        return Err(EngineError::invalid(
            "duration",
            params.duration,
            "must be positive and finite",
        ));
    }
    if !(params.time_interval.is_finite() && params.time_interval > 0.0) {
        return Err(EngineError::invalid(
            "time_interval",
            params.time_interval,
            "must be positive and finite",
        ));
    }
    if params.time_interval > params.duration {
        return Err(EngineError::invalid(
            "time_interval",
            params.time_interval,
            format!("must not exceed the duration of {} h", params.duration),
        ));
    }
    if params.initial_cells == 0 {
        return Err(EngineError::invalid(
            "initial_cells",
            params.initial_cells,
            "at least one cell is required",
        ));
    }
    if params.initial_cells > config.max_population as u64 {
        return Err(EngineError::invalid(
            "initial_cells",
            params.initial_cells,
            format!("exceeds the population limit of {}", config.max_population),
        ));
    }
    let steps = params.steps();
    if steps > config.max_steps {
        return Err(EngineError::invalid(
            "time_interval",
            params.time_interval,
            format!(
                "{steps} sampling steps exceed the limit of {}",
                config.max_steps
            ),
        ));
    }
    let integration_steps = steps as f64 * substeps_per_interval(params, config);
    if integration_steps > config.max_integration_steps as f64 {
        return Err(EngineError::invalid(
            "time_interval",
            params.time_interval,
            format!(
                "{integration_steps} integration substeps exceed the limit of {}",
                config.max_integration_steps
            ),
        ));
    }
    Ok(())
}

/// Substeps needed to keep each integration step within `max_substep`.
fn substeps_per_interval(params: &ExperimentParams, config: &SimulationConfig) -> f64 {
    (params.time_interval / config.max_substep).ceil().max(1.0)
}

fn validate_environment(env: &EnvironmentConditions) -> Result<(), EngineError> {
    if !env.temperature.is_finite() {
        return Err(EngineError::invalid(
            "temperature",
            env.temperature,
            "must be finite",
        ));
    }
    for (name, value) in [("co2", env.co2), ("humidity", env.humidity)] {
        if !(value.is_finite() && (0.0..=100.0).contains(&value)) {
            return Err(EngineError::invalid(name, value, "must be a percentage in [0, 100]"));
        }
    }
    Ok(())
}

/// Lazy form of a culture run, yielding one snapshot per sampling time.
///
/// The first item is the initial population at t = 0; each further item integrates one
/// sampling interval. After an error the iterator is exhausted.
pub struct CultureRun<'a> {
    context: CultureContext<'a>,
    state: CultureState,
    params: ExperimentParams,
    seed: u64,
    steps: u64,
    substeps: u64,
    next_index: u64,
    failed: bool,
}

impl<'a> CultureRun<'a> {
    /// Resolves and validates a request and seeds the initial population.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown cell line or drug class and
    /// [`EngineError::InvalidParameter`] for an unusable sampling plan or environment.
    pub fn new(
        catalog: &'a Catalog,
        request: &SimulationRequest,
        config: &'a SimulationConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Result<Self, EngineError> {
        let profile = catalog.cell_line(&request.cell_line_name)?;
        config.validate()?;
        let params = request.experiment_params;
        validate_params(&params, config)?;
        validate_environment(&request.environment)?;

        let context = CultureContext::new(
            profile,
            config,
            &request.environment,
            request.treatment.as_ref(),
            reporter,
        )?;
        let seed = simulation_seed(request, config);
        let substeps = substeps_per_interval(&params, config) as u64;

        debug!(
            growth_factor = context.environment.growth_factor,
            death_multiplier = context.environment.death_multiplier,
            drug_efficacy = context.treatment.efficacy,
            substeps,
            "Culture context resolved."
        );

        Ok(Self {
            state: CultureState::new(&context, params.initial_cells, seed),
            context,
            params,
            seed,
            steps: params.steps(),
            substeps,
            next_index: 0,
            failed: false,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Total number of snapshots the run produces.
    pub fn len(&self) -> usize {
        (self.steps + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn state(&self) -> &CultureState {
        &self.state
    }

    /// Rewinds to t = 0; the replay is identical to the first pass.
    pub fn restart(&mut self) {
        self.state = CultureState::new(&self.context, self.params.initial_cells, self.seed);
        self.next_index = 0;
        self.failed = false;
    }

    fn integrate_interval(&mut self) -> Result<(), EngineError> {
        let dt = self.params.time_interval / self.substeps as f64;
        for _ in 0..self.substeps {
            tasks::metabolism::run(&self.context, &mut self.state, dt);
            tasks::mortality::run(&self.context, &mut self.state, dt)?;
            tasks::cell_cycle::run(&self.context, &mut self.state, dt);
        }
        Ok(())
    }
}

impl Iterator for CultureRun<'_> {
    type Item = Result<PopulationSnapshot, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_index > self.steps {
            return None;
        }
        if self.next_index > 0 {
            if let Err(e) = self.integrate_interval() {
                self.failed = true;
                return Some(Err(e));
            }
        }
        let time = self.next_index as f64 * self.params.time_interval;
        self.state.set_time(time.min(self.params.duration));
        self.next_index += 1;

        let snapshot = self.state.snapshot(&self.context);
        self.context.reporter.report(Progress::Sampled {
            time: snapshot.time,
            total: snapshot.total,
            viable: snapshot.viable,
        });
        self.context.reporter.report(Progress::TaskIncrement);
        Some(Ok(snapshot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.failed {
            0
        } else {
            (self.steps + 1).saturating_sub(self.next_index) as usize
        };
        (0, Some(remaining))
    }
}

/// Simulates a cell culture and returns its full time series.
///
/// # Arguments
///
/// * `catalog` - Reference tables used to resolve the cell line.
/// * `request` - Cell line, sampling plan, environment and optional treatment.
/// * `config` - Run limits and model parameters.
/// * `reporter` - Receives one event per recorded snapshot.
///
/// # Return
///
/// `steps + 1` snapshots at `0, interval, 2·interval, …`; the first one is the initial
/// population verbatim.
#[instrument(skip_all, name = "simulation_workflow", fields(cell_line = %request.cell_line_name))]
pub fn run(
    catalog: &Catalog,
    request: &SimulationRequest,
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<CellSimulationResult, EngineError> {
    let culture = CultureRun::new(catalog, request, config, reporter)?;
    let seed = culture.seed();
    info!(
        seed,
        snapshots = culture.len(),
        initial_cells = request.experiment_params.initial_cells,
        "Starting culture simulation."
    );

    reporter.report(Progress::PhaseStart {
        name: "Culture Simulation",
    });
    reporter.report(Progress::TaskStart {
        total_steps: culture.len() as u64,
    });
    let snapshots = culture.collect::<Result<Vec<_>, _>>()?;
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    if let Some(last) = snapshots.last() {
        info!(
            total = last.total,
            viable = last.viable,
            viability = last.viability,
            "Culture simulation complete."
        );
    }

    Ok(CellSimulationResult {
        cell_line: request.cell_line_name.clone(),
        seed,
        snapshots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::EntityKind;
    use crate::engine::config::SimulationConfigBuilder;

    fn params(initial_cells: u64, duration: f64, time_interval: f64) -> ExperimentParams {
        ExperimentParams {
            initial_cells,
            duration,
            time_interval,
        }
    }

    fn simulate(request: &SimulationRequest) -> Result<CellSimulationResult, EngineError> {
        run(
            &Catalog::builtin(),
            request,
            &SimulationConfig::default(),
            &ProgressReporter::new(),
        )
    }

    #[test]
    fn hela_reference_run_has_145_snapshots_starting_from_initial_conditions() {
        let result = simulate(&SimulationRequest::new("HeLa", params(50, 72.0, 0.5))).unwrap();

        assert_eq!(result.snapshots.len(), 145);
        let first = &result.snapshots[0];
        assert_eq!(first.time, 0.0);
        assert_eq!(first.total, 50);
        assert_eq!(first.viable, 50);
        assert_eq!(first.viability, 100.0);
        assert_eq!(result.snapshots[144].time, 72.0);
    }

    #[test]
    fn snapshots_are_evenly_spaced_and_counts_are_consistent() {
        let result = simulate(&SimulationRequest::new("MCF-7", params(40, 48.0, 1.5))).unwrap();

        assert_eq!(result.snapshots.len(), 33);
        for (k, snapshot) in result.snapshots.iter().enumerate() {
            assert_eq!(snapshot.time, k as f64 * 1.5);
            assert!(snapshot.viable <= snapshot.total);
            assert!((0.0..=100.0).contains(&snapshot.viability));
            let phases = snapshot.phases.unwrap();
            assert_eq!(phases.total(), snapshot.viable);
        }
        for pair in result.snapshots.windows(2) {
            assert!(pair[1].total >= pair[0].total);
        }
    }

    #[test]
    fn nominal_culture_grows_by_roughly_its_doubling_time() {
        let result = simulate(&SimulationRequest::new("HeLa", params(200, 48.0, 1.0))).unwrap();
        let last = result.final_snapshot().unwrap();
        // two doublings, slowed slightly by contact inhibition and deaths
        assert!(last.total > 500 && last.total < 900, "total = {}", last.total);
        assert!(last.viability > 90.0);
    }

    #[test]
    fn final_snapshot_time_never_exceeds_duration() {
        let result = simulate(&SimulationRequest::new("HeLa", params(20, 0.3, 0.1))).unwrap();

        assert_eq!(result.snapshots.len(), 4);
        assert_eq!(result.final_snapshot().unwrap().time, 0.3);
        assert!(result.snapshots.iter().all(|s| s.time <= 0.3));
    }

    #[test]
    fn identical_requests_reproduce_identical_series() {
        let request = SimulationRequest::new("A549", params(30, 24.0, 0.5));
        assert_eq!(simulate(&request).unwrap(), simulate(&request).unwrap());
    }

    #[test]
    fn culture_run_restarts_identically() {
        let catalog = Catalog::builtin();
        let config = SimulationConfig::default();
        let reporter = ProgressReporter::new();
        let request = SimulationRequest::new("HEK293", params(25, 12.0, 0.5));
        let mut culture = CultureRun::new(&catalog, &request, &config, &reporter).unwrap();

        assert_eq!(culture.len(), 25);
        let first: Vec<_> = culture.by_ref().map(Result::unwrap).collect();
        assert!(culture.next().is_none());
        culture.restart();
        let second: Vec<_> = culture.map(Result::unwrap).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn hostile_environment_lowers_viability_without_resurrection() {
        let nominal = simulate(&SimulationRequest::new("HeLa", params(100, 48.0, 1.0))).unwrap();
        let hot = simulate(
            &SimulationRequest::new("HeLa", params(100, 48.0, 1.0)).with_environment(
                EnvironmentConditions {
                    temperature: 44.0,
                    ..Default::default()
                },
            ),
        )
        .unwrap();

        let nominal_last = nominal.final_snapshot().unwrap();
        let hot_last = hot.final_snapshot().unwrap();
        assert!(hot_last.viability < nominal_last.viability);
        assert_eq!(hot_last.total, 100);
        for pair in hot.snapshots.windows(2) {
            assert!(pair[1].viable <= pair[0].viable);
        }
    }

    #[test]
    fn drug_treatment_reduces_viable_population() {
        let untreated = simulate(&SimulationRequest::new("HeLa", params(100, 48.0, 1.0))).unwrap();
        let treated = simulate(
            &SimulationRequest::new("HeLa", params(100, 48.0, 1.0))
                .with_treatment(Treatment::new("doxorubicin", 20.0)),
        )
        .unwrap();
        assert!(
            treated.final_snapshot().unwrap().viable < untreated.final_snapshot().unwrap().viable
        );
    }

    #[test]
    fn unknown_cell_line_is_not_found() {
        let err = simulate(&SimulationRequest::new("XYZ", params(50, 72.0, 0.5))).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { kind: EntityKind::CellLine, ref id } if id == "XYZ"));
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn unknown_drug_class_is_not_found() {
        let err = simulate(
            &SimulationRequest::new("HeLa", params(50, 24.0, 1.0))
                .with_treatment(Treatment::new("aspirin", 1.0)),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { kind: EntityKind::DrugClass, .. }));
    }

    #[test]
    fn invalid_sampling_plans_are_rejected() {
        let cases = [
            (params(50, 0.0, 0.5), "duration"),
            (params(50, f64::NAN, 0.5), "duration"),
            (params(50, 72.0, 0.0), "time_interval"),
            (params(50, 72.0, -1.0), "time_interval"),
            (params(50, 1.0, 2.0), "time_interval"),
            (params(0, 72.0, 0.5), "initial_cells"),
            (params(50_000, 72.0, 0.5), "initial_cells"),
            (params(50, 10_000.0, 0.5), "time_interval"),
            (params(50, 1e7, 1e7), "time_interval"),
            (params(50, 6_000.0, 6.0), "time_interval"),
        ];
        for (p, expected) in cases {
            match simulate(&SimulationRequest::new("HeLa", p)).unwrap_err() {
                EngineError::InvalidParameter { name, .. } => assert_eq!(name, expected),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn invalid_environment_is_rejected() {
        let err = simulate(
            &SimulationRequest::new("HeLa", params(50, 24.0, 1.0)).with_environment(
                EnvironmentConditions {
                    humidity: 140.0,
                    ..Default::default()
                },
            ),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { name: "humidity", .. }));
    }

    #[test]
    fn recording_can_be_switched_off() {
        let config = SimulationConfigBuilder::new()
            .record_metabolism(false)
            .record_phases(false)
            .build()
            .unwrap();
        let result = run(
            &Catalog::builtin(),
            &SimulationRequest::new("HeLa", params(10, 4.0, 1.0)),
            &config,
            &ProgressReporter::new(),
        )
        .unwrap();
        assert!(result.snapshots.iter().all(|s| s.metabolism.is_none() && s.phases.is_none()));
    }

    #[test]
    fn request_parses_from_client_json() {
        let json = r#"{
            "cellLineName": "HeLa",
            "experimentParams": {"initialCells": 50, "duration": 72, "timeInterval": 0.5},
            "environment": {"temperature": 37, "co2": 5, "humidity": 95}
        }"#;
        let request: SimulationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.experiment_params.steps(), 144);
        assert!(request.treatment.is_none());
    }
}
