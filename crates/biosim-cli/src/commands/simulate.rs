use super::{Session, ensure_format, run_engine};
use crate::cli::{GlobalArgs, OutputFormat, SimulateArgs};
use crate::config::CliOverrides;
use crate::error::Result;
use crate::utils::output::{Table, emit_json, emit_text, open_output};
use biosim::core::dynamics::environment::EnvironmentConditions;
use biosim::core::dynamics::experiment::{ExperimentParams, Treatment};
use biosim::core::dynamics::snapshot::CellSimulationResult;
use biosim::core::io::timeseries::write_snapshots_csv;
use biosim::workflows::simulate::{self, SimulationRequest};
use std::io::Write;
use tracing::info;

fn build_request(args: SimulateArgs) -> SimulationRequest {
    let defaults = EnvironmentConditions::default();
    let environment = EnvironmentConditions {
        temperature: args.temperature.unwrap_or(defaults.temperature),
        co2: args.co2.unwrap_or(defaults.co2),
        humidity: args.humidity.unwrap_or(defaults.humidity),
    };
    let params = ExperimentParams {
        initial_cells: args.initial_cells,
        duration: args.duration,
        time_interval: args.interval,
    };
    let request = SimulationRequest::new(args.cell_line, params).with_environment(environment);
    match (args.drug, args.concentration) {
        (Some(drug), Some(concentration)) => {
            request.with_treatment(Treatment::new(drug, concentration))
        }
        _ => request,
    }
}

pub async fn run(args: SimulateArgs, global: GlobalArgs) -> Result<()> {
    ensure_format(global.format, "simulate")?;
    let Session { catalog, config } = Session::load(&global, CliOverrides { seed: args.seed })?;
    let request = build_request(args);

    info!("Invoking the culture simulation workflow...");
    let result = run_engine(move |reporter| {
        simulate::run(&catalog, &request, &config.simulation, reporter)
    })
    .await?;

    if let Some(last) = result.final_snapshot() {
        info!(
            snapshots = result.snapshots.len(),
            viable = last.viable,
            viability = last.viability,
            "Culture simulation finished."
        );
    }

    let output = global.output.as_deref();
    match global.format {
        OutputFormat::Json => emit_json(&result, output),
        OutputFormat::Table => emit_text(&render_table(&result), output),
        OutputFormat::Csv => {
            let mut writer = open_output(output)?;
            write_snapshots_csv(&result.snapshots, &mut writer)?;
            writer.flush()?;
            Ok(())
        }
    }
}

fn render_table(result: &CellSimulationResult) -> String {
    let mut table = Table::new(["time (h)", "total", "viable", "viability %", "atp", "glucose (mM)"]);
    for snapshot in &result.snapshots {
        let (atp, glucose) = snapshot.metabolism.map_or_else(
            || ("-".to_string(), "-".to_string()),
            |m| (format!("{:.3}", m.atp), format!("{:.3}", m.glucose)),
        );
        table.push_row(vec![
            format!("{:.2}", snapshot.time),
            snapshot.total.to_string(),
            snapshot.viable.to_string(),
            format!("{:.2}", snapshot.viability),
            atp,
            glucose,
        ]);
    }
    format!(
        "{} (seed {}, {} snapshots)\n\n{}",
        result.cell_line,
        result.seed,
        result.snapshots.len(),
        table.render()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SimulateArgs {
        SimulateArgs {
            cell_line: "HeLa".to_string(),
            initial_cells: 50,
            duration: 72.0,
            interval: 0.5,
            temperature: None,
            co2: Some(7.5),
            humidity: None,
            drug: None,
            concentration: None,
            seed: None,
        }
    }

    #[test]
    fn unset_conditions_fall_back_to_nominal_incubator() {
        let request = build_request(args());
        assert_eq!(request.environment.temperature, 37.0);
        assert_eq!(request.environment.co2, 7.5);
        assert_eq!(request.environment.humidity, 95.0);
        assert_eq!(request.experiment_params.initial_cells, 50);
        assert!(request.treatment.is_none());
    }

    #[test]
    fn drug_and_concentration_form_a_treatment() {
        let mut args = args();
        args.drug = Some("doxorubicin".to_string());
        args.concentration = Some(0.5);
        let treatment = build_request(args).treatment.unwrap();
        assert_eq!(treatment.drug_class, "doxorubicin");
        assert_eq!(treatment.concentration, 0.5);
    }

    #[test]
    fn table_starts_with_initial_population() {
        let result = CellSimulationResult {
            cell_line: "HeLa".to_string(),
            seed: 7,
            snapshots: vec![biosim::core::dynamics::snapshot::PopulationSnapshot {
                time: 0.0,
                total: 50,
                viable: 50,
                viability: 100.0,
                metabolism: None,
                phases: None,
            }],
        };
        let rendered = render_table(&result);
        assert!(rendered.starts_with("HeLa (seed 7, 1 snapshots)"));
        let row = rendered.lines().last().unwrap();
        assert!(row.contains("0.00"));
        assert!(row.contains("100.00"));
        assert!(row.trim_end().ends_with('-'));
    }
}
