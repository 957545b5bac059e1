use super::{Session, ensure_format, run_engine};
use crate::cli::{GlobalArgs, OutputFormat, PredictArgs};
use crate::config::CliOverrides;
use crate::error::Result;
use crate::utils::output::{Table, emit_json, emit_text};
use biosim::core::response::DoseResponsePrediction;
use biosim::workflows::predict::{self, DrugEfficacyRequest};
use tracing::info;

/// `--curve` spans this factor below and above the requested concentration.
const CURVE_HALF_SPAN: f64 = 100.0;

pub async fn run(args: PredictArgs, global: GlobalArgs) -> Result<()> {
    ensure_format(global.format, "predict")?;
    let Session { catalog, config } = Session::load(&global, CliOverrides::default())?;

    let predictions = if args.curve {
        let range = (
            args.concentration / CURVE_HALF_SPAN,
            args.concentration * CURVE_HALF_SPAN,
        );
        info!(?range, points = args.points, "Evaluating dose-response curve...");
        run_engine(move |_| {
            predict::curve(
                &catalog,
                &args.cell_line,
                &args.drug,
                range,
                args.points,
                &config.dose_response,
            )
        })
        .await?
    } else {
        let request = DrugEfficacyRequest::new(args.cell_line, args.drug, args.concentration);
        let prediction = predict::run(&catalog, &request, &config.dose_response)?;
        vec![prediction]
    };

    let output = global.output.as_deref();
    match (global.format, predictions.as_slice()) {
        (OutputFormat::Table, _) => emit_text(&render_table(&predictions), output),
        (_, [single]) if !args.curve => emit_json(single, output),
        _ => emit_json(&predictions, output),
    }
}

fn render_table(predictions: &[DoseResponsePrediction]) -> String {
    let mut table = Table::new(["concentration (µM)", "efficacy %", "viability %"]);
    for p in predictions {
        table.push_row(vec![
            format!("{:.4}", p.concentration),
            format!("{:.2}", p.efficacy),
            format!("{:.2}", p.viability),
        ]);
    }
    match predictions.first() {
        Some(first) => format!(
            "{} / {} (IC50 {} µM, Hill {})\n\n{}",
            first.cell_line,
            first.drug_class,
            first.ic50,
            first.hill_coefficient,
            table.render()
        ),
        None => table.render(),
    }
}
