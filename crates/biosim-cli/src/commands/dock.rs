use super::{Session, ensure_format, run_engine};
use crate::cli::{DockArgs, GlobalArgs, OutputFormat};
use crate::config::CliOverrides;
use crate::error::Result;
use crate::utils::output::{Table, emit_json, emit_text};
use biosim::core::docking::pose::DockingResult;
use biosim::workflows::dock::{self, DockingRequest};
use tracing::info;

pub async fn run(args: DockArgs, global: GlobalArgs) -> Result<()> {
    ensure_format(global.format, "dock")?;
    let Session { catalog, config } = Session::load(&global, CliOverrides { seed: args.seed })?;

    let mut request = DockingRequest::new(args.protein, args.ligand);
    if let Some(num_modes) = args.num_modes {
        request = request.with_num_modes(num_modes);
    }

    info!("Invoking the docking workflow...");
    let result = run_engine(move |reporter| {
        dock::run(&catalog, &request, &config.docking, reporter)
    })
    .await?;
    info!(
        modes = result.modes.len(),
        best_affinity = result.best_affinity,
        "Docking finished."
    );

    match global.format {
        OutputFormat::Table => emit_text(&render_table(&result), global.output.as_deref()),
        _ => emit_json(&result, global.output.as_deref()),
    }
}

fn render_table(result: &DockingResult) -> String {
    let mut table = Table::new([
        "mode",
        "affinity",
        "population",
        "rmsd l.b.",
        "rmsd u.b.",
        "h-bonds",
        "hydrophobic",
        "pi-stacking",
    ]);
    for mode in &result.modes {
        table.push_row(vec![
            mode.mode.to_string(),
            format!("{:.3}", mode.affinity),
            format!("{:.4}", mode.population),
            format!("{:.2}", mode.rmsd_lower_bound),
            format!("{:.2}", mode.rmsd_upper_bound),
            mode.fingerprint.hydrogen_bonds.to_string(),
            mode.fingerprint.hydrophobic_contacts.to_string(),
            mode.fingerprint.pi_stacking.to_string(),
        ]);
    }
    format!(
        "{} + {} (seed {}, best affinity {:.3} kcal/mol)\n\n{}",
        result.protein_id,
        result.ligand_id,
        result.seed,
        result.best_affinity,
        table.render()
    )
}
