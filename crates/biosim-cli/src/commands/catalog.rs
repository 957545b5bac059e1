use crate::cli::{CatalogArgs, CatalogCommands, CatalogKind, GlobalArgs, OutputFormat};
use crate::data::{CatalogManager, CatalogSource};
use crate::error::Result;
use crate::utils::output::{Table, emit_json, emit_text};
use biosim::core::catalog::Catalog;
use tracing::info;

pub async fn run(args: CatalogArgs, global: GlobalArgs) -> Result<()> {
    super::ensure_format(global.format, "catalog")?;
    let manager = CatalogManager::new()?;
    let output = global.output.as_deref();

    match args.command {
        CatalogCommands::List { kind } => {
            let catalog = manager.load_catalog(global.catalog.as_deref())?;
            match global.format {
                OutputFormat::Table => emit_text(&render_table(&catalog, kind), output),
                _ => match kind {
                    CatalogKind::Proteins => {
                        emit_json(&catalog.proteins().collect::<Vec<_>>(), output)
                    }
                    CatalogKind::Ligands => {
                        emit_json(&catalog.ligands().collect::<Vec<_>>(), output)
                    }
                    CatalogKind::CellLines => {
                        emit_json(&catalog.cell_lines().collect::<Vec<_>>(), output)
                    }
                },
            }
        }
        CatalogCommands::Path => {
            let path = manager.user_catalog_path();
            let status = match manager.resolve_source(global.catalog.as_deref()) {
                CatalogSource::Explicit(explicit) => {
                    format!("overridden by --catalog {}", explicit.display())
                }
                CatalogSource::User(_) => "in use".to_string(),
                CatalogSource::Builtin => "not present, built-in tables in use".to_string(),
            };
            emit_text(&format!("{} ({})", path.display(), status), output)
        }
        CatalogCommands::Export { force } => {
            let path = manager.export_builtin(force)?;
            info!("Exported built-in catalog.");
            emit_text(
                &format!("✓ Built-in catalog written to: {}", path.display()),
                output,
            )
        }
    }
}

fn render_table(catalog: &Catalog, kind: CatalogKind) -> String {
    match kind {
        CatalogKind::Proteins => {
            let mut table = Table::new(["pdb id", "name", "organism", "resolution (Å)", "druggability"]);
            for p in catalog.proteins() {
                table.push_row(vec![
                    p.pdb_id.clone(),
                    p.name.clone(),
                    p.organism.clone(),
                    format!("{:.2}", p.resolution),
                    format!("{:.2}", p.druggability),
                ]);
            }
            table.render()
        }
        CatalogKind::Ligands => {
            let mut table = Table::new(["id", "name", "mw (g/mol)", "logP", "donors", "acceptors"]);
            for l in catalog.ligands() {
                table.push_row(vec![
                    l.id.clone(),
                    l.name.clone(),
                    format!("{:.2}", l.molecular_weight),
                    format!("{:.2}", l.log_p),
                    l.h_bond_donors.to_string(),
                    l.h_bond_acceptors.to_string(),
                ]);
            }
            table.render()
        }
        CatalogKind::CellLines => {
            let mut table = Table::new(["name", "type", "origin", "doubling (h)", "drug classes"]);
            for c in catalog.cell_lines() {
                table.push_row(vec![
                    c.name.clone(),
                    c.cell_type.to_string(),
                    c.origin.clone(),
                    format!("{:.1}", c.doubling_time),
                    c.drug_classes().collect::<Vec<_>>().join(","),
                ]);
            }
            table.render()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_have_one_row_per_entry() {
        let catalog = Catalog::builtin();
        let cases = [
            (CatalogKind::Proteins, catalog.proteins().count()),
            (CatalogKind::Ligands, catalog.ligands().count()),
            (CatalogKind::CellLines, catalog.cell_lines().count()),
        ];
        for (kind, entries) in cases {
            assert_eq!(render_table(&catalog, kind).lines().count(), 2 + entries);
        }
    }

    #[test]
    fn cell_line_table_lists_drug_classes() {
        let rendered = render_table(&Catalog::builtin(), CatalogKind::CellLines);
        let hela = rendered.lines().find(|l| l.contains("HeLa")).unwrap();
        assert!(hela.contains("doxorubicin"));
    }
}
