//! One module per subcommand. Engine work runs on tokio's blocking pool so that the
//! progress bar keeps drawing while rayon does the heavy lifting.

pub mod catalog;
pub mod dock;
pub mod predict;
pub mod simulate;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::{AppConfig, CliOverrides, build_config};
use crate::data::CatalogManager;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use biosim::core::catalog::Catalog;
use biosim::engine::error::EngineError;
use biosim::engine::progress::ProgressReporter;
use tokio::task;
use tracing::info;

/// Catalog and merged configuration for one engine invocation.
pub struct Session {
    pub catalog: Catalog,
    pub config: AppConfig,
}

impl Session {
    pub fn load(global: &GlobalArgs, overrides: CliOverrides) -> Result<Self> {
        info!("Resolving catalog...");
        let catalog = CatalogManager::new()?.load_catalog(global.catalog.as_deref())?;
        info!("Merging configuration from defaults, file and CLI arguments...");
        let config = build_config(global.config.as_deref(), &global.set_values, &overrides)?;
        Ok(Self { catalog, config })
    }
}

/// Rejects output formats a command cannot produce before any work is done.
pub fn ensure_format(format: OutputFormat, command: &str) -> Result<()> {
    if format == OutputFormat::Csv && command != "simulate" {
        return Err(CliError::Argument(format!(
            "CSV output is only available for 'simulate', not '{}'",
            command
        )));
    }
    Ok(())
}

/// Runs an engine job on the blocking pool with a progress bar attached.
pub async fn run_engine<T, F>(job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&ProgressReporter<'static>) -> std::result::Result<T, EngineError> + Send + 'static,
{
    let handler = CliProgressHandler::new();
    let callback = handler.get_callback();
    let outcome = task::spawn_blocking(move || {
        let reporter = ProgressReporter::with_callback(callback);
        job(&reporter)
    })
    .await
    .map_err(|e| CliError::Other(anyhow::anyhow!("Engine task failed: {}", e)))?;
    handler.clear();
    Ok(outcome?)
}
