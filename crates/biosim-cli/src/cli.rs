use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "BioSim CLI - Deterministic docking estimates, cell-culture simulation and dose-response prediction from a reference catalog.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

/// Options shared by every command that touches the catalog or the engines.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Catalog TOML file to use instead of the user or built-in catalog.
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Engine configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S docking.num-modes=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,

    /// Output format of the command result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Write the result to a file instead of standard output.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
    /// Only available for `simulate`.
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate the binding modes of a ligand in a protein target.
    Dock(DockArgs),
    /// Simulate a cell culture under given conditions and an optional drug treatment.
    Simulate(SimulateArgs),
    /// Predict the efficacy of a drug class against a cell line.
    Predict(PredictArgs),
    /// Inspect or export the reference catalog.
    Catalog(CatalogArgs),
}

/// Arguments for the `dock` subcommand.
#[derive(Args, Debug)]
pub struct DockArgs {
    /// PDB identifier of the protein target (e.g., 6LU7).
    #[arg(short, long, value_name = "ID")]
    pub protein: String,

    /// Identifier of the ligand (e.g., remdesivir).
    #[arg(short, long, value_name = "ID")]
    pub ligand: String,

    /// Number of binding modes to report.
    #[arg(short = 'n', long, value_name = "INT")]
    pub num_modes: Option<usize>,

    /// Override the input-derived random seed.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Name of the cell line (e.g., HeLa).
    #[arg(long, value_name = "NAME")]
    pub cell_line: String,

    /// Number of cells seeded at t = 0.
    #[arg(long, default_value_t = 50, value_name = "INT")]
    pub initial_cells: u64,

    /// Total simulated time in hours.
    #[arg(long, default_value_t = 72.0, value_name = "HOURS")]
    pub duration: f64,

    /// Sampling interval in hours.
    #[arg(long, default_value_t = 0.5, value_name = "HOURS")]
    pub interval: f64,

    /// Incubator temperature in °C.
    #[arg(long, value_name = "CELSIUS")]
    pub temperature: Option<f64>,

    /// CO2 fraction in %.
    #[arg(long, value_name = "PERCENT")]
    pub co2: Option<f64>,

    /// Relative humidity in %.
    #[arg(long, value_name = "PERCENT")]
    pub humidity: Option<f64>,

    /// Drug class applied for the whole run.
    #[arg(long, value_name = "CLASS", requires = "concentration")]
    pub drug: Option<String>,

    /// Drug concentration in µM.
    #[arg(long, value_name = "MICROMOLAR", requires = "drug")]
    pub concentration: Option<f64>,

    /// Override the input-derived random seed.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

/// Arguments for the `predict` subcommand.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Name of the cell line (e.g., MCF-7).
    #[arg(long, value_name = "NAME")]
    pub cell_line: String,

    /// Drug class looked up in the cell line's sensitivity table.
    #[arg(long, value_name = "CLASS")]
    pub drug: String,

    /// Drug concentration in µM.
    #[arg(long, value_name = "MICROMOLAR")]
    pub concentration: f64,

    /// Report a log-spaced curve spanning two decades around the concentration.
    #[arg(long)]
    pub curve: bool,

    /// Number of points on the curve.
    #[arg(long, default_value_t = 9, value_name = "INT", requires = "curve")]
    pub points: usize,
}

/// Arguments for the `catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List the entries of one catalog table.
    List {
        #[arg(value_enum)]
        kind: CatalogKind,
    },
    /// Show the absolute path of the user catalog file.
    Path,
    /// Write the built-in catalog to the user catalog file for editing.
    Export {
        /// Overwrite an existing user catalog.
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Proteins,
    Ligands,
    CellLines,
}
