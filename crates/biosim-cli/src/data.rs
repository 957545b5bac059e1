use crate::error::{CliError, Result};
use biosim::core::catalog::Catalog;
use biosim::core::io::catalog::write_catalog;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CATALOG_FILE_NAME: &str = "catalog.toml";

/// Where the catalog of an invocation came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Explicit(PathBuf),
    User(PathBuf),
    Builtin,
}

/// Locates and loads the reference catalog.
///
/// Resolution order: an explicit `--catalog` file, then the user catalog in the
/// platform data directory, then the built-in tables.
#[derive(Debug)]
pub struct CatalogManager {
    base_path: PathBuf,
}

impl CatalogManager {
    pub fn new() -> Result<Self> {
        let path = Self::get_default_data_path()?;
        debug!("CatalogManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    pub fn user_catalog_path(&self) -> PathBuf {
        self.base_path.join(CATALOG_FILE_NAME)
    }

    pub fn resolve_source(&self, explicit: Option<&Path>) -> CatalogSource {
        if let Some(path) = explicit {
            return CatalogSource::Explicit(path.to_path_buf());
        }
        let user = self.user_catalog_path();
        if user.is_file() {
            CatalogSource::User(user)
        } else {
            CatalogSource::Builtin
        }
    }

    pub fn load_catalog(&self, explicit: Option<&Path>) -> Result<Catalog> {
        match self.resolve_source(explicit) {
            CatalogSource::Explicit(path) | CatalogSource::User(path) => {
                info!("Loading catalog from {:?}", &path);
                Catalog::load(&path).map_err(|e| CliError::FileParsing {
                    path,
                    source: e.into(),
                })
            }
            CatalogSource::Builtin => {
                debug!("No catalog file found, using built-in tables.");
                Ok(Catalog::builtin())
            }
        }
    }

    /// Writes the built-in tables to the user catalog file.
    pub fn export_builtin(&self, force: bool) -> Result<PathBuf> {
        let path = self.user_catalog_path();
        if path.exists() && !force {
            return Err(CliError::Data(format!(
                "User catalog '{}' already exists. Use --force to overwrite.",
                path.display()
            )));
        }
        fs::create_dir_all(&self.base_path)?;
        write_catalog(&Catalog::builtin(), &path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?;
        info!("Built-in catalog written to {:?}", &path);
        Ok(path)
    }

    fn get_default_data_path() -> Result<PathBuf> {
        ProjectDirs::from("org", "biosim", "biosim")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}
