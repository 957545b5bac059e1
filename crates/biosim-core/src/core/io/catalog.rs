use super::traits::DataFile;
use crate::core::catalog::{Catalog, CatalogData, CatalogError};
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialise catalog TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// TOML catalog file with `[[proteins]]`, `[[ligands]]` and `[[cell_lines]]` tables.
pub struct CatalogToml;

impl DataFile for CatalogToml {
    type Record = Catalog;
    type Error = CatalogFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Catalog, CatalogFileError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let data: CatalogData = toml::from_str(&content)?;
        Ok(Catalog::from_data(data)?)
    }

    fn write_to(catalog: &Catalog, writer: &mut impl Write) -> Result<(), CatalogFileError> {
        let content = catalog.to_toml_string()?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Writes `catalog` to `path` as TOML, replacing any existing file.
pub fn write_catalog(catalog: &Catalog, path: impl AsRef<Path>) -> Result<(), CatalogFileError> {
    CatalogToml::write_to_path(catalog, path)
}
