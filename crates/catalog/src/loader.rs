//! TOML catalog loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use subtrack_core::DomainError;

use crate::catalog::Catalog;
use crate::records::{CatalogItem, School, Store};

const BUILTIN_CATALOG: &str = include_str!("../catalog.toml");

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid catalog: {0}")]
    Invalid(#[from] DomainError),
}

/// On-disk shape of a catalog file.
///
/// Prices are strings (`unit_price = "3.60"`) so they never pass through a float.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    stores: Vec<Store>,
    #[serde(default)]
    schools: Vec<School>,
    #[serde(default)]
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogLoadError> {
        let file: CatalogFile = toml::from_str(contents)?;
        let catalog = Catalog::new(file.items, file.stores, file.schools)?;
        tracing::debug!(
            items = catalog.items().len(),
            stores = catalog.stores().len(),
            schools = catalog.schools().len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogLoadError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }
}

/// Load a catalog from `path`, or the built-in one when `path` is `None`.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    let Some(path) = path else {
        tracing::debug!("using built-in catalog");
        return Catalog::builtin();
    };

    tracing::debug!("loading catalog from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Catalog::from_toml_str(&contents)
}
