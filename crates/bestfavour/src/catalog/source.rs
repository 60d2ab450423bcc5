use std::path::PathBuf;

use super::domain::{seed_listings, Listing};
use super::import::{CatalogImportError, CatalogImporter};
use crate::config::CatalogConfig;

/// Where the listing set is fetched from when a listing page loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Seed,
    Csv(PathBuf),
}

impl CatalogSource {
    pub fn from_config(config: &CatalogConfig) -> Self {
        match &config.path {
            Some(path) => Self::Csv(path.clone()),
            None => Self::Seed,
        }
    }

    pub fn fetch(&self) -> Result<Vec<Listing>, CatalogImportError> {
        match self {
            Self::Seed => Ok(seed_listings()),
            Self::Csv(path) => CatalogImporter::from_path(path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Seed => "seed listings".to_string(),
            Self::Csv(path) => format!("CSV export {}", path.display()),
        }
    }
}
