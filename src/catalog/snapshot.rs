use super::{Endpoint, EndpointCatalog};
use crate::error::CatalogError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// An offline copy of the endpoint catalog, stored in bincode format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    /// Base URL of the API the catalog was fetched from.
    pub source: String,
    pub endpoints: Vec<Endpoint>,
}

impl CatalogSnapshot {
    pub fn new(source: &str, catalog: &EndpointCatalog) -> Self {
        Self {
            source: source.to_string(),
            endpoints: catalog.endpoints.clone(),
        }
    }

    pub fn into_catalog(self) -> EndpointCatalog {
        EndpointCatalog::new(self.endpoints)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CatalogError> {
        encode_to_vec(self, standard())
            .map_err(|e| CatalogError::Snapshot(format!("Serialization failed: {}", e)))
    }

    /// Writes the snapshot to `path` in bincode format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes()?).map_err(|e| CatalogError::io(path, e))?;
        info!(endpoints = self.endpoints.len(), path = %path.display(), "Saved catalog snapshot");
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| CatalogError::io(path, e))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CatalogError> {
        decode_from_slice(bytes, standard())
            .map(|(snapshot, _)| snapshot)
            .map_err(|e| CatalogError::Snapshot(format!("Deserialization failed: {}", e)))
    }
}
