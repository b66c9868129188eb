mod endpoint;
mod snapshot;

pub use endpoint::Endpoint;
pub use snapshot::CatalogSnapshot;

use serde::{Deserialize, Serialize};

/// Read-only view over the endpoints returned by the catalog API.
///
/// The catalog is a snapshot: it is replaced wholesale on refresh and never
/// mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointCatalog {
    pub endpoints: Vec<Endpoint>,
}

impl EndpointCatalog {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Parses the `{ "endpoints": [...] }` body of the catalog API.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Endpoints whose primary category matches `category` exactly.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Endpoint> {
        self.endpoints
            .iter()
            .filter(move |e| e.primary_category() == category)
    }

    pub fn by_vendor<'a>(&'a self, vendor: &'a str) -> impl Iterator<Item = &'a Endpoint> {
        self.endpoints
            .iter()
            .filter(move |e| e.vendor.eq_ignore_ascii_case(vendor))
    }
}
