use serde::{Deserialize, Serialize};

/// A remote AI capability as described by the endpoint catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Endpoint {
    /// The category tag that drives schema inference. Empty when untagged.
    pub fn primary_category(&self) -> &str {
        self.category.first().map(String::as_str).unwrap_or("")
    }
}
