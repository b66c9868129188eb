use serde::{Deserialize, Serialize};

/// A directed connection from a source handle to a target handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub source_handle: String,
    pub target: String,
    pub target_handle: String,
}

impl GraphEdge {
    pub fn from_connection(connection: &Connection) -> Self {
        Self {
            id: connection.edge_id(),
            source: connection.source.clone(),
            source_handle: connection.source_handle.clone(),
            target: connection.target.clone(),
            target_handle: connection.target_handle.clone(),
        }
    }

    pub fn targets(&self, node_id: &str, handle: &str) -> bool {
        self.target == node_id && self.target_handle == handle
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    pub fn connection(&self) -> Connection {
        Connection {
            source: self.source.clone(),
            source_handle: self.source_handle.clone(),
            target: self.target.clone(),
            target_handle: self.target_handle.clone(),
        }
    }
}

/// A prospective edge, before it has been validated and given an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: String,
    pub source_handle: String,
    pub target: String,
    pub target_handle: String,
}

impl Connection {
    pub fn new(source: &str, source_handle: &str, target: &str, target_handle: &str) -> Self {
        Self {
            source: source.to_string(),
            source_handle: source_handle.to_string(),
            target: target.to_string(),
            target_handle: target_handle.to_string(),
        }
    }

    /// Deterministic edge id in the node editor's format.
    pub fn edge_id(&self) -> String {
        format!(
            "reactflow__edge-{}{}-{}{}",
            self.source, self.source_handle, self.target, self.target_handle
        )
    }
}
