use crate::validation::HandleType;
use itertools::Itertools;
use std::path::Path;
use thiserror::Error;

/// Errors raised while mutating or loading graph state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' not found in the graph")]
    NodeNotFound(String),

    #[error("A node with id '{0}' already exists in the graph")]
    DuplicateNode(String),

    #[error("Edge '{0}' not found in the graph")]
    EdgeNotFound(String),

    #[error("Node '{node_id}' is a {actual} node, but the action requires a {expected} node")]
    WrongNodeKind {
        node_id: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error(
        "Connection from '{source_node}' ({source_handle}) to '{target_node}' ({target_handle}) was rejected: {source_type} is not compatible with {target_type}"
    )]
    ConnectionRejected {
        source_node: String,
        source_handle: String,
        target_node: String,
        target_handle: String,
        source_type: HandleType,
        target_type: HandleType,
    },

    #[error("Node '{0}' is already executing")]
    AlreadyExecuting(String),

    #[error("Node '{0}' is not executing")]
    NotExecuting(String),

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),
}

/// A single parameter that failed to package.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackagingError {
    #[error("Required parameter \"{0}\" is missing")]
    MissingRequired(String),

    #[error("Parameter \"{name}\" must be an integer, got {value}")]
    NotAnInteger { name: String, value: String },

    #[error("Parameter \"{name}\" must be a number, got {value}")]
    NotANumber { name: String, value: String },

    #[error("Parameter \"{name}\" must be at least {min}, got {value}")]
    BelowMinimum { name: String, min: f64, value: f64 },

    #[error("Parameter \"{name}\" must be at most {max}, got {value}")]
    AboveMaximum { name: String, max: f64, value: f64 },

    #[error("Parameter \"{name}\" must be one of [{}], got \"{value}\"", .options.join(", "))]
    InvalidOption {
        name: String,
        value: String,
        options: Vec<String>,
    },

    #[error("Parameter \"{name}\": {kind} value must be a URL, File, or base64 string")]
    InvalidMedia { name: String, kind: &'static str },

    #[error("Parameter \"{name}\": failed to read media file: {reason}")]
    UnreadableMedia { name: String, reason: String },
}

impl PackagingError {
    /// The name of the parameter that failed.
    pub fn parameter(&self) -> &str {
        match self {
            PackagingError::MissingRequired(name) => name,
            PackagingError::NotAnInteger { name, .. }
            | PackagingError::NotANumber { name, .. }
            | PackagingError::BelowMinimum { name, .. }
            | PackagingError::AboveMaximum { name, .. }
            | PackagingError::InvalidOption { name, .. }
            | PackagingError::InvalidMedia { name, .. }
            | PackagingError::UnreadableMedia { name, .. } => name,
        }
    }
}

/// Every parameter failure of one packaging run, in schema order.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", .0.iter().join("; "))]
pub struct PackagingErrors(pub Vec<PackagingError>);

impl PackagingErrors {
    pub fn errors(&self) -> &[PackagingError] {
        &self.0
    }

    /// The first failure in schema order.
    pub fn first(&self) -> Option<&PackagingError> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Errors from running an AI endpoint node.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Node '{0}' is already executing")]
    AlreadyExecuting(String),

    #[error("Parameter packaging failed: {0}")]
    Packaging(#[from] PackagingErrors),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Execution API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Endpoint reported a failure: {0}")]
    Remote(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors from fetching or loading the endpoint catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Catalog API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Could not access snapshot file '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Catalog snapshot error: {0}")]
    Snapshot(String),
}

impl CatalogError {
    pub(crate) fn io(path: &Path, e: std::io::Error) -> Self {
        let (path, reason) = io_context(path, e);
        CatalogError::Io { path, reason }
    }
}

/// Errors from saving or loading a project snapshot.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Could not access project file '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse project JSON: {0}")]
    JsonParseError(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ProjectError {
    pub(crate) fn io(path: &Path, e: std::io::Error) -> Self {
        let (path, reason) = io_context(path, e);
        ProjectError::Io { path, reason }
    }
}

/// Path and reason carried by the `Io` variants above.
fn io_context(path: &Path, e: std::io::Error) -> (String, String) {
    (path.display().to_string(), e.to_string())
}

/// Errors from reading configuration out of the environment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Environment variable {name} has an invalid value '{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}
