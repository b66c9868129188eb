//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need to build a graph, infer schemas and
//! run nodes.
//!
//! ```rust,no_run
//! use otoyai::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/catalog.json")?;
//! let catalog = EndpointCatalog::from_json(&json)?;
//! for endpoint in catalog.iter() {
//!     let schema = infer_schema(endpoint);
//!     println!("{}: {} inputs", endpoint.title, schema.inputs.len());
//! }
//! # Ok(())
//! # }
//! ```

// Catalog and schemas
pub use crate::catalog::{CatalogSnapshot, Endpoint, EndpointCatalog};
pub use crate::schema::{
    EndpointSchema, InputParameter, InputType, OutputType, SchemaInference, infer_schema,
};

// Graph model
pub use crate::graph::{
    Connection, GraphAction, GraphEdge, GraphNode, GraphState, GraphStore, MediaItem, NodeKind,
    Position,
};
pub use crate::validation::{HandleType, are_types_compatible, is_valid_connection};

// Parameters
pub use crate::packaging::package_parameters;
pub use crate::resolver::{gather_connected_values, resolve_connected_parameters};
pub use crate::value::{MediaFile, ParamValue, ParameterMap};

// Execution and persistence
pub use crate::config::ClientConfig;
pub use crate::execution::{ApiClient, ExecutionClient, ExecutionStatus, execute_node};
pub use crate::project::Project;

// Error types
pub use crate::error::{ExecutionError, GraphError, PackagingError, PackagingErrors};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
