//! # Otoyai - Node Graphs for Generative-AI Endpoints
//!
//! **Otoyai** is the data and connection model behind a node-based editor for
//! chaining generative-AI endpoints. Endpoints become nodes on a canvas, typed
//! pins are wired together, and running a node packages its inputs into the
//! payload the remote endpoint expects.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Catalog**: Fetch endpoint descriptors with [`execution::ApiClient::fetch_endpoints`],
//!     or load an offline [`catalog::CatalogSnapshot`].
//! 2.  **Infer Schemas**: [`schema::infer_schema`] derives typed inputs and an output from an
//!     endpoint's category and title. Schemas are recomputed on demand and never cached.
//! 3.  **Edit the Graph**: Dispatch [`graph::GraphAction`]s to a [`graph::GraphStore`]. Connections are
//!     type-checked by the [`validation`] rules and a target pin never holds more than one edge.
//! 4.  **Execute**: [`execution::execute_node`] resolves connected values over local parameters,
//!     packages them, calls the execution API and writes the outcome back onto the node.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use otoyai::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ApiClient::new(ClientConfig::from_env()?)?;
//!     let catalog = client.fetch_endpoints().await?;
//!
//!     let store = GraphStore::new();
//!     let prompt = GraphNode::text_input("a lighthouse at dusk", Position::new(0.0, 0.0));
//!     let endpoint = catalog.get("fal-ai/flux/dev").cloned().ok_or("unknown endpoint")?;
//!     let flux = GraphNode::ai_endpoint(endpoint, Position::new(300.0, 0.0));
//!
//!     let (prompt_id, flux_id) = (prompt.id.clone(), flux.id.clone());
//!     store.dispatch(GraphAction::AddNode(prompt))?;
//!     store.dispatch(GraphAction::AddNode(flux))?;
//!     store.connect(Connection::new(&prompt_id, "output", &flux_id, "input-prompt"));
//!
//!     let result = execute_node(&store, &client, &flux_id).await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod execution;
pub mod graph;
pub mod packaging;
pub mod prelude;
pub mod project;
pub mod resolver;
pub mod schema;
pub mod validation;
pub mod value;
