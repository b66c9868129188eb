//! Canvas graph: nodes, edges, the actions that change them, and the store
//! that owns the current snapshot.

mod action;
mod edge;
pub mod handle;
mod node;
mod state;
mod store;

pub use action::GraphAction;
pub use edge::{Connection, GraphEdge};
pub use node::{
    AiEndpointData, GraphNode, MediaItem, MediaNodeData, NodeKind, Position, TextInputData,
};
pub use state::GraphState;
pub use store::GraphStore;
