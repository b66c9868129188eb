use super::{Connection, GraphNode, MediaItem, Position};
use crate::value::ParamValue;

/// A single user- or engine-initiated change to the graph.
///
/// Actions are the only way state changes: each one is applied
/// copy-on-write to produce the next snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphAction {
    AddNode(GraphNode),
    RemoveNode {
        node_id: String,
    },
    MoveNode {
        node_id: String,
        position: Position,
    },
    SelectNode {
        node_id: String,
        selected: bool,
    },
    SetParameter {
        node_id: String,
        name: String,
        value: ParamValue,
    },
    ClearParameter {
        node_id: String,
        name: String,
    },
    SelectPin {
        node_id: String,
        pin: String,
    },
    SetText {
        node_id: String,
        value: String,
    },
    AddMediaItem {
        node_id: String,
        item: MediaItem,
    },
    RemoveMediaItem {
        node_id: String,
        item_id: String,
    },
    Connect(Connection),
    Reconnect {
        edge_id: String,
        connection: Connection,
    },
    RemoveEdge {
        edge_id: String,
    },
    BeginExecution {
        node_id: String,
    },
    CompleteExecution {
        node_id: String,
        result: serde_json::Value,
    },
    FailExecution {
        node_id: String,
        error: String,
    },
    ResetExecution {
        node_id: String,
    },
}

impl GraphAction {
    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            GraphAction::AddNode(_) => "add_node",
            GraphAction::RemoveNode { .. } => "remove_node",
            GraphAction::MoveNode { .. } => "move_node",
            GraphAction::SelectNode { .. } => "select_node",
            GraphAction::SetParameter { .. } => "set_parameter",
            GraphAction::ClearParameter { .. } => "clear_parameter",
            GraphAction::SelectPin { .. } => "select_pin",
            GraphAction::SetText { .. } => "set_text",
            GraphAction::AddMediaItem { .. } => "add_media_item",
            GraphAction::RemoveMediaItem { .. } => "remove_media_item",
            GraphAction::Connect(_) => "connect",
            GraphAction::Reconnect { .. } => "reconnect",
            GraphAction::RemoveEdge { .. } => "remove_edge",
            GraphAction::BeginExecution { .. } => "begin_execution",
            GraphAction::CompleteExecution { .. } => "complete_execution",
            GraphAction::FailExecution { .. } => "fail_execution",
            GraphAction::ResetExecution { .. } => "reset_execution",
        }
    }
}
