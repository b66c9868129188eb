use super::{
    AiEndpointData, Connection, GraphAction, GraphEdge, GraphNode, MediaItem, NodeKind, handle,
};
use crate::error::GraphError;
use crate::execution::ExecutionStatus;
use crate::validation::{self, HandleType};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// An immutable snapshot of the canvas: ordered nodes and directed edges.
///
/// Snapshots are never mutated in place. [`GraphState::apply`] builds the
/// next snapshot, or fails and leaves the current one untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphState {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from loaded parts, checking node id uniqueness, edge
    /// endpoints and that no target handle has more than one incoming edge.
    pub fn from_parts(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Result<Self, GraphError> {
        let mut ids = AHashSet::new();
        for node in &nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        let mut targets = AHashSet::new();
        for edge in &edges {
            for end in [&edge.source, &edge.target] {
                if !ids.contains(end.as_str()) {
                    return Err(GraphError::InvalidGraph(format!(
                        "edge '{}' references missing node '{}'",
                        edge.id, end
                    )));
                }
            }
            if !targets.insert((edge.target.as_str(), edge.target_handle.as_str())) {
                return Err(GraphError::InvalidGraph(format!(
                    "handle '{}' of node '{}' has more than one incoming edge",
                    edge.target_handle, edge.target
                )));
            }
        }

        Ok(Self { nodes, edges })
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// The edge feeding `handle_id` on `node_id`, if connected.
    pub fn incoming_edge(&self, node_id: &str, handle_id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.targets(node_id, handle_id))
    }

    pub fn outgoing_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    /// Type carried by `edge`, read from its source handle in this snapshot.
    pub fn edge_type(&self, edge: &GraphEdge) -> Option<HandleType> {
        self.node(&edge.source)
            .map(|source| validation::get_handle_type(source, &edge.source_handle, true))
    }

    pub fn edge_color(&self, edge: &GraphEdge) -> &'static str {
        self.edge_type(edge).unwrap_or(HandleType::Any).color()
    }

    /// Returns the snapshot that results from applying `action`.
    pub fn apply(&self, action: GraphAction) -> Result<GraphState, GraphError> {
        let mut next = self.clone();
        match action {
            GraphAction::AddNode(node) => {
                if next.node(&node.id).is_some() {
                    return Err(GraphError::DuplicateNode(node.id));
                }
                next.nodes.push(node);
            }
            GraphAction::RemoveNode { node_id } => {
                let before = next.nodes.len();
                next.nodes.retain(|n| n.id != node_id);
                if next.nodes.len() == before {
                    return Err(GraphError::NodeNotFound(node_id));
                }
                next.edges.retain(|e| !e.touches(&node_id));
            }
            GraphAction::MoveNode { node_id, position } => {
                next.node_mut(&node_id)?.position = position;
            }
            GraphAction::SelectNode { node_id, selected } => {
                next.node_mut(&node_id)?.selected = selected;
            }
            GraphAction::SetParameter {
                node_id,
                name,
                value,
            } => {
                next.endpoint_data_mut(&node_id)?.parameters.insert(name, value);
            }
            GraphAction::ClearParameter { node_id, name } => {
                next.endpoint_data_mut(&node_id)?.parameters.remove(&name);
            }
            GraphAction::SelectPin { node_id, pin } => {
                next.endpoint_data_mut(&node_id)?.selected_pin = pin;
            }
            GraphAction::SetText { node_id, value } => {
                let node = next.node_mut(&node_id)?;
                match &mut node.kind {
                    NodeKind::TextInput(data) => data.value = value,
                    other => return Err(wrong_kind(&node_id, "textInput", other)),
                }
            }
            GraphAction::AddMediaItem { node_id, item } => {
                next.media_items_mut(&node_id)?.push(item);
            }
            GraphAction::RemoveMediaItem { node_id, item_id } => {
                let items = next.media_items_mut(&node_id)?;
                let index = items
                    .iter()
                    .position(|i| i.id == item_id)
                    .ok_or_else(|| GraphError::InvalidGraph(format!(
                        "node '{}' has no media item '{}'",
                        node_id, item_id
                    )))?;
                items.remove(index);
                next.shift_item_edges(&node_id, index);
            }
            GraphAction::Connect(connection) => {
                next.connect(connection)?;
            }
            GraphAction::Reconnect {
                edge_id,
                connection,
            } => {
                next.remove_edge(&edge_id)?;
                next.connect(connection)?;
            }
            GraphAction::RemoveEdge { edge_id } => {
                next.remove_edge(&edge_id)?;
            }
            GraphAction::BeginExecution { node_id } => {
                let data = next.endpoint_data_mut(&node_id)?;
                if data.is_executing() {
                    return Err(GraphError::AlreadyExecuting(node_id));
                }
                data.status = ExecutionStatus::Executing;
            }
            GraphAction::CompleteExecution { node_id, result } => {
                let data = next.executing_data_mut(&node_id)?;
                data.result = Some(result);
                data.error = None;
                data.status = ExecutionStatus::Completed;
            }
            GraphAction::FailExecution { node_id, error } => {
                let data = next.executing_data_mut(&node_id)?;
                data.error = Some(error);
                data.status = ExecutionStatus::Failed;
            }
            GraphAction::ResetExecution { node_id } => {
                let data = next.endpoint_data_mut(&node_id)?;
                data.status = ExecutionStatus::Idle;
                data.error = None;
            }
        }
        Ok(next)
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut GraphNode, GraphError> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    fn endpoint_data_mut(&mut self, id: &str) -> Result<&mut AiEndpointData, GraphError> {
        let node = self.node_mut(id)?;
        match &mut node.kind {
            NodeKind::AiEndpoint(data) => Ok(data),
            other => Err(wrong_kind(id, "aiEndpoint", other)),
        }
    }

    fn executing_data_mut(&mut self, id: &str) -> Result<&mut AiEndpointData, GraphError> {
        let data = self.endpoint_data_mut(id)?;
        if !data.is_executing() {
            return Err(GraphError::NotExecuting(id.to_string()));
        }
        Ok(data)
    }

    fn media_items_mut(&mut self, id: &str) -> Result<&mut Vec<MediaItem>, GraphError> {
        let node = self.node_mut(id)?;
        match &mut node.kind {
            NodeKind::Image(data) | NodeKind::Video(data) => Ok(&mut data.items),
            other => Err(wrong_kind(id, "image or video", other)),
        }
    }

    /// Validates `connection` against the current nodes, then replaces any
    /// edge already feeding the same target handle.
    fn connect(&mut self, connection: Connection) -> Result<(), GraphError> {
        for id in [&connection.source, &connection.target] {
            if self.node(id).is_none() {
                return Err(GraphError::NodeNotFound(id.clone()));
            }
        }
        if let Some((source_type, target_type)) =
            validation::connection_types(&connection, &self.nodes)
        {
            if !validation::are_types_compatible(source_type, target_type) {
                return Err(GraphError::ConnectionRejected {
                    source_node: connection.source,
                    source_handle: connection.source_handle,
                    target_node: connection.target,
                    target_handle: connection.target_handle,
                    source_type,
                    target_type,
                });
            }
        }

        self.edges
            .retain(|e| !e.targets(&connection.target, &connection.target_handle));
        self.edges.push(GraphEdge::from_connection(&connection));
        Ok(())
    }

    fn remove_edge(&mut self, edge_id: &str) -> Result<(), GraphError> {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != edge_id);
        if self.edges.len() == before {
            return Err(GraphError::EdgeNotFound(edge_id.to_string()));
        }
        Ok(())
    }

    /// Drops edges leaving the removed item and renumbers edges leaving the
    /// items that moved up to fill its slot.
    fn shift_item_edges(&mut self, node_id: &str, removed: usize) {
        self.edges.retain(|e| {
            e.source != node_id || handle::output_index(&e.source_handle) != Some(removed)
        });
        for edge in self.edges.iter_mut().filter(|e| e.source == node_id) {
            if let Some(index) = handle::output_index(&edge.source_handle) {
                if index > removed {
                    let mut connection = edge.connection();
                    connection.source_handle = handle::output_handle(index - 1);
                    *edge = GraphEdge::from_connection(&connection);
                }
            }
        }
    }
}

fn wrong_kind(node_id: &str, expected: &'static str, actual: &NodeKind) -> GraphError {
    GraphError::WrongNodeKind {
        node_id: node_id.to_string(),
        expected,
        actual: actual.tag(),
    }
}
