//! Type rules for connecting handles.
//!
//! Every handle on the canvas carries a [`HandleType`]. A connection is valid
//! when the type of its source handle is compatible with the type of its
//! target handle.

use crate::graph::{Connection, GraphNode, NodeKind, handle};
use crate::schema::{InputType, OutputType, infer_schema};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value type flowing through a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleType {
    Text,
    Image,
    Video,
    Audio,
    Json,
    Any,
}

impl HandleType {
    /// Display color of an edge carrying this type.
    pub fn color(&self) -> &'static str {
        match self {
            HandleType::Text => "#3b82f6",
            HandleType::Image => "#22c55e",
            HandleType::Video => "#a855f7",
            HandleType::Audio => "#f97316",
            HandleType::Json => "#eab308",
            HandleType::Any => "#6b7280",
        }
    }
}

impl fmt::Display for HandleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleType::Text => "text",
            HandleType::Image => "image",
            HandleType::Video => "video",
            HandleType::Audio => "audio",
            HandleType::Json => "json",
            HandleType::Any => "any",
        };
        write!(f, "{}", name)
    }
}

impl From<OutputType> for HandleType {
    fn from(output: OutputType) -> Self {
        match output {
            OutputType::Image => HandleType::Image,
            OutputType::Video => HandleType::Video,
            OutputType::Audio => HandleType::Audio,
            OutputType::Text => HandleType::Text,
            OutputType::Json => HandleType::Json,
        }
    }
}

impl From<InputType> for HandleType {
    fn from(input: InputType) -> Self {
        match input {
            InputType::Text => HandleType::Text,
            InputType::Image => HandleType::Image,
            InputType::Video => HandleType::Video,
            InputType::Audio => HandleType::Audio,
            _ => HandleType::Any,
        }
    }
}

/// Type of `handle_id` on `node`, seen as a source (`is_source`) or a target.
pub fn get_handle_type(node: &GraphNode, handle_id: &str, is_source: bool) -> HandleType {
    match &node.kind {
        NodeKind::TextInput(_) if is_source => HandleType::Text,
        NodeKind::Image(_) if is_source => HandleType::Image,
        NodeKind::Video(_) if is_source => HandleType::Video,
        NodeKind::TextInput(_) | NodeKind::Image(_) | NodeKind::Video(_) => HandleType::Any,
        NodeKind::AiEndpoint(data) => {
            let schema = infer_schema(&data.endpoint);
            if is_source {
                schema
                    .primary_output()
                    .map(HandleType::from)
                    .unwrap_or(HandleType::Json)
            } else {
                let name = handle::parameter_name(handle_id);
                schema
                    .input(name)
                    .map(|input| HandleType::from(input.input_type))
                    .unwrap_or(HandleType::Any)
            }
        }
    }
}

pub fn are_types_compatible(source: HandleType, target: HandleType) -> bool {
    match (source, target) {
        (HandleType::Any, _) | (_, HandleType::Any) => true,
        (HandleType::Json, HandleType::Text) | (HandleType::Text, HandleType::Json) => true,
        (a, b) => a == b,
    }
}

/// Source and target handle types of `connection`, or `None` when either
/// node is not in `nodes`.
pub fn connection_types(
    connection: &Connection,
    nodes: &[GraphNode],
) -> Option<(HandleType, HandleType)> {
    let source = nodes.iter().find(|n| n.id == connection.source)?;
    let target = nodes.iter().find(|n| n.id == connection.target)?;
    Some((
        get_handle_type(source, &connection.source_handle, true),
        get_handle_type(target, &connection.target_handle, false),
    ))
}

pub fn is_valid_connection(connection: &Connection, nodes: &[GraphNode]) -> bool {
    match connection_types(connection, nodes) {
        Some((source, target)) => are_types_compatible(source, target),
        None => false,
    }
}
