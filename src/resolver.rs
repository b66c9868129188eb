//! Merges values arriving over edges into a node's local parameters.

use crate::graph::{GraphNode, GraphState, NodeKind, handle};
use crate::schema::EndpointSchema;
use crate::value::{ParamValue, ParameterMap};

/// Returns a copy of `node_parameters` where every non-null connected value
/// overrides the local one. Neither input is modified.
pub fn resolve_connected_parameters(
    node_parameters: &ParameterMap,
    connected_values: &ParameterMap,
) -> ParameterMap {
    let mut resolved = node_parameters.clone();
    for (name, value) in connected_values {
        if !value.is_null() {
            resolved.insert(name.clone(), value.clone());
        }
    }
    resolved
}

/// Collects the value feeding each schema input of `node_id` over an edge.
///
/// Inputs without an incoming edge, or whose source node has disappeared,
/// are left out.
pub fn gather_connected_values(
    graph: &GraphState,
    node_id: &str,
    schema: &EndpointSchema,
) -> ParameterMap {
    let mut values = ParameterMap::new();
    for input in &schema.inputs {
        let target_handle = handle::input_handle(&input.name);
        let Some(edge) = graph.incoming_edge(node_id, &target_handle) else {
            continue;
        };
        let Some(source) = graph.node(&edge.source) else {
            continue;
        };
        values.insert(input.name.clone(), source_value(source, &edge.source_handle));
    }
    values
}

/// The value a node emits on `source_handle`.
fn source_value(source: &GraphNode, source_handle: &str) -> ParamValue {
    match &source.kind {
        NodeKind::TextInput(data) => ParamValue::Text(data.value.clone()),
        NodeKind::Image(data) | NodeKind::Video(data) => {
            let index = handle::output_index(source_handle).unwrap_or(0);
            data.items
                .get(index)
                .map(|item| item.value())
                .unwrap_or(ParamValue::Null)
        }
        NodeKind::AiEndpoint(data) => data
            .result
            .clone()
            .map(ParamValue::from_json)
            .unwrap_or(ParamValue::Null),
    }
}
