use super::{ExecutionClient, ExecutionRequest};
use crate::error::{ExecutionError, GraphError};
use crate::graph::{GraphAction, GraphStore, NodeKind};
use crate::packaging::package_parameters;
use crate::resolver::{gather_connected_values, resolve_connected_parameters};
use crate::schema::infer_schema;
use serde_json::Value;
use tracing::{info, warn};

/// Runs the AI endpoint node `node_id` and records the outcome on the node.
///
/// On success the node's `result` is replaced and its `error` cleared. On
/// any failure after the node entered `Executing`, the error message is
/// stored and the previous `result` is kept.
pub async fn execute_node(
    store: &GraphStore,
    client: &dyn ExecutionClient,
    node_id: &str,
) -> Result<Value, ExecutionError> {
    store
        .dispatch(GraphAction::BeginExecution {
            node_id: node_id.to_string(),
        })
        .map_err(|e| match e {
            GraphError::AlreadyExecuting(id) => ExecutionError::AlreadyExecuting(id),
            other => ExecutionError::Graph(other),
        })?;

    let outcome = run(store, client, node_id).await;

    let action = match &outcome {
        Ok(result) => GraphAction::CompleteExecution {
            node_id: node_id.to_string(),
            result: result.clone(),
        },
        Err(e) => GraphAction::FailExecution {
            node_id: node_id.to_string(),
            error: e.to_string(),
        },
    };
    if let Err(e) = store.dispatch(action) {
        warn!(node = node_id, error = %e, "Could not record execution outcome");
    }

    match &outcome {
        Ok(_) => info!(node = node_id, "Execution completed"),
        Err(e) => warn!(node = node_id, error = %e, "Execution failed"),
    }
    outcome
}

async fn run(
    store: &GraphStore,
    client: &dyn ExecutionClient,
    node_id: &str,
) -> Result<Value, ExecutionError> {
    let graph = store.snapshot();
    let node = graph
        .node(node_id)
        .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
    let NodeKind::AiEndpoint(data) = &node.kind else {
        return Err(GraphError::WrongNodeKind {
            node_id: node_id.to_string(),
            expected: "aiEndpoint",
            actual: node.kind.tag(),
        }
        .into());
    };

    let schema = infer_schema(&data.endpoint);
    let connected = gather_connected_values(&graph, node_id, &schema);
    let resolved = resolve_connected_parameters(&data.parameters, &connected);
    let parameters = package_parameters(&resolved, &schema.inputs).await?;

    let request = ExecutionRequest {
        endpoint_id: data.endpoint.id.clone(),
        parameters,
    };
    info!(node = node_id, endpoint = %request.endpoint_id, "Executing endpoint");
    let response = client.execute(&request).await?;

    if response.success {
        Ok(response.data.unwrap_or(Value::Null))
    } else {
        Err(ExecutionError::Remote(
            response
                .error
                .unwrap_or_else(|| "Execution failed".to_string()),
        ))
    }
}
