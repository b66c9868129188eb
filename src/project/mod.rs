//! Saved canvases.
//!
//! A [`Project`] is the JSON document written to disk: the graph plus the
//! editor's workflow state. Loading checks the graph before handing it out.

use crate::error::{GraphError, ProjectError};
use crate::graph::{GraphEdge, GraphNode, GraphState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// A type that can be turned into a graph snapshot.
///
/// Implement this on a custom document format to load it into a
/// [`GraphStore`](crate::graph::GraphStore).
pub trait IntoGraph {
    fn into_graph(self) -> Result<GraphState, GraphError>;
}

impl IntoGraph for GraphState {
    fn into_graph(self) -> Result<GraphState, GraphError> {
        GraphState::from_parts(self.nodes, self.edges)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    #[serde(default)]
    pub workflow: WorkflowState,
}

/// Editor state saved alongside the graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    /// Ids of the endpoints shown in the sidebar.
    #[serde(default)]
    pub visible_endpoints: Vec<String>,
    #[serde(default)]
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Project {
    /// An empty project with a fresh id.
    pub fn new(name: &str) -> Self {
        Self::from_graph(name, &GraphState::default())
    }

    pub fn from_graph(name: &str, graph: &GraphState) -> Self {
        Self {
            id: format!("project-{}", Uuid::new_v4()),
            name: name.to_string(),
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
            workflow: WorkflowState::default(),
        }
    }

    pub fn with_workflow(mut self, workflow: WorkflowState) -> Self {
        self.workflow = workflow;
        self
    }

    /// The project's graph, checked for duplicate ids, dangling edges and
    /// doubly connected target handles.
    pub fn graph(&self) -> Result<GraphState, GraphError> {
        GraphState::from_parts(self.nodes.clone(), self.edges.clone())
    }

    pub fn to_json(&self) -> Result<String, ProjectError> {
        serde_json::to_string_pretty(self).map_err(|e| ProjectError::JsonParseError(e.to_string()))
    }

    /// Parses and checks a project document.
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        let project: Project =
            serde_json::from_str(json).map_err(|e| ProjectError::JsonParseError(e.to_string()))?;
        project.graph()?;
        Ok(project)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| ProjectError::io(path, e))?;
        info!(project = %self.id, path = %path.display(), "Saved project");
        Ok(())
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ProjectError::io(path, e))?;
        let project = Self::from_json(&json)?;
        info!(project = %project.id, nodes = project.nodes.len(), "Loaded project");
        Ok(project)
    }
}

impl IntoGraph for Project {
    fn into_graph(self) -> Result<GraphState, GraphError> {
        GraphState::from_parts(self.nodes, self.edges)
    }
}
