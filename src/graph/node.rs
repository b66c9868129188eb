use crate::catalog::Endpoint;
use crate::execution::ExecutionStatus;
use crate::value::{MediaFile, ParamValue, ParameterMap};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A node on the editor canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    pub position: Position,
    #[serde(default)]
    pub selected: bool,
}

impl GraphNode {
    /// Creates a node with a freshly generated id of the form `<kind>-<uuid>`.
    pub fn new(kind: NodeKind, position: Position) -> Self {
        let id = format!("{}-{}", kind.tag(), Uuid::new_v4());
        Self::with_id(&id, kind, position)
    }

    pub fn with_id(id: &str, kind: NodeKind, position: Position) -> Self {
        Self {
            id: id.to_string(),
            kind,
            position,
            selected: false,
        }
    }

    pub fn ai_endpoint(endpoint: Endpoint, position: Position) -> Self {
        Self::new(NodeKind::AiEndpoint(AiEndpointData::new(endpoint)), position)
    }

    pub fn image(position: Position) -> Self {
        Self::new(NodeKind::Image(MediaNodeData::default()), position)
    }

    pub fn video(position: Position) -> Self {
        Self::new(NodeKind::Video(MediaNodeData::default()), position)
    }

    pub fn text_input(value: &str, position: Position) -> Self {
        Self::new(
            NodeKind::TextInput(TextInputData {
                value: value.to_string(),
            }),
            position,
        )
    }
}

/// Closed set of node kinds, serialized as React Flow's `type` + `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum NodeKind {
    AiEndpoint(AiEndpointData),
    Image(MediaNodeData),
    Video(MediaNodeData),
    TextInput(TextInputData),
}

impl NodeKind {
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::AiEndpoint(_) => "aiEndpoint",
            NodeKind::Image(_) => "image",
            NodeKind::Video(_) => "video",
            NodeKind::TextInput(_) => "textInput",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiEndpointData {
    pub endpoint: Endpoint,
    #[serde(default)]
    pub parameters: ParameterMap,
    #[serde(default)]
    pub selected_pin: String,
    /// A stored `null` result is kept as `Some(Null)`; only an absent
    /// field reads back as `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub status: ExecutionStatus,
}

impl AiEndpointData {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            parameters: ParameterMap::new(),
            selected_pin: String::new(),
            result: None,
            error: None,
            status: ExecutionStatus::Idle,
        }
    }

    pub fn is_executing(&self) -> bool {
        self.status == ExecutionStatus::Executing
    }

    pub fn with_parameter(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.to_string(), value.into());
        self
    }
}

/// Data for image and video nodes: an ordered list of media items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaNodeData {
    #[serde(default)]
    pub items: Vec<MediaItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<MediaFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MediaItem {
    pub fn from_url(url: &str) -> Self {
        Self {
            id: format!("item-{}", Uuid::new_v4()),
            url: Some(url.to_string()),
            file: None,
            preview: None,
            name: None,
        }
    }

    pub fn from_file(file: MediaFile) -> Self {
        Self {
            id: format!("item-{}", Uuid::new_v4()),
            url: None,
            name: file.name.clone(),
            file: Some(file),
            preview: None,
        }
    }

    /// The value this item feeds into a connected input:
    /// preview first, then url, then the raw file.
    pub fn value(&self) -> ParamValue {
        if let Some(preview) = &self.preview {
            ParamValue::Text(preview.clone())
        } else if let Some(url) = &self.url {
            ParamValue::Text(url.clone())
        } else if let Some(file) = &self.file {
            ParamValue::File(file.clone())
        } else {
            ParamValue::Null
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextInputData {
    #[serde(default)]
    pub value: String,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}
