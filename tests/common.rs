//! Common test utilities for building endpoints, graphs and mock clients.
use async_trait::async_trait;
use otoyai::error::ExecutionError;
use otoyai::execution::{ExecutionClient, ExecutionRequest, ExecutionResponse};
use otoyai::prelude::*;
use std::sync::Mutex;

#[allow(dead_code)]
pub fn endpoint(id: &str, title: &str, category: &str) -> Endpoint {
    Endpoint {
        id: id.to_string(),
        title: title.to_string(),
        vendor: "fal-ai".to_string(),
        category: vec![category.to_string()],
        description: String::new(),
    }
}

/// `text-to-image`: required prompt, diffusion controls, image output.
#[allow(dead_code)]
pub fn flux_dev() -> Endpoint {
    endpoint("fal-ai/flux/dev", "FLUX.1 [dev]", "text-to-image")
}

/// `image-to-video` with a Kling Standard title.
#[allow(dead_code)]
pub fn kling_standard() -> Endpoint {
    endpoint(
        "fal-ai/kling-video/v1.6/standard/image-to-video",
        "Kling 1.6 Standard",
        "image-to-video",
    )
}

#[allow(dead_code)]
pub fn upscaler() -> Endpoint {
    endpoint("fal-ai/esrgan", "ESRGAN Upscaler", "upscale")
}

#[allow(dead_code)]
pub fn chat_model() -> Endpoint {
    endpoint("openai/gpt-4o", "GPT-4o", "llm")
}

/// A graph of `text -> flux -> upscaler` with an image node on the side.
#[allow(dead_code)]
pub struct Pipeline {
    pub store: GraphStore,
    pub text_id: String,
    pub image_id: String,
    pub flux_id: String,
    pub upscale_id: String,
}

#[allow(dead_code)]
pub fn create_pipeline() -> Pipeline {
    let store = GraphStore::new();

    let text = GraphNode::text_input("a lighthouse at dusk", Position::new(0.0, 0.0));
    let image = GraphNode::image(Position::new(0.0, 200.0));
    let flux = GraphNode::ai_endpoint(flux_dev(), Position::new(300.0, 0.0));
    let upscale = GraphNode::ai_endpoint(upscaler(), Position::new(600.0, 0.0));

    let pipeline = Pipeline {
        store,
        text_id: text.id.clone(),
        image_id: image.id.clone(),
        flux_id: flux.id.clone(),
        upscale_id: upscale.id.clone(),
    };

    for node in [text, image, flux, upscale] {
        pipeline
            .store
            .dispatch(GraphAction::AddNode(node))
            .expect("Failed to add node");
    }
    pipeline
}

/// An [`ExecutionClient`] that replays a fixed response and records requests.
#[allow(dead_code)]
pub struct MockClient {
    response: std::result::Result<ExecutionResponse, String>,
    pub requests: Mutex<Vec<ExecutionRequest>>,
}

#[allow(dead_code)]
impl MockClient {
    pub fn succeeding(data: serde_json::Value) -> Self {
        Self {
            response: Ok(ExecutionResponse::ok(data)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn reporting_failure(error: &str) -> Self {
        Self {
            response: Ok(ExecutionResponse::failed(error)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails at the transport level with a 500 API error.
    pub fn erroring(body: &str) -> Self {
        Self {
            response: Err(body.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ExecutionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ExecutionClient for MockClient {
    async fn execute(
        &self,
        request: &ExecutionRequest,
    ) -> std::result::Result<ExecutionResponse, ExecutionError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(body) => Err(ExecutionError::Api {
                status: 500,
                body: body.clone(),
            }),
        }
    }
}

/// Raw catalog API body used by catalog and CLI-facing tests.
#[allow(dead_code)]
pub const CATALOG_JSON: &str = r#"{
    "endpoints": [
        {
            "id": "fal-ai/flux/dev",
            "title": "FLUX.1 [dev]",
            "vendor": "fal-ai",
            "category": ["text-to-image"],
            "description": "12B parameter flow transformer"
        },
        {
            "id": "fal-ai/kling-video/v1.6/standard/image-to-video",
            "title": "Kling 1.6 Standard",
            "vendor": "kling",
            "category": ["image-to-video", "video"]
        },
        {
            "id": "openai/gpt-4o",
            "title": "GPT-4o",
            "category": ["llm"]
        }
    ]
}"#;
