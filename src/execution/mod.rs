//! Running AI endpoint nodes against a remote execution service.

mod client;
mod http;
mod orchestrator;
mod status;

pub use client::{ExecutionClient, ExecutionRequest, ExecutionResponse};
pub use http::ApiClient;
pub use orchestrator::execute_node;
pub use status::ExecutionStatus;
