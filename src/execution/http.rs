//! REST client for the catalog and execution endpoints, using [`reqwest`].

use super::{ExecutionClient, ExecutionRequest, ExecutionResponse};
use crate::catalog::EndpointCatalog;
use crate::config::ClientConfig;
use crate::error::{CatalogError, ExecutionError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client for one API deployment.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ClientConfig,
}

/// Transport-level failure, before it is mapped into a phase error.
enum HttpFailure {
    Request(reqwest::Error),
    Api { status: u16, body: String },
}

impl From<reqwest::Error> for HttpFailure {
    fn from(e: reqwest::Error) -> Self {
        HttpFailure::Request(e)
    }
}

impl HttpFailure {
    fn into_execution(self) -> ExecutionError {
        match self {
            HttpFailure::Request(e) => ExecutionError::Request(e),
            HttpFailure::Api { status, body } => ExecutionError::Api { status, body },
        }
    }

    fn into_catalog(self) -> CatalogError {
        match self {
            HttpFailure::Request(e) => CatalogError::Request(e),
            HttpFailure::Api { status, body } => CatalogError::Api { status, body },
        }
    }
}

impl ApiClient {
    /// Builds a client with the configured request timeout.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Reuses an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET {api_url}/endpoints`.
    pub async fn fetch_endpoints(&self) -> Result<EndpointCatalog, CatalogError> {
        let url = format!("{}/endpoints", self.config.api_url);
        debug!(%url, "Fetching endpoint catalog");
        let response = self
            .authorize(self.client.get(url.as_str()))
            .send()
            .await?;
        let catalog: EndpointCatalog = Self::parse_response(response)
            .await
            .map_err(HttpFailure::into_catalog)?;
        info!(endpoints = catalog.len(), "Fetched endpoint catalog");
        Ok(catalog)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Returns the response unchanged on a 2xx status, otherwise an API
    /// failure carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, HttpFailure> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HttpFailure::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, HttpFailure> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ExecutionClient for ApiClient {
    /// `POST {api_url}/execute`.
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResponse, ExecutionError> {
        let url = format!("{}/execute", self.config.api_url);
        debug!(%url, endpoint = %request.endpoint_id, "Submitting execution");
        let response = self
            .authorize(self.client.post(url.as_str()))
            .json(request)
            .send()
            .await?;
        Self::parse_response(response)
            .await
            .map_err(HttpFailure::into_execution)
    }
}
