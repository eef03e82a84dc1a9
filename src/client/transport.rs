//! HTTP transport seam.
//!
//! [`RecipeClient`](crate::client::RecipeClient) builds an [`ApiRequest`] and hands it
//! to a [`Transport`]. The production transport is [`HttpTransport`], a thin layer
//! over `reqwest` bound to a fixed backend origin.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};

use crate::client::error::{ClientError, Result};

/// A single call against the backend, relative to its origin.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<T: serde::Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Status and raw body text of a completed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// The body as failure detail, when there is one.
    pub fn detail(&self) -> Option<String> {
        let trimmed = self.body.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn into_server_error(self) -> ClientError {
        ClientError::Server {
            status: self.status,
            detail: self.detail(),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the call. An `Err` means no response was obtained at all.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// `reqwest`-backed transport for a fixed origin.
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!("Making {} request to: {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Network error calling {}: {}", url, e);
            ClientError::transport(e)
        })?;

        let status = response.status().as_u16();
        tracing::debug!("{} {} responded with status {}", request.method, url, status);

        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body from {}: {}", url, e);
            ClientError::transport(e)
        })?;

        Ok(ApiResponse { status, body })
    }
}
