//! HTTP dispatcher: posts delegated requests to the request-processing orchestrator

use crate::config::FileDispatcherConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use workflow_application::ports::dispatcher::{DispatchError, Dispatcher};
use workflow_domain::{WorkflowRequest, WorkflowResponse};

/// Maximum size of an error body carried in [`DispatchError::RequestFailed`]
const MAX_ERROR_BODY: usize = 500;

/// Dispatcher that sends each request as a JSON `POST` and reads the
/// response record from the reply body.
///
/// No retries: a failed call surfaces as a [`DispatchError`].
pub struct HttpDispatcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDispatcher {
    /// Build a dispatcher from the `[dispatcher]` config section
    pub fn new(config: &FileDispatcherConfig) -> Result<Self, DispatchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("project-workflow/", env!("CARGO_PKG_VERSION")));
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| DispatchError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let dispatcher = Self::with_client(client, &config.base_url, &config.process_path);
        info!("HttpDispatcher targeting {}", dispatcher.endpoint);
        Ok(dispatcher)
    }

    /// Create a dispatcher with an existing client
    pub fn with_client(client: reqwest::Client, base_url: &str, process_path: &str) -> Self {
        Self {
            client,
            endpoint: join_endpoint(base_url, process_path),
        }
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn dispatch(&self, request: &WorkflowRequest) -> Result<WorkflowResponse, DispatchError> {
        debug!(
            "POST {} ({} via {})",
            self.endpoint,
            request.task_type(),
            request.variant()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(DispatchError::RequestFailed {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        parse_response(&body)
    }
}

fn join_endpoint(base_url: &str, process_path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    if process_path.starts_with('/') {
        format!("{}{}", base, process_path)
    } else {
        format!("{}/{}", base, process_path)
    }
}

fn map_transport_error(e: reqwest::Error) -> DispatchError {
    if e.is_timeout() {
        DispatchError::Timeout
    } else if e.is_connect() {
        DispatchError::ConnectionError(e.to_string())
    } else {
        DispatchError::Other(e.to_string())
    }
}

/// Parse a reply body into a response record.
///
/// The body must be a JSON object with a `response` field; every other
/// field is kept as extra data.
fn parse_response(body: &str) -> Result<WorkflowResponse, DispatchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| DispatchError::InvalidResponse(format!("body is not JSON: {}", e)))?;

    let Value::Object(mut fields) = value else {
        return Err(DispatchError::InvalidResponse(
            "expected a JSON object".to_string(),
        ));
    };

    let Some(response) = fields.remove("response") else {
        return Err(DispatchError::InvalidResponse(
            "missing `response` field".to_string(),
        ));
    };

    Ok(WorkflowResponse {
        response,
        extra: fields,
    })
}

/// Truncate to at most `max_len` bytes on a char boundary
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
