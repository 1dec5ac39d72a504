//! Dispatcher port
//!
//! Defines the interface to the request-processing orchestrator that
//! executes a delegated request on an agent variant.

use async_trait::async_trait;
use thiserror::Error;
use workflow_domain::{WorkflowRequest, WorkflowResponse};

/// Errors that can occur while dispatching a request
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Executes delegated requests.
///
/// Implementations (adapters) live in the infrastructure layer. Timeouts,
/// cancellation and any retry policy belong to the implementation.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Send one request and wait for its response
    async fn dispatch(&self, request: &WorkflowRequest) -> Result<WorkflowResponse, DispatchError>;
}
