//! Project workflow domain
//!
//! Records exchanged with the dispatcher and the phases that produce them:
//!
//! - [`phase::WorkflowPhase`]: planning, environment setup, coding
//! - [`request::WorkflowRequest`] / [`response::WorkflowResponse`]: one delegation
//! - [`result::WorkflowResult`]: status report handed back to the caller

pub mod agent;
pub mod phase;
pub mod plan;
pub mod request;
pub mod response;
pub mod result;
