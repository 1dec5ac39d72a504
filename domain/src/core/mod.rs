//! Core domain concepts shared across subdomains.
//!
//! - [`user::UserId`]: who a workflow runs on behalf of
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod user;
