//! Dispatcher adapters
//!
//! Implementations of the [`Dispatcher`](workflow_application::Dispatcher) port.

mod http;

pub use http::HttpDispatcher;
