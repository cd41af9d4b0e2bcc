//! Shared plumbing for passystem services: health endpoints, request-id
//! middleware, wire-format timestamp serialization, and tracing setup.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
