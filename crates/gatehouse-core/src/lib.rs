//! Shared service plumbing: tracing init, health endpoints, request-id middleware.

pub mod health;
pub mod middleware;
pub mod tracing;
