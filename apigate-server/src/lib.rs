//! HTTP server for apigate services.
//!
//! Wires the settings and API key guard from `apigate-core` into an axum
//! router with CORS and request tracing.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod auth;
pub mod cors;
pub mod error;
pub mod routes;
