//! HTTP API for the Lumen site.
//!
//! Handlers are thin: they extract the request, call into
//! `lumen-content`, `lumen-contact`, or `lumen-vault`, and map the outcome
//! to a JSON response through [`ApiError`].

#![doc = include_str!("../README.md")]

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use server::{ServerSettings, serve, shutdown_signal};
pub use state::ApiState;

#[cfg(test)]
pub(crate) mod test_support;
