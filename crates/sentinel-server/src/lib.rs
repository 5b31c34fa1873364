//! Sentinel fraud console HTTP server library
//!
//! REST API, configuration and startup helpers, exposed for the binary and tests.

pub mod api;
pub mod config;
pub mod console;
pub mod error;
