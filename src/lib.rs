//! modelstream - stream chat completions from a hosted inference endpoint
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod models;
pub mod sse;
pub mod traits;
