//! api
//!
//! HTTP client layer for the tsuru control plane.
//!
//! # Responsibilities
//!
//! - Build authenticated requests against the configured target
//! - Map HTTP failures into the [`ApiError`] taxonomy
//! - Does NOT decide user-facing behavior (prompting, retries); callers do

pub mod client;

pub use client::{ApiClient, ApiError};
