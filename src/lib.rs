//! tsuru-client - A Rust CLI client for the tsuru platform-as-a-service
//!
//! tsuru-client is a single-binary tool for talking to a tsuru control plane:
//! swapping routing between deployed applications and managing external
//! plugins that extend the CLI.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`api`] - HTTP client for the remote control plane
//! - [`plugin`] - Plugin storage, installation, and execution
//! - [`session`] - Target URL and auth token resolution, path routing
//! - [`ui`] - User interaction utilities
//!
//! # Invariants
//!
//! 1. Session state (target, token) is loaded explicitly and passed into
//!    components; no component reads it ambiently mid-operation.
//! 2. Plugin subprocesses always receive the full parent environment plus
//!    the injected `TSURU_*` variables.
//! 3. Interactive prompts appear only in interactive mode; non-interactive
//!    runs either succeed without input or fail with a clear error.

pub mod api;
pub mod cli;
pub mod plugin;
pub mod session;
pub mod ui;
