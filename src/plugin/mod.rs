//! plugin
//!
//! Plugin storage, installation, and execution.
//!
//! # Design
//!
//! A plugin is an external executable installed by URL into `~/.tsuru/plugins/`
//! and invoked as a subprocess with the session injected via environment
//! variables. There is no manifest, no versioning, and no integrity check: a
//! plugin is exactly the bytes of its file.
//!
//! - [`store`] - directory management, listing, removal, name resolution
//! - [`install`] - HTTP download into the store
//! - [`exec`] - subprocess execution with injected session environment

pub mod exec;
pub mod install;
pub mod store;

pub use exec::{resolve_guarded, run_resolved, PLUGIN_NAME_ENV};
pub use install::install;
pub use store::PluginStore;

use thiserror::Error;

/// Errors from plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Lookup sentinel: the name did not resolve to exactly one installed
    /// plugin, or the process is already running under that plugin name.
    ///
    /// Dispatchers treat this as "not a plugin, fall through to another
    /// resolution strategy" rather than a hard failure.
    #[error("\"{0}\": command not found")]
    NotFound(String),

    /// Filesystem error (directory/file creation, read, write, delete).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Network or connection error while downloading.
    #[error("network error: {0}")]
    Network(String),

    /// The download response had a status outside [200, 400).
    #[error("invalid status code reading plugin: {status} - {body:?}")]
    Download {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, kept as diagnostic text.
        body: String,
    },

    /// Fewer bytes were written than received.
    #[error("failed to install plugin: wrote {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// The plugin subprocess ran and exited with a non-zero status.
    #[error("plugin exited with status {0}")]
    NonZeroExit(i32),
}
