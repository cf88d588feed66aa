//! session::paths
//!
//! Centralized path routing for tsuru-client storage locations.
//!
//! # Architecture
//!
//! All client storage lives under `~/.tsuru/`:
//! - `target` - URL of the control plane the client talks to
//! - `token` - session auth token
//! - `plugins/` - installed plugin executables, one file per plugin
//!
//! **Hard rule:** no code outside this module computes `~/.tsuru` paths.
//! Components take a `ClientPaths` (or a path derived from one), which keeps
//! everything redirectable to a temp directory in tests.
//!
//! # Example
//!
//! ```
//! use tsuru_client::session::paths::ClientPaths;
//! use std::path::PathBuf;
//!
//! let paths = ClientPaths::with_root(PathBuf::from("/home/user/.tsuru"));
//! assert_eq!(paths.plugin_path("env"), PathBuf::from("/home/user/.tsuru/plugins/env"));
//! ```

use std::path::{Path, PathBuf};

use super::SessionError;

/// Centralized path routing for client storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPaths {
    /// Root storage directory, normally `~/.tsuru`.
    root: PathBuf,
}

impl ClientPaths {
    /// Create paths rooted at the default location, `~/.tsuru`.
    ///
    /// # Errors
    ///
    /// Fails if the home directory cannot be determined.
    pub fn new() -> Result<Self, SessionError> {
        let home = dirs::home_dir().ok_or(SessionError::NoHomeDir)?;
        Ok(Self {
            root: home.join(".tsuru"),
        })
    }

    /// Create paths rooted at a custom directory.
    ///
    /// Primarily useful for tests.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the current target URL.
    pub fn target_path(&self) -> PathBuf {
        self.root.join("target")
    }

    /// File holding the session auth token.
    pub fn token_path(&self) -> PathBuf {
        self.root.join("token")
    }

    /// Directory holding installed plugins.
    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join("plugins")
    }

    /// Path of a named plugin inside the plugins directory.
    pub fn plugin_path(&self, name: &str) -> PathBuf {
        self.plugins_dir().join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_rooted_under_root() {
        let paths = ClientPaths::with_root(PathBuf::from("/tmp/t"));
        assert_eq!(paths.target_path(), PathBuf::from("/tmp/t/target"));
        assert_eq!(paths.token_path(), PathBuf::from("/tmp/t/token"));
        assert_eq!(paths.plugins_dir(), PathBuf::from("/tmp/t/plugins"));
        assert_eq!(paths.plugin_path("x"), PathBuf::from("/tmp/t/plugins/x"));
    }
}
