//! session
//!
//! Session state for talking to the control plane: the target URL and the
//! auth token.
//!
//! # Design
//!
//! A [`Session`] is loaded once, up front, and passed explicitly into the
//! components that need it (API client, plugin executor). Nothing reads the
//! target or token ambiently mid-operation; this keeps those components
//! testable without environment mutation.
//!
//! # Resolution order
//!
//! - target: `$TSURU_TARGET`, else the `~/.tsuru/target` file
//! - token: `$TSURU_TOKEN`, else the `~/.tsuru/token` file
//!
//! A target without a scheme gets `https://` prepended.

pub mod paths;

pub use paths::ClientPaths;

use std::fs;

use thiserror::Error;

/// Environment variable overriding the target URL.
pub const TARGET_ENV: &str = "TSURU_TARGET";

/// Environment variable overriding the auth token.
pub const TOKEN_ENV: &str = "TSURU_TOKEN";

/// Errors from session resolution.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot determine home directory")]
    NoHomeDir,

    #[error("no target configured; set {TARGET_ENV} or write ~/.tsuru/target")]
    NoTarget,

    #[error("not authenticated; set {TOKEN_ENV} or log in to create ~/.tsuru/token")]
    NoToken,

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolved session state.
///
/// The token is deliberately not exposed via `Debug`.
#[derive(Clone)]
pub struct Session {
    /// Control plane base URL, always carrying a scheme.
    pub target: String,
    /// Session auth token.
    pub token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("target", &self.target)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Session {
    /// Load the session from the process environment and the client files.
    pub fn load(paths: &ClientPaths) -> Result<Self, SessionError> {
        Self::load_with(paths, |key| std::env::var(key).ok())
    }

    /// Load the session with an explicit environment lookup.
    ///
    /// Tests pass a closure here instead of mutating the real environment.
    pub fn load_with(
        paths: &ClientPaths,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SessionError> {
        let target = match env(TARGET_ENV) {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => read_trimmed(paths.target_path())?.ok_or(SessionError::NoTarget)?,
        };
        let token = match env(TOKEN_ENV) {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => read_trimmed(paths.token_path())?.ok_or(SessionError::NoToken)?,
        };
        Ok(Self {
            target: normalize_target(&target),
            token,
        })
    }
}

/// Read a single-value file, trimming whitespace.
///
/// Returns `Ok(None)` when the file does not exist; other I/O failures are
/// surfaced.
fn read_trimmed(path: std::path::PathBuf) -> Result<Option<String>, SessionError> {
    match fs::read_to_string(&path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SessionError::ReadError {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

/// Prepend `https://` when the target has no scheme.
fn normalize_target(target: &str) -> String {
    if target.contains("://") {
        target.to_string()
    } else {
        format!("https://{}", target)
    }
}
