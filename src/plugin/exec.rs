//! plugin::exec
//!
//! Plugin resolution and execution.
//!
//! # Design
//!
//! A plugin runs as a child process with stdin/stdout/stderr inherited from
//! the client (raw passthrough, no post-processing) and the full parent
//! environment plus three injected entries: target, token, and plugin name.
//!
//! The injected plugin name doubles as a recursion guard: if the current
//! process already carries `TSURU_PLUGIN_NAME=<name>`, resolving `<name>`
//! again fails fast with the lookup sentinel, before any filesystem access.
//! Without the guard a plugin that shells out to `tsuru <its-own-name>`
//! would recurse forever.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{PluginError, PluginStore};
use crate::session::{Session, TARGET_ENV, TOKEN_ENV};

/// Environment variable marking the plugin the current process runs under.
pub const PLUGIN_NAME_ENV: &str = "TSURU_PLUGIN_NAME";

/// Resolve a plugin name, honoring the self-invocation guard.
///
/// `marker` is the value of [`PLUGIN_NAME_ENV`] in the current process, if
/// any; it is passed explicitly so the guard is testable without mutating
/// the environment.
pub fn resolve_guarded(
    store: &PluginStore,
    name: &str,
    marker: Option<&str>,
) -> Result<PathBuf, PluginError> {
    if marker == Some(name) {
        return Err(PluginError::NotFound(name.to_string()));
    }
    store.resolve(name)
}

/// Execute a resolved plugin, waiting for it to finish.
///
/// The child's exit outcome is the result: success maps to `Ok(())`, a
/// non-zero exit to [`PluginError::NonZeroExit`] so the caller can mirror
/// the status.
pub fn run_resolved(
    path: &Path,
    session: &Session,
    name: &str,
    args: &[String],
) -> Result<(), PluginError> {
    // Command inherits the parent environment and stdio by default; the
    // injected entries override anything inherited.
    let status = Command::new(path)
        .args(args)
        .env(TARGET_ENV, &session.target)
        .env(TOKEN_ENV, &session.token)
        .env(PLUGIN_NAME_ENV, name)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(PluginError::NonZeroExit(status.code().unwrap_or(1)))
    }
}
