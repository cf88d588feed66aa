//! plugin::install
//!
//! Plugin installation: HTTP download into the store.
//!
//! # Design
//!
//! The destination file is opened (and truncated) before the download
//! starts, so a failed download can leave an empty file behind where a
//! previous version lived. There is deliberately no atomic replace here;
//! reinstalling is the recovery path and the original client behaves the
//! same way.

use std::fs::OpenOptions;
use std::io::Write;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use super::{PluginError, PluginStore};

/// Download a plugin from `url` and install it under `name`.
///
/// The response status must be in [200, 400); anything else fails with the
/// status and body as diagnostics. The file is written owner-executable.
pub async fn install(store: &PluginStore, name: &str, url: &str) -> Result<(), PluginError> {
    store.ensure_dir()?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o755);
    let mut file = options.open(store.path_of(name))?;

    let response = reqwest::get(url)
        .await
        .map_err(|e| PluginError::Network(e.to_string()))?;
    let status = response.status().as_u16();
    let data = response
        .bytes()
        .await
        .map_err(|e| PluginError::Network(e.to_string()))?;
    if !(200..400).contains(&status) {
        return Err(PluginError::Download {
            status,
            body: String::from_utf8_lossy(&data).into_owned(),
        });
    }

    let written = file.write(&data)?;
    if written != data.len() {
        return Err(PluginError::ShortWrite {
            written,
            expected: data.len(),
        });
    }
    Ok(())
}
