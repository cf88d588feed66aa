//! cli::commands::swap
//!
//! The `app-swap` command.
//!
//! # Design
//!
//! Swapping is a single authenticated PUT. The one interesting path is HTTP
//! 412 Precondition Failed: the server refuses to swap apps that differ in
//! units or platform unless forced. That response is soft - the command
//! prints the server's warning, asks for confirmation, and on `y`/`yes`
//! reissues the same request with force unconditionally set. Declining is
//! not an error.

use std::io::BufRead;

use anyhow::{Context as _, Result};

use crate::api::{ApiClient, ApiError};
use crate::cli::Context;
use crate::session::{ClientPaths, Session};
use crate::ui::prompts;

/// What the swap flow ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap went through (initially or after a forced retry).
    Swapped,
    /// The user declined the forced retry.
    Aborted,
}

/// Run the app-swap command.
pub fn swap(ctx: &Context, app1: &str, app2: &str, force: bool, cname_only: bool) -> Result<()> {
    let paths = ClientPaths::new()?;
    let session = Session::load(&paths)?;
    let client = ApiClient::new(&session);

    let rt = tokio::runtime::Runtime::new()?;
    let mut stdin = std::io::stdin().lock();
    let outcome = rt.block_on(swap_flow(
        &client,
        app1,
        app2,
        force,
        cname_only,
        ctx.interactive,
        &mut stdin,
    ))?;

    match outcome {
        SwapOutcome::Swapped => println!("Apps successfully swapped!"),
        SwapOutcome::Aborted => println!("swap aborted."),
    }
    Ok(())
}

/// The swap flow against an explicit client and answer stream.
///
/// Split out from [`swap`] so tests can drive it against a mock server and
/// a canned answer line instead of the real control plane and a TTY.
pub async fn swap_flow(
    client: &ApiClient,
    app1: &str,
    app2: &str,
    force: bool,
    cname_only: bool,
    interactive: bool,
    reader: &mut impl BufRead,
) -> Result<SwapOutcome> {
    match client.swap(app1, app2, force, cname_only).await {
        Ok(()) => Ok(SwapOutcome::Swapped),
        Err(ApiError::PreconditionFailed { message }) => {
            let prompt = format!(
                "WARNING: {}.\nSwap anyway? (y/n) ",
                message.trim_end_matches('\n')
            );
            let confirmed = prompts::confirm_line(&prompt, reader, interactive)
                .context("swap requires confirmation")?;
            if !confirmed {
                return Ok(SwapOutcome::Aborted);
            }
            // Retry with force unconditionally set.
            client.swap(app1, app2, true, cname_only).await?;
            Ok(SwapOutcome::Swapped)
        }
        Err(err) => Err(err.into()),
    }
}
