//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads whatever session/store state it needs
//! 2. Performs the operation
//! 3. Formats and displays output
//!
//! # Hook forcing
//!
//! Dispatch builds the command registry and forces the inherited pre-run
//! hook chain for the named command before invoking its handler, mirroring
//! how the command framework would have run hooks itself.
//!
//! # Async Commands
//!
//! Commands involving network I/O (app-swap, plugin-install) are async
//! internally and are driven with a `tokio::runtime::Runtime` from the sync
//! dispatch context.

mod plugin_cmd;
mod swap;

// Re-export command functions for testing and direct invocation
pub use plugin_cmd::{plugin_install, plugin_list, plugin_remove, plugin_run};
pub use swap::{swap, swap_flow, SwapOutcome};

use anyhow::Result;

use super::tree::{CommandInfo, CommandTree, HookErrorPolicy, HookSet};
use super::Context;
use crate::cli::args::Command;
use crate::ui::output;
use crate::ui::Verbosity;

/// Name of the implicit plugin-run command in the registry.
const PLUGIN_RUN: &str = "plugin";

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let tree = registry(verbosity);

    match command {
        Command::AppSwap {
            app1,
            app2,
            force,
            cname_only,
        } => {
            force_hooks(&tree, "app-swap", &[app1.clone(), app2.clone()])?;
            swap::swap(ctx, &app1, &app2, force, cname_only)
        }
        Command::PluginInstall { name, url } => {
            force_hooks(&tree, "plugin-install", &[name.clone(), url.clone()])?;
            plugin_cmd::plugin_install(ctx, &name, &url)
        }
        Command::PluginRemove { name } => {
            force_hooks(&tree, "plugin-remove", &[name.clone()])?;
            plugin_cmd::plugin_remove(ctx, &name)
        }
        Command::PluginList => {
            force_hooks(&tree, "plugin-list", &[])?;
            plugin_cmd::plugin_list(ctx)
        }
        Command::Plugin(argv) => {
            check_min_args(&tree, PLUGIN_RUN, argv.len())?;
            force_hooks(&tree, PLUGIN_RUN, &argv)?;
            plugin_cmd::plugin_run(ctx, &argv)
        }
    }
}

/// Build the command registry.
///
/// The root is self-parented (framework convention for the top of the tree)
/// and carries a persistent pre-run hook that traces dispatches; leaf
/// commands inherit it unless they register their own.
fn registry(verbosity: Verbosity) -> CommandTree {
    let mut tree = CommandTree::new();
    let root = tree.add_root(
        CommandInfo::new(
            "tsuru",
            "tsuru command [args]",
            "Command line client for the tsuru platform-as-a-service.",
            0,
        ),
        HookSet {
            persistent_pre_run: Some(Box::new(move |info, args| {
                output::debug(format!("running {} {:?}", info.name, args), verbosity);
            })),
            ..Default::default()
        },
    );
    tree.add(
        CommandInfo::new(
            "app-swap",
            "app-swap <app1-name> <app2-name> [-f/--force] [-c/--cname-only]",
            "Swaps routing between two apps.",
            2,
        ),
        Some(root),
        HookSet::default(),
    );
    tree.add(
        CommandInfo::new(
            "plugin-install",
            "plugin-install <plugin-name> <plugin-url>",
            "Downloads the plugin file into ~/.tsuru/plugins.",
            2,
        ),
        Some(root),
        HookSet::default(),
    );
    tree.add(
        CommandInfo::new(
            "plugin-remove",
            "plugin-remove <plugin-name>",
            "Removes a previously installed plugin.",
            1,
        ),
        Some(root),
        HookSet::default(),
    );
    tree.add(
        CommandInfo::new("plugin-list", "plugin-list", "List installed plugins.", 0),
        Some(root),
        HookSet::default(),
    );
    tree.add(
        CommandInfo::new(
            PLUGIN_RUN,
            "tsuru <plugin-name> [args...]",
            "Run an installed plugin.",
            1,
        ),
        Some(root),
        HookSet::default(),
    );
    tree
}

/// Force the inherited pre-run hook chain for a registered command.
fn force_hooks(tree: &CommandTree, name: &str, args: &[String]) -> Result<()> {
    if let Some(node) = tree.lookup(name) {
        tree.force_pre_run(node, args, HookErrorPolicy::default())?;
    }
    Ok(())
}

/// Enforce a command's minimum positional argument count.
fn check_min_args(tree: &CommandTree, name: &str, got: usize) -> Result<()> {
    if let Some(node) = tree.lookup(name) {
        let info = tree.info(node);
        if got < info.min_args {
            anyhow::bail!(
                "not enough arguments: usage: {} (expected at least {})",
                info.usage,
                info.min_args
            );
        }
    }
    Ok(())
}
