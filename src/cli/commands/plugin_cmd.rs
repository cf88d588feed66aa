//! cli::commands::plugin_cmd
//!
//! Plugin management commands: install, remove, list, and the implicit run
//! path for unknown subcommands.

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::plugin::{self, PluginStore};
use crate::session::{ClientPaths, Session};
use crate::ui::output;
use crate::ui::Verbosity;

/// Run the plugin-install command.
pub fn plugin_install(ctx: &Context, name: &str, url: &str) -> Result<()> {
    let store = default_store()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(plugin::install(&store, name, url))
        .with_context(|| format!("failed to install plugin \"{}\"", name))?;

    output::print(
        format!("Plugin \"{}\" successfully installed!", name),
        Verbosity::from_flags(ctx.quiet, ctx.debug),
    );
    Ok(())
}

/// Run the plugin-remove command.
pub fn plugin_remove(ctx: &Context, name: &str) -> Result<()> {
    let store = default_store()?;
    store
        .remove(name)
        .with_context(|| format!("failed to remove plugin \"{}\"", name))?;

    output::print(
        format!("Plugin \"{}\" successfully removed!", name),
        Verbosity::from_flags(ctx.quiet, ctx.debug),
    );
    Ok(())
}

/// Run the plugin-list command.
///
/// One name per line, directory-read order. A missing or unreadable plugins
/// directory lists as empty; that is the store's contract.
pub fn plugin_list(_ctx: &Context) -> Result<()> {
    let store = default_store()?;
    for name in store.list() {
        println!("{}", name);
    }
    Ok(())
}

/// Run an installed plugin: `tsuru <plugin-name> [args...]`.
///
/// `argv[0]` is the plugin name; the rest is passed through to the child.
/// Resolution (with the self-invocation guard) happens before the session
/// is loaded, so an unknown name fails with the lookup sentinel even when
/// no target is configured. The child's stdio is inherited, so plugin
/// output reaches the terminal unmodified.
pub fn plugin_run(_ctx: &Context, argv: &[String]) -> Result<()> {
    let Some((name, args)) = argv.split_first() else {
        anyhow::bail!("no plugin name given");
    };

    let paths = ClientPaths::new()?;
    let store = PluginStore::new(&paths);
    let marker = std::env::var(plugin::PLUGIN_NAME_ENV).ok();
    let path = plugin::resolve_guarded(&store, name, marker.as_deref())?;

    let session = Session::load(&paths)?;
    plugin::run_resolved(&path, &session, name, args)?;
    Ok(())
}

/// The plugin store at the client's standard location.
fn default_store() -> Result<PluginStore> {
    let paths = ClientPaths::new()?;
    Ok(PluginStore::new(&paths))
}
