//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug output
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output
//!
//! # Plugins
//!
//! Any subcommand clap does not recognize falls through as an external
//! subcommand and is dispatched as a plugin invocation: `tsuru <plugin>
//! [args...]`.

use clap::{Parser, Subcommand};
use std::io::IsTerminal;

/// tsuru-client - CLI client for the tsuru platform-as-a-service
#[derive(Parser, Debug)]
#[command(name = "tsuru")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin is a TTY
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Swap routing between two apps
    #[command(
        name = "app-swap",
        long_about = "Swaps routing between two apps. This allows zero downtime and makes \
            rollback as simple as swapping the applications back.\n\n\
            Use --force if you want to swap applications with a different number of \
            units or different platform without confirmation.\n\n\
            Use --cname-only if you want to swap all cnames except the default cname of \
            the application.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Swap traffic between the live app and its staged replacement
    tsuru app-swap myapp myapp-canary

    # Swap without confirmation even if the apps differ in units/platform
    tsuru app-swap myapp myapp-canary --force"
    )]
    AppSwap {
        /// First application name
        app1: String,

        /// Second application name
        app2: String,

        /// Force swap among apps with different number of units or platform
        #[arg(short = 'f', long)]
        force: bool,

        /// Swap all cnames except the default cname
        #[arg(short = 'c', long = "cname-only")]
        cname_only: bool,
    },

    /// Install a plugin from a URL
    #[command(
        name = "plugin-install",
        long_about = "Downloads the plugin file. It will be copied to ~/.tsuru/plugins and \
            made executable. An existing plugin with the same name is overwritten."
    )]
    PluginInstall {
        /// Name to install the plugin under
        name: String,

        /// URL to download the plugin executable from
        url: String,
    },

    /// Remove an installed plugin
    #[command(name = "plugin-remove")]
    PluginRemove {
        /// Name of the plugin to remove
        name: String,
    },

    /// List installed plugins
    #[command(name = "plugin-list")]
    PluginList,

    /// Run an installed plugin (implicit: `tsuru <plugin> [args...]`)
    #[command(external_subcommand)]
    Plugin(Vec<String>),
}
