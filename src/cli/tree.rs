//! cli::tree
//!
//! Command registry and pre-run hook forcing.
//!
//! # Architecture
//!
//! Commands form a tree: leaf commands hang off a root (or intermediate
//! group nodes). Nodes live in an arena and refer to their parent by id,
//! which lets a root legally declare itself as its own parent, a convention
//! some command frameworks use for the top of the tree.
//!
//! # Hooks
//!
//! A node can register up to four legacy pre-run hook variants: plain,
//! fallible, persistent, and fallible persistent. The effective hook is
//! decided once, at registration, by collapsing the four slots in that fixed
//! priority order into a single tagged [`Hook`]; traversal never re-scans
//! the variants.
//!
//! [`CommandTree::force_pre_run`] walks self → parent → grandparent and
//! invokes the first effective hook found, then stops. At most one hook runs
//! per traversal. The walk terminates on a null parent, a self-referential
//! root, or any revisited node: the ancestor relation is treated as a
//! possibly-cyclic graph, and a visited set detects the fixed point.

use std::collections::HashSet;

use anyhow::Result;

/// Static descriptor for a command: configuration, not runtime state.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    /// Command name as typed on the command line.
    pub name: String,
    /// One-line usage string.
    pub usage: String,
    /// Longer description.
    pub desc: String,
    /// Minimum number of positional arguments.
    pub min_args: usize,
}

impl CommandInfo {
    pub fn new(name: &str, usage: &str, desc: &str, min_args: usize) -> Self {
        Self {
            name: name.to_string(),
            usage: usage.to_string(),
            desc: desc.to_string(),
            min_args,
        }
    }
}

/// An infallible pre-run hook.
pub type HookFn = Box<dyn Fn(&CommandInfo, &[String])>;

/// A fallible pre-run hook.
pub type TryHookFn = Box<dyn Fn(&CommandInfo, &[String]) -> Result<()>>;

/// The four legacy hook registration slots, in priority order.
#[derive(Default)]
pub struct HookSet {
    pub pre_run: Option<HookFn>,
    pub try_pre_run: Option<TryHookFn>,
    pub persistent_pre_run: Option<HookFn>,
    pub try_persistent_pre_run: Option<TryHookFn>,
}

impl HookSet {
    /// Collapse the slots into the effective hook.
    ///
    /// Priority: pre-run, fallible pre-run, persistent pre-run, fallible
    /// persistent pre-run. First one registered wins.
    fn into_effective(self) -> Option<Hook> {
        if let Some(f) = self.pre_run {
            return Some(Hook::Infallible(f));
        }
        if let Some(f) = self.try_pre_run {
            return Some(Hook::Fallible(f));
        }
        if let Some(f) = self.persistent_pre_run {
            return Some(Hook::Infallible(f));
        }
        if let Some(f) = self.try_persistent_pre_run {
            return Some(Hook::Fallible(f));
        }
        None
    }
}

/// A node's effective pre-run hook, tagged by fallibility.
pub enum Hook {
    Infallible(HookFn),
    Fallible(TryHookFn),
}

/// What to do with an error from a fallible hook.
///
/// The legacy behavior is to discard it (hook invocation is best-effort);
/// `Surface` makes the traversal propagate it instead. The choice is the
/// caller's, explicitly, rather than a silent fixture of the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookErrorPolicy {
    /// Discard errors from fallible hooks (legacy behavior).
    #[default]
    Suppress,
    /// Propagate errors from fallible hooks.
    Surface,
}

/// Opaque node handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

struct Node {
    info: CommandInfo,
    parent: Option<NodeId>,
    hook: Option<Hook>,
}

/// Arena-backed command tree.
#[derive(Default)]
pub struct CommandTree {
    nodes: Vec<Node>,
}

impl CommandTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under `parent` (or with no parent).
    pub fn add(&mut self, info: CommandInfo, parent: Option<NodeId>, hooks: HookSet) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            info,
            parent,
            hook: hooks.into_effective(),
        });
        id
    }

    /// Register a self-parented root.
    pub fn add_root(&mut self, info: CommandInfo, hooks: HookSet) -> NodeId {
        let id = self.add(info, None, hooks);
        self.nodes[id.0].parent = Some(id);
        id
    }

    /// Descriptor of a node.
    pub fn info(&self, id: NodeId) -> &CommandInfo {
        &self.nodes[id.0].info
    }

    /// Find a command by name.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.info.name == name)
            .map(NodeId)
    }

    /// Walk the ancestor chain from `node` and invoke the first effective
    /// hook found, passing the dispatched node's descriptor and `args`.
    ///
    /// Invokes at most one hook. Returns without error when no ancestor has
    /// a hook. Fallible hook errors follow `policy`.
    pub fn force_pre_run(
        &self,
        node: NodeId,
        args: &[String],
        policy: HookErrorPolicy,
    ) -> Result<()> {
        let info = self.info(node);
        let mut visited = HashSet::new();
        let mut curr = node;
        loop {
            if !visited.insert(curr) {
                // Revisited node: cycle (or self-parented root) reached.
                return Ok(());
            }
            if let Some(hook) = &self.nodes[curr.0].hook {
                return match hook {
                    Hook::Infallible(f) => {
                        f(info, args);
                        Ok(())
                    }
                    Hook::Fallible(f) => match policy {
                        HookErrorPolicy::Suppress => {
                            let _ = f(info, args);
                            Ok(())
                        }
                        HookErrorPolicy::Surface => f(info, args),
                    },
                };
            }
            match self.nodes[curr.0].parent {
                Some(parent) => curr = parent,
                None => return Ok(()),
            }
        }
    }
}
