//! ui
//!
//! User interaction utilities: output formatting and interactive prompts.

pub mod output;
pub mod prompts;

pub use output::Verbosity;
