//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input must either have defaults or fail with a
//! clear error message. The answer is read from a caller-supplied `BufRead`
//! so the flow is testable without a TTY.

use std::io::{BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ask a yes/no question and read one answer line.
///
/// Prints `message` verbatim (no trailing newline is added), then reads a
/// line from `reader`. Only `y` and `yes` (case-insensitive, trimmed) count
/// as confirmation.
pub fn confirm_line(
    message: &str,
    reader: &mut impl BufRead,
    interactive: bool,
) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    print!("{}", message);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    reader.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

/// Whether an answer line counts as "yes".
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
