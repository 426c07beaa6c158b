//! Interactive confirmation abstraction.
//!
//! The publish step asks before uploading anything. Prompting lives
//! behind the [`ConfirmationProvider`] trait so tests can script both
//! answers and `--yes` can bypass the terminal entirely.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Trait for answering yes/no questions.
pub trait ConfirmationProvider {
    /// Asks the given question and returns true on an affirmative answer.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Prompts on stderr and reads one line from stdin.
///
/// Only `y` or `yes` (case-insensitive) count as affirmative; anything
/// else, including an empty line or EOF, declines.
pub struct TerminalConfirmation;

impl ConfirmationProvider for TerminalConfirmation {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let mut stderr = std::io::stderr().lock();
        write!(stderr, "{} [y/N]: ", prompt).context("failed to write confirmation prompt")?;
        stderr.flush().context("failed to flush confirmation prompt")?;

        let mut answer = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("failed to read confirmation answer")?;

        Ok(is_affirmative(&answer))
    }
}

/// Answers every question affirmatively, backing the `--yes` flag.
pub struct AssumeYes;

impl ConfirmationProvider for AssumeYes {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        tracing::debug!("assuming yes for prompt: {}", prompt);
        Ok(true)
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
