//! Domain-specific error types for pyship.
//!
//! This module defines `PyshipError`, a `thiserror`-based enum that
//! provides typed error variants for common failure modes. Public API
//! functions return `Result<T, PyshipError>` for programmatic error
//! handling, while trait boundaries continue to use `anyhow::Result`.
//!
//! `PyshipError` implements `Into<anyhow::Error>`, so the `?` operator
//! converts it automatically at trait boundaries that return `anyhow::Result`.

use std::io;

/// Formats an IO error kind into a human-readable message.
///
/// Provides consistent, user-friendly messages for common IO error kinds
/// (e.g., "I/O error: not found") instead of the OS-level messages
/// (e.g., "No such file or directory (os error 2)"). For unrecognized
/// error kinds, falls back to including the OS-level error message
/// directly (e.g., "I/O error: connection refused").
///
/// The path or operation context is provided separately via
/// `PyshipError::Io { context }`.
pub(crate) fn io_error_kind_message(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "I/O error: not found".to_string(),
        io::ErrorKind::PermissionDenied => "I/O error: permission denied".to_string(),
        io::ErrorKind::IsADirectory => "I/O error: is a directory".to_string(),
        _ => format!("I/O error: {}", err),
    }
}

/// Domain-specific error type for pyship.
///
/// Provides typed variants for common failure modes, enabling callers
/// to match on error kinds programmatically rather than parsing error
/// message strings.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PyshipError {
    /// A validation constraint was violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// The project directory is missing a recognizable project descriptor.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// An external tool could not be located.
    #[error("command not found in PATH: {command}")]
    CommandNotFound {
        /// The command that was looked up.
        command: String,
    },

    /// A command execution failed (non-zero exit, spawn failure, wait failure, thread panic, etc.).
    #[error("command execution failed: {command}: {status}")]
    Execution {
        /// The command that was executed.
        command: String,
        /// Human-readable reason for the failure: exit code plus captured
        /// standard-error output, or a description of the internal error
        /// (e.g., thread spawn failure).
        status: String,
    },

    /// The freshly installed package could not be imported or reported
    /// no usable version attribute.
    #[error("import verification failed: {0}")]
    Import(String),

    /// A release profile could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O operation failed with contextual information.
    #[error("{context}: {message}")]
    Io {
        /// What was being done when the error occurred.
        ///
        /// This is either a file path (e.g., `"release.yaml"`) or an operation
        /// description with a path (e.g., `"failed to remove build artifacts: dist"`).
        /// Combined with `message` in the Display format: `"{context}: {message}"`.
        context: String,
        /// Human-readable description of the I/O failure, derived from
        /// [`io_error_kind_message`] for consistent formatting across the codebase.
        message: String,
        /// The underlying I/O error, preserved for programmatic inspection
        /// (e.g., `source.kind() == ErrorKind::NotFound`).
        #[source]
        source: std::io::Error,
    },
}

impl PyshipError {
    /// Creates an `Io` variant with the `message` field automatically derived
    /// from the `source` via [`io_error_kind_message`].
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            message: io_error_kind_message(&source),
            source,
        }
    }
}
