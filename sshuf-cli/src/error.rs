//! Error handling for the CLI application

use std::fmt;
use std::io;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Input file not found or inaccessible
    InputNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Invalid option value or configuration file
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputNotFound(path) => write!(f, "No files found matching: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

/// Whether the error chain bottoms out in a closed output pipe
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_input_not_found_display() {
        let error = CliError::InputNotFound("missing.txt".to_string());
        assert_eq!(error.to_string(), "No files found matching: missing.txt");
    }

    #[test]
    fn test_invalid_pattern_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("--window-min must be a positive integer".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: --window-min must be a positive integer"
        );
    }

    #[test]
    fn test_broken_pipe_detected_through_context() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: CliResult<()> = Err(io_err).context("Failed to write record");
        assert!(is_broken_pipe(&err.unwrap_err()));
    }

    #[test]
    fn test_other_errors_are_not_broken_pipe() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(!is_broken_pipe(&anyhow::Error::new(io_err)));
        assert!(!is_broken_pipe(&anyhow::anyhow!("plain failure")));
    }
}
