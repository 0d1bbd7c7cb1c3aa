//! Input source resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// Name that selects standard input
pub const STDIN_NAME: &str = "-";

/// One place records are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A regular file
    File(PathBuf),
}

impl InputSource {
    /// Open the source behind a buffered reader of `buffer_size` bytes
    pub fn open(&self, buffer_size: usize) -> Result<Box<dyn BufRead>> {
        match self {
            InputSource::Stdin => Ok(Box::new(BufReader::with_capacity(
                buffer_size,
                io::stdin().lock(),
            ))),
            InputSource::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open file: {}", path.display()))?;
                Ok(Box::new(BufReader::with_capacity(buffer_size, file)))
            }
        }
    }

    /// Display name for logs
    pub fn name(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

/// Resolve command-line inputs to sources
///
/// No inputs means standard input. `-` selects standard input at that
/// position; anything else is treated as a glob pattern that must match at
/// least one file. Files are kept in argument order.
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<InputSource>> {
    if patterns.is_empty() {
        return Ok(vec![InputSource::Stdin]);
    }

    let mut sources = Vec::new();
    for pattern in patterns {
        if pattern == STDIN_NAME {
            sources.push(InputSource::Stdin);
            continue;
        }

        let paths = glob(pattern)
            .map_err(|e| CliError::InvalidPattern(format!("{pattern} ({})", e.msg)))?;

        let mut matched = Vec::new();
        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;
            if path.is_file() {
                matched.push(path);
            }
        }

        if matched.is_empty() {
            return Err(CliError::InputNotFound(pattern.to_string()).into());
        }

        matched.sort();
        sources.extend(matched.into_iter().map(InputSource::File));
    }

    Ok(sources)
}
