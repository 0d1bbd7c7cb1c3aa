//! CLI command implementations

use anyhow::Result;
use clap::Parser;

pub mod shuffle;

pub use shuffle::ShuffleArgs;

/// A streaming version of the Linux shuf command
#[derive(Debug, Parser)]
#[command(name = "sshuf", version)]
pub struct Cli {
    #[command(flatten)]
    pub shuffle: ShuffleArgs,
}

impl Cli {
    /// Run the requested operation
    pub fn execute(&self) -> Result<()> {
        self.shuffle.execute()
    }
}
