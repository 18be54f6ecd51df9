//! The `extract` command: unpack an archive into a directory.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::archive::extract_archive;

/// Extract the full contents of an archive, recreating its directory
/// structure.
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// Archive to extract.
    archive: PathBuf,

    /// Destination directory (created if missing).
    dest: PathBuf,
}

impl ExtractCommand {
    pub fn execute(self) -> Result<()> {
        extract_archive(&self.archive, &self.dest)
            .with_context(|| format!("failed to extract {}", self.archive.display()))?;
        println!(
            "{} {} into {}",
            "Extracted".green().bold(),
            self.archive.display(),
            self.dest.display()
        );
        Ok(())
    }
}
