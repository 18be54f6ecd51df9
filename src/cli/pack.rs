//! The `pack` command: assemble the archives declared in kiln.toml.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::archive::{ArchiveWriter, IncludedFileSpec, add_files, suppress_duplicates};
use crate::manifest::{MANIFEST_FILE, Manifest};

/// Assemble every `[[archive]]` declared in the project manifest.
#[derive(Args, Debug)]
pub struct PackCommand {}

impl PackCommand {
    /// Execute against `--manifest-path` or `./kiln.toml`.
    pub fn execute(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let path = manifest_path.unwrap_or_else(|| PathBuf::from(MANIFEST_FILE));
        let manifest = Manifest::load(&path)
            .with_context(|| format!("cannot load manifest {}", path.display()))?;
        let project_dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let project_dir = project_dir.unwrap_or_else(|| Path::new("."));

        for archive in &manifest.archives {
            let output = project_dir.join(&archive.output);
            let specs: Vec<IncludedFileSpec> =
                archive.includes.iter().map(|i| i.to_spec()).collect();

            let mut writer = ArchiveWriter::create(&output)
                .with_context(|| format!("cannot create {}", output.display()))?;
            add_files(project_dir, &specs, &mut writer, &suppress_duplicates)
                .with_context(|| format!("failed to assemble {}", output.display()))?;
            let entries = writer.len();
            writer.finish()?;

            info!("assembled {} for project {}", output.display(), manifest.name);
            println!(
                "{} {} ({} entries)",
                "Packed".green().bold(),
                output.display(),
                entries
            );
        }
        Ok(())
    }
}
