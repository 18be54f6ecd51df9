//! Command-line interface for kiln.
//!
//! Each command is implemented in its own module with its own argument
//! struct and execution logic:
//!
//! - `resolve` - display the deduplicated transitive dependency tree of a
//!   coordinate, preceded by a boxed summary of what resolved and from
//!   where.
//! - `pack` - assemble the archives declared in the project manifest
//!   (`kiln.toml`).
//! - `extract` - unpack an archive into a directory.
//!
//! # Global Options
//!
//! All commands support `--verbose`/`--quiet` (mutually exclusive) to
//! control log output, `--repository` to override the artifact repository
//! root, and `--manifest-path` to point at a manifest outside the current
//! directory. Log output goes to stderr through `tracing`, leaving stdout
//! to the command's own output (trees, summaries), so piping works.
//!
//! ```bash
//! kiln resolve com.google.guava:guava:19.0
//! kiln resolve com.google.guava:guava --format json
//! kiln --repository /data/artifacts resolve org.slf4j:slf4j-api
//! kiln pack
//! kiln extract build/libs/demo.jar /tmp/demo
//! ```

mod extract;
mod pack;
mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Top-level CLI for the kiln build engine.
#[derive(Parser)]
#[command(
    name = "kiln",
    about = "Dependency resolution and artifact packaging for JVM-style builds",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Artifact repository root.
    ///
    /// Overrides the `repository` setting of `~/.kiln/config.toml` and
    /// the built-in default of `~/.kiln/repository`.
    #[arg(long, global = true, env = "KILN_REPOSITORY")]
    repository: Option<PathBuf>,

    /// Path to the project manifest (kiln.toml).
    ///
    /// By default commands look for kiln.toml in the current directory.
    #[arg(long, global = true)]
    manifest_path: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Resolve a coordinate and display its dependency tree.
    Resolve(resolve::ResolveCommand),

    /// Assemble the archives declared in the project manifest.
    Pack(pack::PackCommand),

    /// Extract an archive into a directory.
    Extract(extract::ExtractCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub fn execute(self) -> Result<()> {
        self.init_tracing();

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(self.repository),
            Commands::Pack(cmd) => cmd.execute(self.manifest_path),
            Commands::Extract(cmd) => cmd.execute(),
        }
    }

    /// Route log output to stderr at the level the flags ask for.
    /// `RUST_LOG` still wins when neither flag is given.
    fn init_tracing(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
