//! The `resolve` command: display a coordinate's dependency tree.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::config::GlobalConfig;
use crate::render::{log_box, render_tree};
use crate::repo::LocalRepository;
use crate::resolver::{DependencyNode, ResolvedTree, resolve_tree};

/// Resolve a coordinate against the artifact repository and print the
/// deduplicated transitive dependency tree.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Coordinate to resolve: group:artifact or group:artifact:version.
    ///
    /// Without a version the latest version published in the repository
    /// is resolved.
    coordinate: String,

    /// Output format (tree, json).
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,
}

impl ResolveCommand {
    /// Execute against the repository from `--repository`, the global
    /// config, or the default location, in that order of preference.
    pub fn execute(self, repository: Option<PathBuf>) -> Result<()> {
        let root = match repository {
            Some(root) => root,
            None => GlobalConfig::load()?.repository_path()?,
        };
        let repo = LocalRepository::new(root);

        let tree = resolve_tree(&repo, &self.coordinate)
            .with_context(|| format!("failed to resolve '{}'", self.coordinate))?;

        match self.format.as_str() {
            "tree" => self.print_tree(&tree)?,
            "json" => self.print_json(&tree)?,
            other => bail!("invalid format '{other}'. Valid formats are: tree, json"),
        }
        Ok(())
    }

    fn print_tree(&self, tree: &ResolvedTree) -> Result<()> {
        let file = tree.root.dependency.file()?;
        let summary = vec![
            tree.root.dependency.id().to_string(),
            tree.origin.clone(),
            file.display().to_string(),
        ];
        print!("{}", log_box(&summary));
        print!("{}", render_tree(&tree.root.children));
        println!();
        Ok(())
    }

    fn print_json(&self, tree: &ResolvedTree) -> Result<()> {
        let file = tree.root.dependency.file()?;
        let value = json!({
            "coordinate": tree.root.dependency.id(),
            "origin": tree.origin,
            "file": file.display().to_string(),
            "dependencies": tree.root.children.iter().map(node_json).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }
}

fn node_json(node: &DependencyNode) -> serde_json::Value {
    json!({
        "id": node.dependency.id(),
        "optional": node.dependency.is_optional(),
        "dependencies": node.children.iter().map(node_json).collect::<Vec<_>>(),
    })
}
