//! Deduplicated transitive dependency trees.
//!
//! [`resolve_tree`] turns a coordinate string into a rooted tree of
//! [`DependencyNode`]s. The traversal is synchronous, single-threaded and
//! depth-first pre-order: each direct dependency is expanded fully before
//! its next sibling is considered, in the order the collaborator returned
//! them. The visited set lives for exactly one [`resolve_tree`] call and
//! is threaded through the recursion as an explicit `&mut` parameter.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::coordinate::Coordinate;
use crate::core::Result;
use crate::resolver::{ClasspathDependency, CoordinateResolver};

/// One node of a resolved dependency tree.
///
/// Wraps a shared dependency together with its depth level; owns its
/// ordered child list exclusively. `level` is `-1` for the sentinel root
/// and `parent.level + 1` everywhere else.
#[derive(Debug)]
pub struct DependencyNode {
    /// The resolved dependency at this node.
    pub dependency: Arc<dyn ClasspathDependency>,
    /// Depth level: `-1` for the root sentinel, `0` for its direct
    /// dependencies, and so on.
    pub level: i32,
    /// Child nodes in discovery order.
    pub children: Vec<DependencyNode>,
}

/// A fully built dependency tree plus the origin of its root artifact.
#[derive(Debug)]
pub struct ResolvedTree {
    /// Sentinel root at level `-1` wrapping the requested artifact. The
    /// root itself is not part of the addressable graph; its children are
    /// the artifact's direct dependencies.
    pub root: DependencyNode,
    /// Origin location reported by the resolver (repository root or URL).
    pub origin: String,
}

impl ResolvedTree {
    /// Flatten the tree into a classpath list: the root artifact followed
    /// by every transitive dependency in pre-order. Each identity appears
    /// exactly once because the tree itself is deduplicated.
    pub fn classpath(&self) -> Vec<Arc<dyn ClasspathDependency>> {
        let mut list = vec![Arc::clone(&self.root.dependency)];
        collect(&self.root.children, &mut list);
        list
    }
}

fn collect(nodes: &[DependencyNode], into: &mut Vec<Arc<dyn ClasspathDependency>>) {
    for node in nodes {
        into.push(Arc::clone(&node.dependency));
        collect(&node.children, into);
    }
}

/// Resolve `text` into a deduplicated transitive dependency tree.
///
/// A coordinate with an explicit version delegates exactly one
/// [`CoordinateResolver::resolve`] call; a versionless coordinate goes
/// through [`CoordinateResolver::latest_artifact`] instead, never the
/// exact-resolution operation.
///
/// # Errors
///
/// [`crate::core::KilnError::InvalidCoordinate`] for malformed text and
/// [`crate::core::KilnError::DependencyNotFound`] when the resolver cannot
/// satisfy the coordinate (or any transitive coordinate). No partial tree
/// is returned on failure.
pub fn resolve_tree(resolver: &dyn CoordinateResolver, text: &str) -> Result<ResolvedTree> {
    let coordinate = Coordinate::parse(text)?;
    let resolution = if coordinate.has_version() {
        resolver.resolve(&coordinate)?
    } else {
        resolver.latest_artifact(coordinate.group(), coordinate.artifact())?
    };

    let dependency = resolution.dependency;
    let mut seen = HashSet::from([dependency.id().to_string()]);
    let children = find_children(&dependency, -1, &mut seen)?;

    Ok(ResolvedTree {
        root: DependencyNode {
            dependency,
            level: -1,
            children,
        },
        origin: resolution.origin,
    })
}

/// Expand the direct dependencies of `parent` into child nodes.
///
/// Identities already in `seen` are skipped entirely; new identities are
/// recorded before recursing, so a dependency reachable through several
/// paths materializes only under the path that discovered it first.
fn find_children(
    parent: &Arc<dyn ClasspathDependency>,
    parent_level: i32,
    seen: &mut HashSet<String>,
) -> Result<Vec<DependencyNode>> {
    let mut result = Vec::new();
    for dependency in parent.direct_dependencies()? {
        if seen.contains(dependency.id()) {
            continue;
        }
        let level = parent_level + 1;
        debug!("found dependency {} level: {}", dependency.id(), level);
        seen.insert(dependency.id().to_string());
        let children = find_children(&dependency, level, seen)?;
        result.push(DependencyNode {
            dependency,
            level,
            children,
        });
    }
    debug!("children for {}: {}", parent.id(), result.len());
    Ok(result)
}
