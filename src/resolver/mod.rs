//! Dependency resolution: collaborator traits and the tree builder.
//!
//! This module defines the seam between the engine and whatever actually
//! knows how to locate artifacts:
//!
//! - [`CoordinateResolver`] - the consumed interface with two operations:
//!   resolve an exact coordinate, or resolve the latest version of a
//!   group/artifact pair. Implementations may be network-backed (a remote
//!   repository client) or local ([`crate::repo::LocalRepository`]).
//! - [`ClasspathDependency`] - a resolved package: its identity string, an
//!   `optional` flag, a lazily-materialized backing file, and a
//!   lazily-evaluated list of direct dependencies.
//!
//! On top of those seams, [`resolve_tree`] builds a deduplicated
//! transitive dependency tree (see [`tree`]).
//!
//! # Deduplication
//!
//! Within one resolution pass a coordinate identity enters the tree at
//! most once, tracked by a single visited set passed `&mut` down the
//! recursion. A dependency reachable through several transitive paths
//! keeps the depth of its *first* pre-order discovery: deliberately
//! first-seen-wins, not shortest-path.

pub mod tree;

use std::path::PathBuf;
use std::sync::Arc;

use crate::coordinate::Coordinate;
use crate::core::Result;

pub use tree::{DependencyNode, ResolvedTree, resolve_tree};

/// A resolved package on a classpath.
///
/// Implementations are created by a [`CoordinateResolver`] and shared
/// read-only (`Arc<dyn ClasspathDependency>`) across the dependency tree
/// and the interceptor pipeline. Both accessors are allowed to do lazy
/// work on first call (file materialization, metadata parsing), which is
/// why they are fallible.
pub trait ClasspathDependency: Send + Sync {
    /// Identity string of this dependency, `group:artifact:version`.
    fn id(&self) -> &str;

    /// Whether this dependency was declared optional by its dependent.
    fn is_optional(&self) -> bool;

    /// The backing file for this dependency, materialized on demand.
    fn file(&self) -> Result<PathBuf>;

    /// Direct dependencies of this package, in declaration order.
    fn direct_dependencies(&self) -> Result<Vec<Arc<dyn ClasspathDependency>>>;
}

impl std::fmt::Debug for dyn ClasspathDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClasspathDependency")
            .field("id", &self.id())
            .field("optional", &self.is_optional())
            .finish()
    }
}

/// Outcome of one coordinate resolution: the dependency plus where it
/// came from (repository root or URL), for display in the console summary.
#[derive(Debug)]
pub struct Resolution {
    /// The resolved dependency.
    pub dependency: Arc<dyn ClasspathDependency>,
    /// Origin location of the artifact (repository root or URL).
    pub origin: String,
}

/// The coordinate-resolution collaborator consumed by the tree builder.
///
/// Both operations are fallible; a miss is reported as
/// [`crate::core::KilnError::DependencyNotFound`] and aborts the whole
/// tree build; partial trees are never returned.
pub trait CoordinateResolver {
    /// Resolve an exact coordinate (version present) to a dependency and
    /// its origin location.
    fn resolve(&self, coordinate: &Coordinate) -> Result<Resolution>;

    /// Resolve the latest published version of `group:artifact` to a
    /// dependency and its origin location.
    fn latest_artifact(&self, group: &str, artifact: &str) -> Result<Resolution>;
}
