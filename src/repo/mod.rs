//! Local artifact repository.
//!
//! A [`LocalRepository`] is a [`CoordinateResolver`] backed by an on-disk
//! store using the conventional layout:
//!
//! ```text
//! <root>/<group dots as slashes>/<artifact>/<version>/<artifact>-<version>.jar
//! ```
//!
//! Each version directory may carry a `dependencies.toml` sidecar listing
//! the artifact's direct dependencies:
//!
//! ```toml
//! [[dependencies]]
//! coordinate = "org.example:util:1.2.0"
//! optional = false
//! ```
//!
//! An absent sidecar means the artifact has no dependencies. "Latest
//! version" lookups list the version directories and pick the highest,
//! ordering by semver where both sides parse and falling back to
//! lexicographic comparison otherwise (JVM artifact versions are not
//! reliably semver).

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::core::{KilnError, Result};
use crate::resolver::{ClasspathDependency, CoordinateResolver, Resolution};

/// Name of the sidecar metadata file inside a version directory.
const METADATA_FILE: &str = "dependencies.toml";

/// Sidecar metadata: the direct dependencies of one artifact version.
#[derive(Debug, Default, Deserialize)]
struct ArtifactMetadata {
    #[serde(default)]
    dependencies: Vec<DependencyEntry>,
}

/// One declared dependency inside the sidecar metadata.
#[derive(Debug, Deserialize)]
struct DependencyEntry {
    coordinate: String,
    #[serde(default)]
    optional: bool,
}

/// A coordinate resolver over a local Maven-layout artifact store.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    /// Open a repository rooted at `root`. The directory does not have to
    /// exist yet; lookups against a missing root simply miss.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn artifact_dir(&self, group: &str, artifact: &str) -> PathBuf {
        self.root.join(group.replace('.', "/")).join(artifact)
    }

    /// All published versions of `group:artifact`, ascending.
    pub fn versions(&self, group: &str, artifact: &str) -> Vec<String> {
        let dir = self.artifact_dir(group, artifact);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return Vec::new();
        };
        let mut versions: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        versions.sort_by(|a, b| compare_versions(a, b));
        versions
    }

    /// Build the dependency for a pinned coordinate, verifying the
    /// backing file exists.
    fn dependency_for(
        &self,
        coordinate: &Coordinate,
        optional: bool,
    ) -> Result<Arc<dyn ClasspathDependency>> {
        let version = coordinate.version().ok_or_else(|| KilnError::DependencyNotFound {
            id: coordinate.to_string(),
        })?;
        let dir = self
            .artifact_dir(coordinate.group(), coordinate.artifact())
            .join(version);
        let jar = dir.join(format!("{}-{}.jar", coordinate.artifact(), version));
        if !jar.is_file() {
            return Err(KilnError::DependencyNotFound {
                id: coordinate.to_string(),
            });
        }
        debug!("resolved {} to {}", coordinate, jar.display());
        Ok(Arc::new(LocalDependency {
            id: coordinate.to_string(),
            optional,
            jar,
            metadata: dir.join(METADATA_FILE),
            repository: self.clone(),
            direct: OnceLock::new(),
        }))
    }

    /// Resolve a sidecar entry: pinned coordinates go straight to
    /// [`Self::dependency_for`], versionless ones through the latest
    /// version on disk.
    fn resolve_entry(&self, entry: &DependencyEntry) -> Result<Arc<dyn ClasspathDependency>> {
        let coordinate = Coordinate::parse(&entry.coordinate)?;
        if coordinate.has_version() {
            self.dependency_for(&coordinate, entry.optional)
        } else {
            let version = self
                .versions(coordinate.group(), coordinate.artifact())
                .pop()
                .ok_or_else(|| KilnError::DependencyNotFound {
                    id: coordinate.to_string(),
                })?;
            self.dependency_for(&coordinate.with_version(version), entry.optional)
        }
    }
}

impl CoordinateResolver for LocalRepository {
    fn resolve(&self, coordinate: &Coordinate) -> Result<Resolution> {
        Ok(Resolution {
            dependency: self.dependency_for(coordinate, false)?,
            origin: self.root.display().to_string(),
        })
    }

    fn latest_artifact(&self, group: &str, artifact: &str) -> Result<Resolution> {
        let version =
            self.versions(group, artifact)
                .pop()
                .ok_or_else(|| KilnError::DependencyNotFound {
                    id: format!("{group}:{artifact}"),
                })?;
        let coordinate = Coordinate::new(group, artifact, Some(version));
        self.resolve(&coordinate)
    }
}

/// Order two version strings: semver when both parse, lexicographic
/// otherwise.
fn compare_versions(a: &str, b: &str) -> Ordering {
    match (semver::Version::parse(a), semver::Version::parse(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// A dependency resolved from a [`LocalRepository`].
///
/// The backing jar path is validated at resolution time; the direct
/// dependency list is parsed lazily from the sidecar metadata on first
/// access and cached.
pub struct LocalDependency {
    id: String,
    optional: bool,
    jar: PathBuf,
    metadata: PathBuf,
    repository: LocalRepository,
    direct: OnceLock<Vec<Arc<dyn ClasspathDependency>>>,
}

impl LocalDependency {
    fn load_direct(&self) -> Result<Vec<Arc<dyn ClasspathDependency>>> {
        if !self.metadata.is_file() {
            return Ok(Vec::new());
        }
        let text = std::fs::read_to_string(&self.metadata)?;
        let metadata: ArtifactMetadata =
            toml::from_str(&text).map_err(|e| KilnError::MetadataParse {
                file: self.metadata.display().to_string(),
                reason: e.to_string(),
            })?;
        metadata
            .dependencies
            .iter()
            .map(|entry| self.repository.resolve_entry(entry))
            .collect()
    }
}

impl ClasspathDependency for LocalDependency {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn file(&self) -> Result<PathBuf> {
        Ok(self.jar.clone())
    }

    fn direct_dependencies(&self) -> Result<Vec<Arc<dyn ClasspathDependency>>> {
        if let Some(cached) = self.direct.get() {
            return Ok(cached.clone());
        }
        let loaded = self.load_direct()?;
        Ok(self.direct.get_or_init(|| loaded).clone())
    }
}
