//! Package coordinate parsing.
//!
//! A coordinate is the symbolic identifier for a package:
//! `group:artifact` or `group:artifact:version`. A missing version means
//! "resolve the latest published version"; see
//! [`crate::resolver::resolve_tree`] for how that choice routes to the
//! coordinate resolver.
//!
//! Parsing is pure string work; no I/O happens here.
//!
//! # Examples
//!
//! ```rust
//! use kiln::coordinate::Coordinate;
//!
//! let pinned: Coordinate = "com.google.guava:guava:19.0".parse().unwrap();
//! assert_eq!(pinned.version(), Some("19.0"));
//! assert_eq!(pinned.to_string(), "com.google.guava:guava:19.0");
//!
//! let floating: Coordinate = "com.google.guava:guava".parse().unwrap();
//! assert!(floating.version().is_none());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::core::{KilnError, Result};

/// A parsed package coordinate: group, artifact, and optional version.
///
/// Immutable once parsed. The identity string (`group:artifact:version`,
/// or `group:artifact` when no version is pinned) is produced by the
/// [`fmt::Display`] implementation and used as the deduplication key
/// during tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: Option<String>,
}

impl Coordinate {
    /// Create a coordinate from already-validated parts.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version,
        }
    }

    /// Parse coordinate text of the form `group:artifact[:version]`.
    ///
    /// # Errors
    ///
    /// Returns [`KilnError::InvalidCoordinate`] when the text has fewer
    /// than two segments, more than three, or any empty segment.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || KilnError::InvalidCoordinate {
            text: text.to_string(),
        };

        let segments: Vec<&str> = text.split(':').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid());
        }
        match segments.as_slice() {
            [group, artifact] => Ok(Self::new(*group, *artifact, None)),
            [group, artifact, version] => {
                Ok(Self::new(*group, *artifact, Some((*version).to_string())))
            }
            _ => Err(invalid()),
        }
    }

    /// The group identifier (e.g. `com.google.guava`).
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The artifact identifier (e.g. `guava`).
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// The pinned version, if one was given.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Whether the coordinate pins an explicit version.
    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }

    /// A copy of this coordinate with the version replaced.
    ///
    /// Used by resolvers that turn a versionless coordinate into a
    /// concrete one after a "latest version" lookup.
    #[must_use]
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            version: Some(version.into()),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.artifact, version),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}

impl FromStr for Coordinate {
    type Err = KilnError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
