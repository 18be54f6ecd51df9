//! Error handling for kiln
//!
//! This module provides the error types used across the kiln engine. The
//! error system is designed around two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **Structural classification**: policy code matches on variants,
//!    never on message text
//!
//! # Error Categories
//!
//! - **Coordinates**: [`KilnError::InvalidCoordinate`]
//! - **Resolution**: [`KilnError::DependencyNotFound`],
//!   [`KilnError::MetadataParse`]
//! - **Archive assembly**: [`KilnError::MissingSourceFile`],
//!   [`KilnError::DuplicateArchiveEntry`], [`KilnError::Zip`]
//! - **Configuration**: [`KilnError::ManifestNotFound`],
//!   [`KilnError::ManifestParse`], [`KilnError::Config`]
//! - **I/O**: [`KilnError::Io`], converted automatically from
//!   [`std::io::Error`]
//!
//! # Duplicate-entry policy
//!
//! [`KilnError::DuplicateArchiveEntry`] deserves a note: it is raised by
//! the archive-writing primitive itself when a destination path inside the
//! output archive is written twice. The default conflict handler in
//! [`crate::archive`] suppresses exactly this variant and re-raises
//! everything else, which is only possible because the condition is a
//! dedicated variant rather than a message pattern.
//!
//! # Examples
//!
//! ```rust
//! use kiln::core::{KilnError, Result};
//!
//! fn check(id: &str) -> Result<()> {
//!     Err(KilnError::DependencyNotFound { id: id.to_string() })
//! }
//!
//! match check("com.example:missing:1.0") {
//!     Err(KilnError::DependencyNotFound { id }) => eprintln!("no such artifact: {id}"),
//!     other => drop(other),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for kiln operations.
///
/// Each variant represents a specific failure mode and carries the context
/// needed to report it (coordinate text, archive path, and so on). Errors
/// are surfaced unchanged; the engine performs no implicit retries.
#[derive(Error, Debug)]
pub enum KilnError {
    /// Package coordinate text could not be parsed.
    ///
    /// Raised when a coordinate has fewer than two `:`-separated segments,
    /// more than three, or an empty segment. Surfaced immediately; there is
    /// nothing to retry.
    #[error("invalid coordinate '{text}': expected group:artifact or group:artifact:version")]
    InvalidCoordinate {
        /// The coordinate text that failed to parse
        text: String,
    },

    /// The coordinate resolver could not satisfy a coordinate.
    ///
    /// Aborts the whole tree build; partial dependency trees are never
    /// returned.
    #[error("dependency not found: {id}")]
    DependencyNotFound {
        /// Identity string of the coordinate that could not be resolved
        id: String,
    },

    /// Archive assembly expected a source file that does not exist on disk.
    ///
    /// This is a fatal assembly error, not a conflict-handler-recoverable
    /// one: a spec that names a missing file indicates a broken build, and
    /// silently producing an incomplete archive would be worse.
    #[error("missing source file: {path}")]
    MissingSourceFile {
        /// The file the spec resolved to
        path: PathBuf,
    },

    /// A second entry was written at an already-used archive path.
    ///
    /// Raised structurally by [`crate::archive::ArchiveWriter::add_entry`].
    /// The default conflict handler suppresses this variant; stricter
    /// handlers may escalate it.
    #[error("duplicate archive entry: {path}")]
    DuplicateArchiveEntry {
        /// Destination path inside the output archive
        path: String,
    },

    /// Sidecar dependency metadata next to an artifact failed to parse.
    #[error("invalid dependency metadata in {file}: {reason}")]
    MetadataParse {
        /// Path of the metadata file that failed to parse
        file: String,
        /// Specific reason reported by the TOML parser
        reason: String,
    },

    /// Project manifest (kiln.toml) not found.
    #[error("manifest file {path} not found")]
    ManifestNotFound {
        /// The manifest path that was tried
        path: PathBuf,
    },

    /// Project manifest failed to parse.
    #[error("invalid manifest file syntax in {file}: {reason}")]
    ManifestParse {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Specific reason reported by the TOML parser
        reason: String,
    },

    /// Global configuration problem.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// An inclusion glob pattern failed to compile.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern text
        pattern: String,
        /// Reason reported by the glob compiler
        reason: String,
    },

    /// I/O error, propagated unchanged.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip read/write error from the underlying archive library,
    /// propagated unchanged.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Convenient result alias for kiln operations.
pub type Result<T> = std::result::Result<T, KilnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_carry_context() {
        let err = KilnError::InvalidCoordinate {
            text: "junit".to_string(),
        };
        assert!(err.to_string().contains("junit"));

        let err = KilnError::DependencyNotFound {
            id: "org.example:absent:1.0".to_string(),
        };
        assert!(err.to_string().contains("org.example:absent:1.0"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: KilnError = io.into();
        assert!(matches!(err, KilnError::Io(_)));
    }

    #[test]
    fn duplicate_entry_is_structurally_matchable() {
        let err = KilnError::DuplicateArchiveEntry {
            path: "META-INF/MANIFEST.MF".to_string(),
        };
        // Policy code matches on the variant, never on the message.
        assert!(matches!(err, KilnError::DuplicateArchiveEntry { .. }));
    }
}
