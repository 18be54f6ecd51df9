//! Project manifest (kiln.toml) parsing.
//!
//! The manifest names the project and declares the archives the `pack`
//! command assembles. Include tables translate directly into
//! [`IncludedFileSpec`]s:
//!
//! ```toml
//! name = "demo"
//!
//! [[archive]]
//! output = "build/libs/demo.jar"
//!
//! [[archive.include]]
//! from = "build/classes"
//! patterns = ["**"]
//!
//! [[archive.include]]
//! from = "libs"
//! to = "lib"
//! patterns = ["*.jar"]
//! expand = true
//! ```
//!
//! Pattern strings containing glob metacharacters become glob specs,
//! anything else is a literal path (see [`FileSpec::from_pattern`]).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::archive::{FileSpec, IncludedFileSpec};
use crate::core::{KilnError, Result};

/// Conventional manifest file name.
pub const MANIFEST_FILE: &str = "kiln.toml";

/// A parsed project manifest.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Project name.
    pub name: String,
    /// Declared output archives.
    #[serde(default, rename = "archive")]
    pub archives: Vec<ArchiveDecl>,
}

/// One `[[archive]]` table: an output path plus its included files.
#[derive(Debug, Deserialize)]
pub struct ArchiveDecl {
    /// Output archive path, relative to the project directory.
    pub output: PathBuf,
    /// Included-file specifications, applied in order.
    #[serde(default, rename = "include")]
    pub includes: Vec<IncludeDecl>,
}

/// One `[[archive.include]]` table.
#[derive(Debug, Deserialize)]
pub struct IncludeDecl {
    /// Source root relative to the project directory.
    #[serde(default)]
    pub from: PathBuf,
    /// Destination prefix inside the archive.
    #[serde(default)]
    pub to: PathBuf,
    /// Inclusion patterns: glob patterns or literal paths.
    pub patterns: Vec<String>,
    /// Expand nested archives matched by this include.
    #[serde(default)]
    pub expand: bool,
}

impl IncludeDecl {
    /// Translate into the assembler's spec type.
    pub fn to_spec(&self) -> IncludedFileSpec {
        let specs = self.patterns.iter().map(|p| FileSpec::from_pattern(p)).collect();
        IncludedFileSpec::new(&self.from, &self.to, specs).with_expand_archives(self.expand)
    }
}

impl Manifest {
    /// Load and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// [`KilnError::ManifestNotFound`] when the file does not exist,
    /// [`KilnError::ManifestParse`] when it is not valid manifest TOML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(KilnError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| KilnError::ManifestParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
name = "demo"

[[archive]]
output = "build/libs/demo.jar"

[[archive.include]]
from = "build/classes"
patterns = ["**"]

[[archive.include]]
from = "libs"
to = "lib"
patterns = ["*.jar", "notice.txt"]
expand = true
"#;

    #[test]
    fn parses_archives_and_includes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(MANIFEST_FILE);
        std::fs::write(&path, SAMPLE).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.name, "demo");
        assert_eq!(manifest.archives.len(), 1);

        let archive = &manifest.archives[0];
        assert_eq!(archive.output, PathBuf::from("build/libs/demo.jar"));
        assert_eq!(archive.includes.len(), 2);

        let first = &archive.includes[0];
        assert_eq!(first.from, PathBuf::from("build/classes"));
        assert_eq!(first.to, PathBuf::new());
        assert!(!first.expand);

        let second = &archive.includes[1];
        assert!(second.expand);
        assert_eq!(second.to, PathBuf::from("lib"));
    }

    #[test]
    fn include_translates_into_assembler_spec() {
        let decl = IncludeDecl {
            from: PathBuf::from("libs"),
            to: PathBuf::from("lib"),
            patterns: vec!["*.jar".to_string(), "notice.txt".to_string()],
            expand: true,
        };
        let spec = decl.to_spec();
        assert_eq!(spec.from(), Path::new("libs"));
        assert_eq!(spec.to(), Path::new("lib"));
        assert!(spec.expand_archives());
    }

    #[test]
    fn missing_manifest_is_reported_as_such() {
        let tmp = TempDir::new().unwrap();
        let err = Manifest::load(&tmp.path().join(MANIFEST_FILE)).unwrap_err();
        assert!(matches!(err, KilnError::ManifestNotFound { .. }));
    }

    #[test]
    fn malformed_manifest_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(MANIFEST_FILE);
        std::fs::write(&path, "name = [oops").unwrap();

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, KilnError::ManifestParse { .. }));
    }
}
