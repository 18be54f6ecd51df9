//! Archive assembly: packing file specifications into zip-compatible
//! output archives, with nested-archive expansion and a defined conflict
//! policy. Companion operations extract whole archives or single text
//! entries.
//!
//! # Assembly model
//!
//! Input is a base directory plus a list of [`IncludedFileSpec`]s. Each
//! spec names a source root (`from`), a destination prefix (`to`) and an
//! ordered set of inclusion patterns (literal paths or glob patterns).
//! Matched files stream into an [`ArchiveWriter`]; matched directories
//! recurse with an implicit catch-all spec; nested archives (`.jar`,
//! `.zip`) can be expanded in place, copying their inner entries directly
//! into the output under their original paths while filtering out
//! signature files (`META-INF/*.SF`, `*.DSA`, `*.RSA`).
//!
//! # Conflict policy
//!
//! [`ArchiveWriter::add_entry`] raises
//! [`KilnError::DuplicateArchiveEntry`] when a destination path is written
//! twice: a structural condition, not a message pattern. Assembly routes
//! such errors through a caller-supplied [`ConflictHandler`]; the default
//! [`suppress_duplicates`] drops exactly that variant (first write wins)
//! and re-raises everything else. A missing source file is *not*
//! handler-recoverable: it aborts assembly with
//! [`KilnError::MissingSourceFile`].

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::SystemTime;

use chrono::{Datelike, Timelike};
use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;
use zip::read::ZipArchive;
use zip::result::ZipError;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::core::{KilnError, Result};

/// Signature files stripped from nested archives during expansion.
static SIGNATURE_EXCLUDES: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    ["META-INF/*.SF", "META-INF/*.DSA", "META-INF/*.RSA"]
        .iter()
        .map(|p| Pattern::new(p).expect("signature exclude patterns are valid"))
        .collect()
});

/// Whether `name` (an archive entry path) is a jar signature file.
fn is_signature_file(name: &str) -> bool {
    SIGNATURE_EXCLUDES.iter().any(|p| p.matches(name))
}

/// Whether `path` looks like a nested archive worth expanding.
fn is_nested_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jar") || e.eq_ignore_ascii_case("zip"))
}

/// Normalize path separators to the `/` form archives use.
fn fix_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Convert a filesystem modification time to a zip timestamp.
///
/// Times outside the representable zip range (before 1980) are dropped
/// rather than clamped.
fn zip_datetime_from(time: SystemTime) -> Option<zip::DateTime> {
    let utc: chrono::DateTime<chrono::Utc> = time.into();
    zip::DateTime::from_date_and_time(
        u16::try_from(utc.year()).ok()?,
        u8::try_from(utc.month()).ok()?,
        u8::try_from(utc.day()).ok()?,
        u8::try_from(utc.hour()).ok()?,
        u8::try_from(utc.minute()).ok()?,
        u8::try_from(utc.second()).ok()?,
    )
    .ok()
}

/// Decides what happens when [`ArchiveWriter::add_entry`] reports an
/// error for one entry. Returning `Ok(())` continues assembly; returning
/// the error (or another) aborts it.
pub type ConflictHandler<'a> = &'a dyn Fn(KilnError) -> Result<()>;

/// Default conflict policy: silently drop duplicate-entry errors (first
/// write wins), re-raise everything else.
pub fn suppress_duplicates(err: KilnError) -> Result<()> {
    match err {
        KilnError::DuplicateArchiveEntry { path } => {
            debug!("skipping duplicate archive entry {path}");
            Ok(())
        }
        other => Err(other),
    }
}

/// Strict conflict policy: every entry error aborts assembly, duplicates
/// included.
pub fn fail_on_duplicates(err: KilnError) -> Result<()> {
    Err(err)
}

/// An inclusion pattern inside an [`IncludedFileSpec`].
#[derive(Debug, Clone)]
pub enum FileSpec {
    /// A literal path, relative to the spec's source root. May name a
    /// file or a directory.
    Literal(PathBuf),
    /// A glob pattern matched against paths relative to the source root.
    Glob(String),
}

impl FileSpec {
    /// A literal path spec.
    pub fn literal(path: impl Into<PathBuf>) -> Self {
        FileSpec::Literal(path.into())
    }

    /// A glob pattern spec.
    pub fn glob(pattern: impl Into<String>) -> Self {
        FileSpec::Glob(pattern.into())
    }

    /// Classify `text` as a glob when it contains glob metacharacters,
    /// a literal path otherwise.
    pub fn from_pattern(text: &str) -> Self {
        if text.contains(['*', '?', '[']) {
            FileSpec::Glob(text.to_string())
        } else {
            FileSpec::Literal(PathBuf::from(text))
        }
    }
}

/// A file specification supplied by project configuration: where to read
/// (`from`), where to place inside the archive (`to`), and what to
/// include.
#[derive(Debug, Clone)]
pub struct IncludedFileSpec {
    from: PathBuf,
    to: PathBuf,
    specs: Vec<FileSpec>,
    expand_archives: bool,
    exclude_signatures: bool,
}

impl IncludedFileSpec {
    /// Create a spec with expansion disabled and signature exclusion on.
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>, specs: Vec<FileSpec>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            specs,
            expand_archives: false,
            exclude_signatures: true,
        }
    }

    /// Enable or disable nested-archive expansion for this spec.
    #[must_use]
    pub fn with_expand_archives(mut self, expand: bool) -> Self {
        self.expand_archives = expand;
        self
    }

    /// Enable or disable signature-file exclusion during expansion.
    #[must_use]
    pub fn with_exclude_signatures(mut self, exclude: bool) -> Self {
        self.exclude_signatures = exclude;
        self
    }

    /// The source root, relative to the assembly base directory.
    pub fn from(&self) -> &Path {
        &self.from
    }

    /// The destination prefix inside the output archive.
    pub fn to(&self) -> &Path {
        &self.to
    }

    /// Whether nested archives matched by this spec are expanded.
    pub fn expand_archives(&self) -> bool {
        self.expand_archives
    }

    /// Whether the source root designates a resources tree. Resource
    /// trees carry jars as data; they are never expanded.
    fn from_designates_resources(&self) -> bool {
        self.from.to_string_lossy().contains("resources")
    }

    /// Resolve the inclusion patterns against `root` to paths relative to
    /// it. Literals pass through unchecked (existence is enforced by the
    /// assembler); globs match regular files found by directory walking.
    fn resolve(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut matched = Vec::new();
        for spec in &self.specs {
            match spec {
                FileSpec::Literal(path) => matched.push(path.clone()),
                FileSpec::Glob(pattern_str) => {
                    let pattern =
                        Pattern::new(pattern_str).map_err(|e| KilnError::InvalidPattern {
                            pattern: pattern_str.clone(),
                            reason: e.to_string(),
                        })?;
                    for entry in WalkDir::new(root)
                        .follow_links(false)
                        .into_iter()
                        .filter_map(std::result::Result::ok)
                        .filter(|e| e.file_type().is_file())
                    {
                        if let Ok(relative) = entry.path().strip_prefix(root) {
                            if pattern.matches(&fix_slashes(relative)) {
                                matched.push(relative.to_path_buf());
                            }
                        }
                    }
                }
            }
        }
        Ok(matched)
    }

    /// Destination path for a matched relative path: `to` prefix plus the
    /// relative path, separators normalized to `/`.
    fn destination(&self, relative: &Path) -> String {
        fix_slashes(&self.to.join(relative))
    }
}

/// Sequential writer over a zip-compatible output archive.
///
/// Tracks every destination path it has written so a second write to the
/// same path raises [`KilnError::DuplicateArchiveEntry`] *before* any
/// bytes are emitted, keeping the archive well-formed when the error is
/// suppressed. The writer is an exclusively-owned resource; it is
/// consumed by [`finish`](Self::finish) and closes its underlying handle
/// on drop on every other exit path.
pub struct ArchiveWriter<W: Write + Seek> {
    inner: ZipWriter<W>,
    written: HashSet<String>,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    /// Start a new archive over `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            inner: ZipWriter::new(writer),
            written: HashSet::new(),
        }
    }

    /// Stream one entry into the archive.
    ///
    /// # Errors
    ///
    /// [`KilnError::DuplicateArchiveEntry`] when `name` was already
    /// written; I/O and zip errors are propagated unchanged.
    pub fn add_entry(
        &mut self,
        name: &str,
        modified: Option<zip::DateTime>,
        reader: &mut dyn Read,
    ) -> Result<()> {
        if self.written.contains(name) {
            return Err(KilnError::DuplicateArchiveEntry {
                path: name.to_string(),
            });
        }
        let mut options = SimpleFileOptions::default();
        if let Some(time) = modified {
            options = options.last_modified_time(time);
        }
        self.inner.start_file(name, options)?;
        io::copy(reader, &mut self.inner)?;
        self.written.insert(name.to_string());
        Ok(())
    }

    /// Number of entries written so far.
    pub fn len(&self) -> usize {
        self.written.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    /// Finalize the archive and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.inner.finish()?)
    }
}

impl ArchiveWriter<File> {
    /// Create an archive file at `path`, creating parent directories as
    /// needed.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self::new(File::create(path)?))
    }
}

/// Pack every spec into `writer`, resolving sources against `base_dir`.
///
/// Entry-level errors (duplicates above all) are routed through
/// `on_conflict`; see the module docs for the policy. Missing source
/// files abort regardless of handler.
pub fn add_files<W: Write + Seek>(
    base_dir: &Path,
    specs: &[IncludedFileSpec],
    writer: &mut ArchiveWriter<W>,
    on_conflict: ConflictHandler,
) -> Result<()> {
    for spec in specs {
        add_single_spec(base_dir, spec, writer, on_conflict)?;
    }
    Ok(())
}

fn add_single_spec<W: Write + Seek>(
    base_dir: &Path,
    spec: &IncludedFileSpec,
    writer: &mut ArchiveWriter<W>,
    on_conflict: ConflictHandler,
) -> Result<()> {
    let root = base_dir.join(spec.from());
    for relative in spec.resolve(&root)? {
        let local = root.join(&relative);
        if !local.exists() {
            return Err(KilnError::MissingSourceFile { path: local });
        }

        if local.is_dir() {
            debug!("writing contents of directory {}", local.display());
            let implicit =
                IncludedFileSpec::new("", spec.to(), vec![FileSpec::glob("**")]);
            add_single_spec(&local, &implicit, writer, on_conflict)?;
        } else if spec.expand_archives()
            && is_nested_archive(&local)
            && !spec.from_designates_resources()
        {
            debug!("writing contents of nested archive {}", local.display());
            expand_nested_archive(&local, spec.exclude_signatures, writer, on_conflict)?;
        } else {
            let name = spec.destination(&relative);
            let modified = std::fs::metadata(&local)?
                .modified()
                .ok()
                .and_then(zip_datetime_from);
            let mut file = File::open(&local)?;
            if let Err(err) = writer.add_entry(&name, modified, &mut file) {
                on_conflict(err)?;
            }
        }
    }
    Ok(())
}

/// Copy every non-directory inner entry of `archive` into `writer` under
/// its original path, filtering signature files when asked to.
fn expand_nested_archive<W: Write + Seek>(
    archive: &Path,
    exclude_signatures: bool,
    writer: &mut ArchiveWriter<W>,
    on_conflict: ConflictHandler,
) -> Result<()> {
    let mut nested = ZipArchive::new(File::open(archive)?)?;
    for index in 0..nested.len() {
        let mut entry = nested.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        if exclude_signatures && is_signature_file(&name) {
            continue;
        }
        let modified = entry.last_modified();
        if let Err(err) = writer.add_entry(&name, modified, &mut entry) {
            on_conflict(err)?;
        }
    }
    Ok(())
}

/// Extract the full contents of `archive` into `dest_dir`, recreating
/// directory structure and writing each entry's bytes verbatim.
pub fn extract_archive(archive: &Path, dest_dir: &Path) -> Result<()> {
    let mut zip = ZipArchive::new(File::open(archive)?)?;
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let Some(relative) = entry.enclosed_name() else {
            // Entry escapes the destination; never write it.
            debug!("skipping unsafe archive entry {}", entry.name());
            continue;
        };
        let target = dest_dir.join(relative);
        if entry.is_dir() {
            std::fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
    }
    Ok(())
}

/// Extract a single named entry of `archive` as a UTF-8 string, or
/// `None` when the archive has no such entry.
pub fn extract_text_entry(archive: &Path, name: &str) -> Result<Option<String>> {
    let mut zip = ZipArchive::new(File::open(archive)?)?;
    match zip.by_name(name) {
        Ok(mut entry) => {
            debug!("found {} in {}", name, archive.display());
            let mut text = String::new();
            entry.read_to_string(&mut text)?;
            Ok(Some(text))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
