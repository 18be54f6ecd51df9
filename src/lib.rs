//! kiln: dependency resolution and artifact packaging for JVM-style builds
//!
//! kiln is the resolution and packaging engine of a build tool: given
//! symbolic package coordinates it builds a deduplicated transitive
//! dependency graph, lets pluggable transformers rewrite the resulting
//! classpath per build scope, and assembles output archives from file
//! specifications, including nested-archive expansion and signature-file
//! exclusion.
//!
//! # Architecture Overview
//!
//! The engine is deliberately thin on I/O policy: who fetches artifacts,
//! how metadata is obtained and when builds run are all concerns of the
//! surrounding build system, reached through small traits.
//!
//! - [`coordinate`] - Coordinate parsing (`group:artifact[:version]`)
//! - [`resolver`] - The [`resolver::CoordinateResolver`] and
//!   [`resolver::ClasspathDependency`] collaborator traits plus the
//!   deduplicated tree builder
//! - [`interceptor`] - Pluggable classpath transformers with fan-out/merge
//!   composition across the five build scopes
//! - [`archive`] - Zip assembly from included-file specs, duplicate-entry
//!   policy, nested-archive expansion, extraction companions
//! - [`render`] - Dependency tree glyph rendering and the console summary
//!   box
//!
//! ## Supporting Modules
//! - [`project`] - A named build unit and its per-scope dependency lists
//! - [`repo`] - A local Maven-layout repository implementing the resolver
//!   traits, with TOML dependency sidecars and semver-aware latest-version
//!   selection
//! - [`config`] - Global configuration (`~/.kiln/config.toml`)
//! - [`manifest`] - Project manifest (`kiln.toml`) declaring output
//!   archives
//! - [`cli`] - The `kiln` binary: `resolve`, `pack`, `extract`
//! - [`core`] - Error taxonomy and `Result` alias
//!
//! # Resolution Semantics
//!
//! Within one resolution pass a coordinate identity enters the tree at
//! most once, at the depth of its first pre-order discovery
//! (first-seen-wins). A coordinate without a version resolves through the
//! collaborator's latest-version lookup, never the exact one. Resolver
//! misses abort the whole build; partial trees are never returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use kiln::repo::LocalRepository;
//! use kiln::resolver::resolve_tree;
//! use kiln::render::render_tree;
//!
//! # fn main() -> kiln::core::Result<()> {
//! let repo = LocalRepository::new("/data/artifacts");
//! let tree = resolve_tree(&repo, "com.google.guava:guava:19.0")?;
//! print!("{}", render_tree(&tree.root.children));
//! # Ok(())
//! # }
//! ```

// Engine modules
pub mod archive;
pub mod coordinate;
pub mod core;
pub mod interceptor;
pub mod render;
pub mod resolver;

// Collaborator implementations and build-system surface
pub mod config;
pub mod manifest;
pub mod project;
pub mod repo;

// Binary surface
pub mod cli;
