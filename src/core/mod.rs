//! Core types and functionality for kiln
//!
//! This module forms the foundation of kiln's type system. It defines the
//! error taxonomy shared by every component of the engine and the `Result`
//! alias used throughout the crate.
//!
//! # Error Management
//!
//! kiln uses strongly-typed errors ([`KilnError`]) so callers can react to
//! specific failure modes (a duplicate archive entry is recoverable, a
//! missing source file is not) without inspecting message text. The CLI
//! layers [`anyhow`] context on top for display; the library itself never
//! does string-based error classification.
//!
//! # Design Principles
//!
//! - **Error first**: every fallible operation returns [`Result`] with a
//!   variant precise enough to drive policy decisions.
//! - **No implicit retries**: errors are surfaced unchanged; retry policy,
//!   if any, belongs to external collaborators.

pub mod error;

pub use error::{KilnError, Result};
