//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are interfaces that the domain core depends on, but whose
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IFileSystem`] - Existence checks, listings and moves on the local or mapped filesystem

pub mod filesystem;

pub use filesystem::{DirEntryInfo, EntryKind, IFileSystem};
