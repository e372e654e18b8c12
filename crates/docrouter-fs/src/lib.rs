//! DocRouter FS - Local filesystem adapter
//!
//! Provides [`LocalFileSystemAdapter`], the `std::fs` implementation of the
//! core [`IFileSystem`](docrouter_core::ports::IFileSystem) port. Mapped
//! network drives and UNC shares are reached through the same calls.
//!
//! ## Modules
//!
//! - [`filesystem`] - Directory checks, listings and cross-volume moves

pub mod filesystem;

pub use filesystem::LocalFileSystemAdapter;
