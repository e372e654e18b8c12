//! Use cases (interactors) for DocRouter
//!
//! Use cases orchestrate domain rules and the filesystem port. They never
//! touch `std::fs` directly; every I/O call goes through [`IFileSystem`].
//!
//! ## Use Cases
//!
//! - [`ResolveSourceUseCase`] - Picks the first reachable source root
//! - [`LocateClientUseCase`] - Finds a client folder by numeric code
//! - [`MoveDocumentUseCase`] - Moves a file into an existing destination
//! - [`RouteDocumentUseCase`] - Runs the per-file pipeline
//! - [`RunSweepUseCase`] - One full orchestration pass
//!
//! [`IFileSystem`]: crate::ports::IFileSystem

pub mod locate_client;
pub mod move_document;
pub mod resolve_source;
pub mod route_document;
pub mod run_sweep;

pub use locate_client::LocateClientUseCase;
pub use move_document::{classify_move_error, MoveDocumentUseCase};
pub use resolve_source::ResolveSourceUseCase;
pub use route_document::RouteDocumentUseCase;
pub use run_sweep::RunSweepUseCase;
