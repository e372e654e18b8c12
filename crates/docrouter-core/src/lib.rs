//! DocRouter Core - Domain logic and routing rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `ClientCode`, `DepartmentName`, `SourceFile`, `DestinationMapping`, `RunResult`
//! - **Use cases** - `ResolveSourceUseCase`, `LocateClientUseCase`, `MoveDocumentUseCase`, `RouteDocumentUseCase`, `RunSweepUseCase`
//! - **Port definitions** - `IFileSystem`, the only I/O boundary of the core
//!
//! # Architecture
//!
//! The domain module contains pure routing rules with no I/O.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;

#[cfg(test)]
pub(crate) mod testing;
