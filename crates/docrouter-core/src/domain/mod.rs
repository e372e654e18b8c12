//! Domain entities and routing rules
//!
//! This module contains the core domain types for DocRouter:
//! - Newtypes for validated identifiers (`ClientCode`, `DepartmentName`, `RunId`)
//! - Client code extraction and client folder matching
//! - The department to destination mapping
//! - Per-stage outcomes, skip reasons and run summaries
//! - Domain-specific error types

pub mod code;
pub mod destination;
pub mod errors;
pub mod newtypes;
pub mod outcome;

// Re-export commonly used types
pub use code::{client_folder_matches, extract_client_code};
pub use destination::{expand_template, DestinationMapping};
pub use errors::DomainError;
pub use newtypes::*;
pub use outcome::{
    Disposition, ErrorCategory, FileOutcome, MoveOutcome, RunResult, RunStatus, SkipReason,
    SourceFile,
};
